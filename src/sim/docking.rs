//! Live docking readiness derived from head telemetry

use super::head::SeaHead;
use crate::tuning::DockingTolerance;

/// Four pass/fail axes, recomputed from scratch on every update
#[derive(Debug, Clone, PartialEq)]
pub struct DockingCriteria {
    tolerance: DockingTolerance,
    pub horizontal_velocity: bool,
    pub vertical_velocity: bool,
    pub angle_velocity: bool,
    pub angle: bool,
}

impl DockingCriteria {
    pub fn new(tolerance: DockingTolerance) -> Self {
        Self {
            tolerance,
            horizontal_velocity: true,
            vertical_velocity: true,
            angle_velocity: true,
            angle: true,
        }
    }

    pub fn update(&mut self, head: &SeaHead) {
        self.update_from(head.velocity.x, head.velocity.y, head.angle_velocity(), head.angle());
    }

    /// Same as [`update`](Self::update) on raw telemetry
    pub fn update_from(&mut self, vx: f32, vy: f32, angle_velocity: f32, angle: f32) {
        let t = &self.tolerance;
        self.horizontal_velocity = vx.abs() <= t.max_horizontal_velocity;
        self.vertical_velocity = vy.abs() <= t.max_vertical_velocity;
        self.angle_velocity = angle_velocity.abs() <= t.max_angle_velocity;
        self.angle = angle.abs() <= t.max_angle;
    }

    pub fn check(&self) -> bool {
        self.horizontal_velocity && self.vertical_velocity && self.angle_velocity && self.angle
    }

    /// Per-axis state in indicator order
    pub fn axes(&self) -> [bool; 4] {
        [
            self.horizontal_velocity,
            self.vertical_velocity,
            self.angle_velocity,
            self.angle,
        ]
    }
}

impl Default for DockingCriteria {
    fn default() -> Self {
        Self::new(DockingTolerance::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_true_by_default() {
        let criteria = DockingCriteria::default();
        assert!(criteria.check());
        assert_eq!(criteria.axes(), [true; 4]);
    }

    #[test]
    fn test_each_axis_fails_independently() {
        let mut criteria = DockingCriteria::default();
        criteria.update_from(-1.6, 0.0, 0.0, 0.0);
        assert_eq!(criteria.axes(), [false, true, true, true]);
        assert!(!criteria.check());

        criteria.update_from(0.0, 2.6, 0.0, 0.0);
        assert_eq!(criteria.axes(), [true, false, true, true]);

        criteria.update_from(0.0, 0.0, 0.02, 0.0);
        assert_eq!(criteria.axes(), [true, true, false, true]);

        criteria.update_from(0.0, 0.0, 0.0, -0.2);
        assert_eq!(criteria.axes(), [true, true, true, false]);
    }

    #[test]
    fn test_recovers_after_failure() {
        let mut criteria = DockingCriteria::default();
        criteria.update_from(9.0, 9.0, 1.0, 1.0);
        assert!(!criteria.check());
        criteria.update_from(1.5, 2.5, 0.01, 0.15);
        assert!(criteria.check());
    }
}
