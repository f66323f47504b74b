//! Docking score breakdown

use crate::tuning::ScoreTuning;

/// Best accuracy score per component
pub const MAX_ACCURACY_SCORE: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreCalculator {
    pub fuel_score: u32,
    pub position_score: u32,
    pub angle_score: u32,
}

impl ScoreCalculator {
    /// `position_diff` is head x minus body x, `angle` the head angle at docking
    pub fn new(fuel: u32, position_diff: f32, angle: f32, tuning: &ScoreTuning) -> Self {
        let score = Self {
            fuel_score: fuel,
            position_score: decay(position_diff.abs() / tuning.position_decay),
            angle_score: decay(angle.abs() * tuning.angle_decay),
        };
        log::debug!(
            "Score: fuel {fuel} -> {}, position {position_diff} -> {}, angle {angle} -> {}",
            score.fuel_score,
            score.position_score,
            score.angle_score
        );
        score
    }

    pub fn total_score(&self) -> u64 {
        self.fuel_score as u64 + self.position_score as u64 + self.angle_score as u64
    }
}

/// `floor(2^-halvings * 500)`
fn decay(halvings: f32) -> u32 {
    if !halvings.is_finite() {
        return 0;
    }
    let value = (2.0_f64.powf(-(halvings as f64)) * MAX_ACCURACY_SCORE as f64).floor();
    (value as u32).min(MAX_ACCURACY_SCORE)
}
