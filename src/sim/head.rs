//! The player's head: thrust, steering, gravity and drag integrated per tick

use std::f32::consts::PI;

use glam::Vec2;
use rand::Rng;

use super::actor::{Actor, Collider};
use crate::consts::{GROUND_LEVEL, VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use crate::entity::{Color, Entity, Label, Size, Sprite};
use crate::input::{Key, KeyStatus};
use crate::renderer::Surface;
use crate::tuning::FlightTuning;
use crate::{normalize_angle, wrap_horizontal};

/// Head sprite frames
const FRAME_READY: usize = 0;
const FRAME_BOOST: usize = 1;
const FRAME_ALERT: usize = 2;

/// Distance from the head's center to the exhaust nozzle
const NOZZLE_DISTANCE: f32 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightMode {
    Flying,
    /// Docked; the head no longer moves
    Success,
    /// Out of fuel; still falls
    Exhausted,
}

pub struct SeaHead {
    actor: Actor,
    pub velocity: Vec2,
    angle: f32,
    angle_velocity: f32,
    tuning: FlightTuning,
    mode: FlightMode,
    boosting: bool,
    steering: bool,
    head_sprite: Sprite,
    fire_sprite: Sprite,
    arrow_sprite: Sprite,
    arrow_label: Label,
    invalidated: bool,
}

impl SeaHead {
    pub fn new(position: Vec2, tuning: &FlightTuning) -> Self {
        let mut fire_sprite = Sprite::new("sea_fire", Size::new(38.0, 60.0))
            .with_position(Vec2::new(0.0, 55.0));
        fire_sprite.origin = Vec2::new(19.0, 6.0);
        fire_sprite.color = Color::TRANSPARENT;

        let mut arrow_label = Label::new("", Vec2::new(0.0, 330.0), 70.0);
        arrow_label.align = crate::entity::TextAlign::Center;

        Self {
            actor: Actor::new(position, tuning.head_radius),
            velocity: Vec2::ZERO,
            angle: 0.0,
            angle_velocity: 0.0,
            tuning: tuning.clone(),
            mode: FlightMode::Flying,
            boosting: false,
            steering: false,
            head_sprite: Sprite::strip("sea_head", Size::new(212.0, 176.0), 3, 0)
                .with_origin_center(),
            fire_sprite,
            arrow_sprite: Sprite::new("sea_arrow", Size::new(80.0, 100.0))
                .with_origin_center()
                .with_position(Vec2::new(0.0, 250.0)),
            arrow_label,
            invalidated: false,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.actor.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.actor.position = position;
    }

    pub fn radius(&self) -> f32 {
        self.actor.radius()
    }

    /// Radians, in (-π, π], 0 = upright
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn set_angle(&mut self, angle: f32) {
        self.angle = normalize_angle(angle);
    }

    pub fn angle_velocity(&self) -> f32 {
        self.angle_velocity
    }

    pub fn set_angle_velocity(&mut self, angle_velocity: f32) {
        self.angle_velocity = angle_velocity;
    }

    pub fn mode(&self) -> FlightMode {
        self.mode
    }

    /// Main thruster fired this tick
    pub fn is_boosting(&self) -> bool {
        self.boosting
    }

    pub fn head_frame(&self) -> usize {
        self.head_sprite.frame_index()
    }

    /// Lowest point of the collision circle reached the ground
    pub fn touches_ground(&self) -> bool {
        self.actor.position.y + self.actor.radius() >= GROUND_LEVEL
    }

    /// Entirely below the viewport
    pub fn has_fallen(&self) -> bool {
        self.actor.position.y - self.actor.radius() > VIEWPORT_HEIGHT
    }

    /// Nozzle position and the direction exhaust leaves it
    pub fn exhaust(&self) -> (Vec2, f32) {
        let opposite = self.angle + PI;
        let nozzle =
            self.actor.position + Vec2::new(opposite.sin(), -opposite.cos()) * NOZZLE_DISTANCE;
        (nozzle, opposite)
    }

    /// Freeze on a docking body
    pub fn set_success(&mut self) {
        self.mode = FlightMode::Success;
        self.boosting = false;
        self.head_sprite.set_frame_index(FRAME_READY);
        self.fire_sprite.color.set_a(0.0);
    }

    pub fn set_exhausted(&mut self) {
        if self.mode == FlightMode::Flying {
            log::debug!("Head out of fuel");
        }
        self.mode = FlightMode::Exhausted;
        self.boosting = false;
        self.head_sprite.set_frame_index(FRAME_ALERT);
        self.fire_sprite.color.set_a(0.0);
    }

    /// Advance one tick of flight.
    ///
    /// `fuel` is owned by the player status; the head is its only writer and
    /// never spends what is not there. `criteria_ok` picks the idle sprite.
    pub fn fly<R: Rng + ?Sized>(
        &mut self,
        input: &KeyStatus,
        fuel: &mut u32,
        criteria_ok: bool,
        rng: &mut R,
    ) {
        if self.invalidated || self.mode == FlightMode::Success {
            return;
        }

        self.boosting = self.boost_up(input, fuel, rng);
        self.steering = self.boost_angle(input, fuel);
        self.fire_sprite
            .color
            .set_a(if self.boosting { 1.0 } else { 0.0 });
        let frame = if self.boosting || self.steering {
            FRAME_BOOST
        } else if criteria_ok {
            FRAME_READY
        } else {
            FRAME_ALERT
        };
        self.head_sprite.set_frame_index(frame);

        self.velocity.y += self.tuning.gravity;
        self.velocity *= self.tuning.air_resistance;
        self.angle_velocity *= self.tuning.air_resistance;

        let position = &mut self.actor.position;
        position.x = wrap_horizontal(position.x + self.velocity.x, VIEWPORT_WIDTH);
        position.y += self.velocity.y;
        self.angle = normalize_angle(self.angle + self.angle_velocity);

        if *fuel == 0 {
            self.set_exhausted();
        }
    }

    fn boost_up<R: Rng + ?Sized>(&mut self, input: &KeyStatus, fuel: &mut u32, rng: &mut R) -> bool {
        if !input.is_pressed(Key::Up) || *fuel == 0 {
            return false;
        }
        let thrust = Vec2::new(self.angle.sin(), -self.angle.cos());
        self.velocity += thrust * self.tuning.fuel_up_efficiency;

        let instability = self.tuning.angle_instability;
        self.angle_velocity += rng.random_range(-instability..=instability);
        self.angle *= self.tuning.angle_gravity_rate;

        *fuel -= 1;
        true
    }

    fn boost_angle(&mut self, input: &KeyStatus, fuel: &mut u32) -> bool {
        let left = input.is_pressed(Key::Left);
        if left == input.is_pressed(Key::Right) || *fuel == 0 {
            return false;
        }
        let efficiency = self.tuning.fuel_angle_efficiency;
        self.angle_velocity += if left { -efficiency } else { efficiency };

        *fuel -= 1;
        true
    }
}

impl Collider for SeaHead {
    fn actor(&self) -> &Actor {
        &self.actor
    }
}

impl Entity for SeaHead {
    /// Presentation only; flight happens in [`SeaHead::fly`]
    fn update(&mut self, _input: &KeyStatus) {
        let position = self.actor.position;
        if position.y < 0.0 {
            self.arrow_label.text = format!("{}m", (-position.y / 50.0).floor() as i64);
        }
        self.arrow_label.position.x = position.x;
        self.arrow_sprite.position.x = position.x;
    }

    fn render(&self, surface: &mut dyn Surface) {
        let position = self.actor.position;
        // Draw the wrapped copies so crossing the edge looks seamless
        for offset in [0.0, -VIEWPORT_WIDTH, VIEWPORT_WIDTH] {
            surface.save();
            surface.translate(Vec2::new(position.x + offset, position.y));
            surface.rotate(self.angle);
            self.fire_sprite.render(surface);
            self.head_sprite.render(surface);
            surface.restore();
        }

        if position.y < 0.0 {
            self.arrow_sprite.render(surface);
            self.arrow_label.render(surface);
        }
    }

    fn invalidated(&self) -> bool {
        self.invalidated
    }

    fn invalidate(&mut self) {
        self.invalidated = true;
        self.boosting = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn head_at(x: f32, y: f32) -> SeaHead {
        SeaHead::new(Vec2::new(x, y), &FlightTuning::default())
    }

    #[test]
    fn test_free_fall_applies_gravity_then_drag() {
        let mut head = head_at(500.0, 300.0);
        let mut fuel = 100;
        let mut rng = Pcg32::seed_from_u64(1);
        head.fly(&KeyStatus::default(), &mut fuel, true, &mut rng);

        let expected_vy = 0.09 * 0.997;
        assert!((head.velocity.y - expected_vy).abs() < 1e-6);
        assert!((head.position().y - (300.0 + expected_vy)).abs() < 1e-4);
        assert_eq!(fuel, 100);
        assert_eq!(head.head_frame(), FRAME_READY);
    }

    #[test]
    fn test_thrust_and_steer_spend_one_fuel_each() {
        let mut head = head_at(500.0, 300.0);
        let mut fuel = 10;
        let mut rng = Pcg32::seed_from_u64(2);
        let input = KeyStatus::with(&[Key::Up, Key::Right]);
        head.fly(&input, &mut fuel, true, &mut rng);

        assert_eq!(fuel, 8);
        assert!(head.is_boosting());
        assert!(head.velocity.y < 0.0);
        assert!(head.angle_velocity() > 0.0);
        assert_eq!(head.head_frame(), FRAME_BOOST);
    }

    #[test]
    fn test_both_steering_keys_cancel() {
        let mut head = head_at(500.0, 300.0);
        let mut fuel = 10;
        let mut rng = Pcg32::seed_from_u64(3);
        head.fly(&KeyStatus::with(&[Key::Left, Key::Right]), &mut fuel, false, &mut rng);
        assert_eq!(fuel, 10);
        assert_eq!(head.angle_velocity(), 0.0);
        assert_eq!(head.head_frame(), FRAME_ALERT);
    }

    #[test]
    fn test_last_fuel_unit_then_exhausted() {
        let mut head = head_at(500.0, 300.0);
        let mut fuel = 1;
        let mut rng = Pcg32::seed_from_u64(4);
        let input = KeyStatus::with(&[Key::Up, Key::Left]);
        head.fly(&input, &mut fuel, true, &mut rng);
        assert_eq!(fuel, 0);
        assert_eq!(head.mode(), FlightMode::Exhausted);

        let y = head.position().y;
        for _ in 0..10 {
            head.fly(&input, &mut fuel, true, &mut rng);
        }
        assert_eq!(fuel, 0);
        assert!(!head.is_boosting());
        assert!(head.position().y > y - 5.0);
        assert_eq!(head.head_frame(), FRAME_ALERT);
    }

    #[test]
    fn test_wraps_across_right_edge() {
        let mut head = head_at(VIEWPORT_WIDTH - 0.5, 300.0);
        head.velocity = Vec2::new(3.0, 0.0);
        let mut fuel = 0;
        let mut rng = Pcg32::seed_from_u64(5);
        head.fly(&KeyStatus::default(), &mut fuel, true, &mut rng);
        let x = head.position().x;
        assert!((0.0..VIEWPORT_WIDTH).contains(&x));
        assert!(x < 3.0);
    }

    #[test]
    fn test_success_freezes_motion() {
        let mut head = head_at(500.0, 300.0);
        head.set_success();
        let mut fuel = 50;
        let mut rng = Pcg32::seed_from_u64(6);
        head.fly(&KeyStatus::with(&[Key::Up]), &mut fuel, true, &mut rng);
        assert_eq!(head.position(), Vec2::new(500.0, 300.0));
        assert_eq!(fuel, 50);
    }

    #[test]
    fn test_ground_contact_uses_radius() {
        let head = head_at(500.0, GROUND_LEVEL - 50.0);
        assert!(head.touches_ground());
        let head = head_at(500.0, GROUND_LEVEL - 50.5);
        assert!(!head.touches_ground());
    }

    #[test]
    fn test_altitude_arrow_above_viewport() {
        let mut head = head_at(500.0, -260.0);
        head.update(&KeyStatus::default());
        assert_eq!(head.arrow_label.text, "5m");
    }
}
