//! One-shot visual effects. Each invalidates itself when its time is up.

use std::f32::consts::PI;

use glam::Vec2;

use super::{Color, Entity, Size, Sprite};
use crate::input::KeyStatus;
use crate::renderer::Surface;
use crate::{ease_in_out_cubic, fit_in};

/// Debris flying outward along eight spokes
pub struct CrashEffect {
    pub position: Vec2,
    duration: u32,
    remain: u32,
    speed: f32,
    distance: f32,
    sprite: Sprite,
    invalidated: bool,
}

impl CrashEffect {
    pub const DURATION: u32 = 120;

    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            duration: Self::DURATION,
            remain: Self::DURATION,
            speed: 6.0,
            distance: 0.0,
            sprite: Sprite::strip("crash", Size::new(150.0, 150.0), 4, 7).with_origin_center(),
            invalidated: false,
        }
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }
}

impl Entity for CrashEffect {
    fn update(&mut self, input: &KeyStatus) {
        if self.invalidated {
            return;
        }
        self.sprite.update(input);
        self.sprite
            .color
            .set_a(self.remain as f32 / self.duration as f32);
        self.distance += self.speed;

        self.remain = self.remain.saturating_sub(1);
        if self.remain == 0 {
            self.invalidate();
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.save();
        surface.translate(self.position);
        for spoke in 0..8 {
            surface.save();
            surface.rotate(spoke as f32 * PI / 4.0);
            surface.translate(Vec2::new(self.distance, 0.0));
            self.sprite.render(surface);
            surface.translate(Vec2::new(self.distance, 0.0));
            self.sprite.render(surface);
            surface.restore();
        }
        surface.restore();
    }

    fn invalidated(&self) -> bool {
        self.invalidated
    }

    fn invalidate(&mut self) {
        self.invalidated = true;
    }
}

/// Decelerating puffs left behind when a decoy body reveals itself
pub struct FogEffect {
    pub position: Vec2,
    duration: u32,
    remain: u32,
    speed: f32,
    distance: f32,
    sprite: Sprite,
    invalidated: bool,
}

impl FogEffect {
    pub const DURATION: u32 = 120;

    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            duration: Self::DURATION,
            remain: Self::DURATION,
            speed: 3.0,
            distance: 5.0,
            sprite: Sprite::new("fog", Size::new(120.0, 120.0)).with_origin_center(),
            invalidated: false,
        }
    }
}

impl Entity for FogEffect {
    fn update(&mut self, _input: &KeyStatus) {
        if self.invalidated {
            return;
        }
        self.sprite
            .color
            .set_a(self.remain as f32 / self.duration as f32);
        self.sprite.size.width *= 1.0015;
        self.sprite.size.height *= 1.0015;
        self.sprite.origin = Vec2::new(self.sprite.size.width, self.sprite.size.height) / 2.0;

        self.distance += self.speed;
        self.speed *= 0.95;

        self.remain = self.remain.saturating_sub(1);
        if self.remain == 0 {
            self.invalidate();
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.save();
        surface.translate(self.position);
        let mut degree = 15.0_f32;
        while degree < 360.0 {
            surface.save();
            surface.rotate(degree.to_radians());
            surface.translate(Vec2::new(self.distance, 0.0));
            self.sprite.render(surface);
            surface.restore();
            degree += 55.0;
        }
        surface.restore();
    }

    fn invalidated(&self) -> bool {
        self.invalidated
    }

    fn invalidate(&mut self) {
        self.invalidated = true;
    }
}

/// Eased progress between two points of an effect's timeline
#[derive(Debug, Clone, Copy)]
struct EasingPoint {
    begin: f32,
    duration: f32,
}

impl EasingPoint {
    fn new(begin: f32, end: f32) -> Self {
        Self {
            begin,
            duration: end - begin,
        }
    }

    fn get(&self, elapsed: f32) -> f32 {
        ease_in_out_cubic(fit_in((elapsed - self.begin) / self.duration, 0.0, 1.0))
    }
}

/// Burst of yellow lines around a successful docking
pub struct SuccessEffect {
    pub position: Vec2,
    tail: EasingPoint,
    head: EasingPoint,
    line_start: f32,
    line_length: f32,
    duration: u32,
    elapsed: u32,
    invalidated: bool,
}

impl SuccessEffect {
    pub const DURATION: u32 = 60;

    pub fn new(position: Vec2) -> Self {
        let duration = Self::DURATION as f32;
        Self {
            position,
            tail: EasingPoint::new(duration * 0.6, duration * 0.95),
            head: EasingPoint::new(0.0, duration * 0.9),
            line_start: 300.0,
            line_length: 450.0,
            duration: Self::DURATION,
            elapsed: 0,
            invalidated: false,
        }
    }
}

impl Entity for SuccessEffect {
    fn update(&mut self, _input: &KeyStatus) {
        self.elapsed += 1;
        if self.elapsed > self.duration {
            self.invalidate();
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        let color = Color::rgba(255.0, 255.0, 0.0, 0.7);
        let elapsed = self.elapsed as f32;
        let from = self.line_start + self.tail.get(elapsed) * self.line_length;
        let to = self.line_start + self.head.get(elapsed) * self.line_length;

        surface.save();
        surface.translate(self.position);
        for spoke in 0..8 {
            surface.save();
            surface.rotate(spoke as f32 * PI / 4.0);
            surface.line(Vec2::new(from, 0.0), Vec2::new(to, 0.0), 50.0, color);
            surface.restore();
        }
        surface.restore();
    }

    fn invalidated(&self) -> bool {
        self.invalidated
    }

    fn invalidate(&mut self) {
        self.invalidated = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::CommandList;

    fn run<E: Entity>(effect: &mut E, ticks: u32) {
        let input = KeyStatus::default();
        for _ in 0..ticks {
            effect.update(&input);
        }
    }

    #[test]
    fn test_crash_effect_lifetime() {
        let mut effect = CrashEffect::new(Vec2::new(100.0, 100.0));
        run(&mut effect, CrashEffect::DURATION - 1);
        assert!(!effect.invalidated());
        run(&mut effect, 1);
        assert!(effect.invalidated());
        assert_eq!(effect.distance(), 6.0 * CrashEffect::DURATION as f32);
    }

    #[test]
    fn test_fog_effect_lifetime() {
        let mut effect = FogEffect::new(Vec2::ZERO);
        run(&mut effect, FogEffect::DURATION);
        assert!(effect.invalidated());
    }

    #[test]
    fn test_success_effect_draws_eight_lines() {
        let mut effect = SuccessEffect::new(Vec2::ZERO);
        run(&mut effect, 10);
        let mut list = CommandList::new();
        effect.render(&mut list);
        let lines = list
            .commands
            .iter()
            .filter(|c| matches!(c, crate::renderer::DrawCommand::Line { .. }))
            .count();
        assert_eq!(lines, 8);

        run(&mut effect, SuccessEffect::DURATION);
        assert!(effect.invalidated());
    }
}
