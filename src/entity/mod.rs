//! Entities: things that update every tick and draw themselves
//!
//! Owners keep entities in plain collections and drop the invalidated ones
//! after each update pass; an invalidated entity is never drawn again.

pub mod effect;
pub mod label;
pub mod particle;
pub mod rect;
pub mod sprite;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::input::KeyStatus;
use crate::renderer::Surface;

pub use effect::{CrashEffect, FogEffect, SuccessEffect};
pub use label::{Label, TextAlign};
pub use particle::ParticleGenerator;
pub use rect::Rect;
pub use sprite::Sprite;

/// 2D point in viewport pixels (`x` = left, `y` = top)
pub type Position = Vec2;

/// Lifecycle contract shared by everything on screen
pub trait Entity {
    fn update(&mut self, input: &KeyStatus);

    fn render(&self, surface: &mut dyn Surface);

    /// Tombstone flag; never resets once set
    fn invalidated(&self) -> bool;

    /// Idempotent
    fn invalidate(&mut self);
}

/// Drop invalidated entities from an owned collection
pub fn retain_valid<E: Entity>(entities: &mut Vec<E>) {
    entities.retain(|e| !e.invalidated());
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn fullscreen() -> Self {
        use crate::consts::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
        Self::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT)
    }
}

/// RGBA color: `r`, `g`, `b` in 0..=255, `a` in 0..=1. Every setter clamps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    r: f32,
    g: f32,
    b: f32,
    a: f32,
}

impl Default for Color {
    fn default() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }
}

impl Color {
    pub const WHITE: Color = Color {
        r: 255.0,
        g: 255.0,
        b: 255.0,
        a: 1.0,
    };
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const RED: Color = Color {
        r: 255.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const GREEN: Color = Color {
        r: 0.0,
        g: 255.0,
        b: 0.0,
        a: 1.0,
    };
    pub const TRANSPARENT: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    pub fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        let mut color = Self::TRANSPARENT;
        color.set_r(r);
        color.set_g(g);
        color.set_b(b);
        color.set_a(a);
        color
    }

    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    pub fn r(&self) -> f32 {
        self.r
    }

    pub fn g(&self) -> f32 {
        self.g
    }

    pub fn b(&self) -> f32 {
        self.b
    }

    pub fn a(&self) -> f32 {
        self.a
    }

    pub fn set_r(&mut self, r: f32) {
        self.r = r.clamp(0.0, 255.0);
    }

    pub fn set_g(&mut self, g: f32) {
        self.g = g.clamp(0.0, 255.0);
    }

    pub fn set_b(&mut self, b: f32) {
        self.b = b.clamp(0.0, 255.0);
    }

    pub fn set_a(&mut self, a: f32) {
        self.a = a.clamp(0.0, 1.0);
    }

    /// Same color with a different alpha
    pub fn with_alpha(mut self, a: f32) -> Self {
        self.set_a(a);
        self
    }

    /// CSS `rgba(...)` string for canvas fill styles
    pub fn to_css(&self) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.r.round() as u8,
            self.g.round() as u8,
            self.b.round() as u8,
            self.a
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_clamps_every_channel() {
        let mut color = Color::rgba(300.0, -5.0, 128.0, 2.0);
        assert_eq!(color.r(), 255.0);
        assert_eq!(color.g(), 0.0);
        assert_eq!(color.b(), 128.0);
        assert_eq!(color.a(), 1.0);

        color.set_a(color.a() - 1.5);
        assert_eq!(color.a(), 0.0);
    }

    #[test]
    fn test_color_css() {
        assert_eq!(Color::rgba(0.0, 255.0, 0.0, 0.5).to_css(), "rgba(0, 255, 0, 0.5)");
    }
}
