//! Filled rectangle (backgrounds, fade overlays, indicator panels)

use glam::Vec2;

use super::{Color, Entity, Size};
use crate::input::KeyStatus;
use crate::renderer::Surface;

#[derive(Debug, Clone)]
pub struct Rect {
    pub position: Vec2,
    pub size: Size,
    pub color: Color,
    invalidated: bool,
}

impl Rect {
    pub fn new(position: Vec2, size: Size, color: Color) -> Self {
        Self {
            position,
            size,
            color,
            invalidated: false,
        }
    }

    pub fn fullscreen(color: Color) -> Self {
        Self::new(Vec2::ZERO, Size::fullscreen(), color)
    }
}

impl Entity for Rect {
    fn update(&mut self, _input: &KeyStatus) {}

    fn render(&self, surface: &mut dyn Surface) {
        if self.color.a() <= 0.0 {
            return;
        }
        surface.fill_rect(self.position, self.size, self.color);
    }

    fn invalidated(&self) -> bool {
        self.invalidated
    }

    fn invalidate(&mut self) {
        self.invalidated = true;
    }
}
