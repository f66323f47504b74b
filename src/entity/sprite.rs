//! Sprite-sheet backed image with optional frame animation

use glam::Vec2;

use super::{Color, Entity, Size};
use crate::input::KeyStatus;
use crate::renderer::{FrameRect, Surface};

/// One frame of a sheet; `ticks == 0` holds the frame forever
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub rect: FrameRect,
    pub ticks: u32,
}

#[derive(Debug, Clone)]
pub struct Sprite {
    /// Resource id of the sheet
    pub image: &'static str,
    pub position: Vec2,
    /// Pivot inside the sprite, relative to its top-left corner
    pub origin: Vec2,
    pub size: Size,
    pub angle: f32,
    pub color: Color,
    frames: Vec<Frame>,
    frame_index: usize,
    frame_elapsed: u32,
    invalidated: bool,
}

impl Sprite {
    pub fn new(image: &'static str, size: Size) -> Self {
        Self {
            image,
            position: Vec2::ZERO,
            origin: Vec2::ZERO,
            size,
            angle: 0.0,
            color: Color::WHITE,
            frames: Vec::new(),
            frame_index: 0,
            frame_elapsed: 0,
            invalidated: false,
        }
    }

    /// Sheet of equally sized frames laid out left to right
    pub fn strip(image: &'static str, frame_size: Size, count: usize, ticks: u32) -> Self {
        let mut sprite = Self::new(image, frame_size);
        for i in 0..count {
            sprite.frames.push(Frame {
                rect: FrameRect {
                    x: frame_size.width * i as f32,
                    y: 0.0,
                    width: frame_size.width,
                    height: frame_size.height,
                },
                ticks,
            });
        }
        sprite
    }

    /// Append a static frame
    pub fn with_frame(mut self, rect: FrameRect) -> Self {
        self.frames.push(Frame { rect, ticks: 0 });
        self
    }

    pub fn with_origin_center(mut self) -> Self {
        self.origin = Vec2::new(self.size.width / 2.0, self.size.height / 2.0);
        self
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    /// Select a frame; out-of-range indices clamp to the last frame
    pub fn set_frame_index(&mut self, index: usize) {
        self.frame_index = index.min(self.frames.len().saturating_sub(1));
        self.frame_elapsed = 0;
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

impl Entity for Sprite {
    fn update(&mut self, _input: &KeyStatus) {
        let Some(frame) = self.frames.get(self.frame_index) else {
            return;
        };
        if frame.ticks == 0 {
            return;
        }
        self.frame_elapsed += 1;
        if self.frame_elapsed >= frame.ticks {
            self.frame_elapsed = 0;
            self.frame_index = (self.frame_index + 1) % self.frames.len();
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        if self.color.a() <= 0.0 {
            return;
        }
        let frame = self.frames.get(self.frame_index).map(|f| f.rect);
        surface.save();
        surface.translate(self.position);
        if self.angle != 0.0 {
            surface.rotate(self.angle);
        }
        surface.image(self.image, frame, -self.origin, self.size, self.color.a());
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

    #[test]
    fn test_frame_animation_loops() {
        let mut sprite = Sprite::strip("crash", Size::new(150.0, 150.0), 4, 2);
        let input = KeyStatus::default();
        for _ in 0..2 {
            sprite.update(&input);
        }
        assert_eq!(sprite.frame_index(), 1);
        for _ in 0..6 {
            sprite.update(&input);
        }
        assert_eq!(sprite.frame_index(), 0);
    }

    #[test]
    fn test_static_frame_holds_and_clamps() {
        let mut sprite = Sprite::strip("sea_head", Size::new(212.0, 176.0), 3, 0);
        sprite.set_frame_index(7);
        assert_eq!(sprite.frame_index(), 2);
        sprite.update(&KeyStatus::default());
        assert_eq!(sprite.frame_index(), 2);
    }
}
