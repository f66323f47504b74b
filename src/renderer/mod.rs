//! Drawing abstraction
//!
//! The game issues canvas-style draw calls through [`Surface`]. The browser
//! backend forwards them to a 2D canvas; [`CommandList`] records them, which
//! is what native runs and tests use.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use glam::Vec2;

use crate::entity::{Color, Size, TextAlign};

/// Source rectangle of one frame inside a sprite sheet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// A 2D draw target with a canvas-like transform stack
pub trait Surface {
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, offset: Vec2);
    fn rotate(&mut self, radians: f32);

    fn fill_rect(&mut self, origin: Vec2, size: Size, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color);
    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);
    /// Draw (a frame of) an image keyed by resource id; `origin` is the top-left corner
    fn image(&mut self, id: &str, frame: Option<FrameRect>, origin: Vec2, size: Size, alpha: f32);
    fn text(&mut self, text: &str, at: Vec2, size: f32, align: TextAlign, color: Color);
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Save,
    Restore,
    Translate(Vec2),
    Rotate(f32),
    FillRect {
        origin: Vec2,
        size: Size,
        color: Color,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    StrokeCircle {
        center: Vec2,
        radius: f32,
        width: f32,
        color: Color,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
    },
    Image {
        id: String,
        frame: Option<FrameRect>,
        origin: Vec2,
        size: Size,
        alpha: f32,
    },
    Text {
        text: String,
        at: Vec2,
        size: f32,
        align: TextAlign,
        color: Color,
    },
}

/// Surface that records every call
#[derive(Debug, Default)]
pub struct CommandList {
    pub commands: Vec<DrawCommand>,
}

impl CommandList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// All text drawn, in order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Number of draws of the given image id
    pub fn image_count(&self, id: &str) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Image { id: i, .. } if i == id))
            .count()
    }
}

impl Surface for CommandList {
    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, offset: Vec2) {
        self.commands.push(DrawCommand::Translate(offset));
    }

    fn rotate(&mut self, radians: f32) {
        self.commands.push(DrawCommand::Rotate(radians));
    }

    fn fill_rect(&mut self, origin: Vec2, size: Size, color: Color) {
        self.commands.push(DrawCommand::FillRect {
            origin,
            size,
            color,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            width,
            color,
        });
    }

    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
        });
    }

    fn image(&mut self, id: &str, frame: Option<FrameRect>, origin: Vec2, size: Size, alpha: f32) {
        self.commands.push(DrawCommand::Image {
            id: id.to_string(),
            frame,
            origin,
            size,
            alpha,
        });
    }

    fn text(&mut self, text: &str, at: Vec2, size: f32, align: TextAlign, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            at,
            size,
            align,
            color,
        });
    }
}

/// Keyed asset lookup.
///
/// A missing id is not an error: callers skip the visual or sound, and the
/// first miss per id is logged.
pub struct Resources<T> {
    items: HashMap<String, T>,
    reported: RefCell<HashSet<String>>,
}

impl<T> Default for Resources<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Resources<T> {
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
            reported: RefCell::new(HashSet::new()),
        }
    }

    pub fn insert(&mut self, id: impl Into<String>, item: T) {
        self.items.insert(id.into(), item);
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        let item = self.items.get(id);
        if item.is_none() && self.reported.borrow_mut().insert(id.to_string()) {
            log::warn!("Resource {id:?} is missing");
        }
        item
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
