//! Text label

use glam::Vec2;

use super::{Color, Entity};
use crate::input::KeyStatus;
use crate::renderer::Surface;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Start,
    Center,
    End,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Start => "start",
            TextAlign::Center => "center",
            TextAlign::End => "end",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Label {
    pub text: String,
    pub position: Vec2,
    /// Font size in pixels
    pub size: f32,
    pub color: Color,
    pub align: TextAlign,
    /// Hidden labels skip rendering regardless of alpha
    pub visible: bool,
    invalidated: bool,
}

impl Default for Label {
    fn default() -> Self {
        Self {
            text: String::new(),
            position: Vec2::ZERO,
            size: 40.0,
            color: Color::BLACK,
            align: TextAlign::Start,
            visible: true,
            invalidated: false,
        }
    }
}

impl Label {
    pub fn new(text: impl Into<String>, position: Vec2, size: f32) -> Self {
        Self {
            text: text.into(),
            position,
            size,
            ..Default::default()
        }
    }

    /// Centered label
    pub fn centered(text: impl Into<String>, position: Vec2, size: f32, color: Color) -> Self {
        Self {
            align: TextAlign::Center,
            color,
            ..Self::new(text, position, size)
        }
    }
}

impl Entity for Label {
    fn update(&mut self, _input: &KeyStatus) {}

    fn render(&self, surface: &mut dyn Surface) {
        if !self.visible || self.color.a() <= 0.0 || self.text.is_empty() {
            return;
        }
        surface.text(&self.text, self.position, self.size, self.align, self.color);
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

    #[test]
    fn test_transparent_label_is_not_drawn() {
        let mut label = Label::centered("Total", Vec2::ZERO, 90.0, Color::TRANSPARENT);
        let mut list = CommandList::new();
        label.render(&mut list);
        assert!(list.commands.is_empty());

        label.color.set_a(1.0);
        label.render(&mut list);
        assert_eq!(list.texts(), vec!["Total"]);
    }
}
