//! In-game indicators. They read player status and docking criteria; they
//! never write either.

use glam::Vec2;

use crate::entity::{Color, Entity, FogEffect, Label, Rect, Size, Sprite, TextAlign};
use crate::input::KeyStatus;
use crate::renderer::{FrameRect, Surface};
use crate::sim::{DockingCriteria, PlayerStatus};

/// Sprite showing one fixed frame of a sheet
fn sheet_frame(image: &'static str, x: f32, width: f32, height: f32) -> Sprite {
    Sprite::new(image, Size::new(width, height)).with_frame(FrameRect {
        x,
        y: 0.0,
        width,
        height,
    })
}

/// Gauge whose needle sweeps from +80° (full) to -80° (empty)
pub struct FuelIndicator {
    pub position: Vec2,
    back: Sprite,
    needle: Sprite,
    front: Sprite,
    ratio: f32,
}

impl FuelIndicator {
    pub fn new(position: Vec2) -> Self {
        let mut needle = sheet_frame("fuel", 204.0, 204.0, 113.0);
        needle.origin = Vec2::new(102.0, 100.0);
        needle.position = Vec2::new(102.0, 100.0);
        Self {
            position,
            back: sheet_frame("fuel", 408.0, 204.0, 113.0),
            needle,
            front: sheet_frame("fuel", 0.0, 204.0, 113.0),
            ratio: 1.0,
        }
    }

    pub fn sync(&mut self, fuel: u32, fuel_full: u32) {
        self.ratio = if fuel_full == 0 {
            0.0
        } else {
            (fuel as f32 / fuel_full as f32).clamp(0.0, 1.0)
        };
        self.needle.angle = Self::needle_angle(self.ratio);
    }

    pub fn needle_angle(ratio: f32) -> f32 {
        let full = -10.0_f32;
        let empty = -170.0_f32;
        (full + 90.0 + (empty - full) * (1.0 - ratio)).to_radians()
    }
}

impl FuelIndicator {
    fn render(&self, surface: &mut dyn Surface) {
        surface.save();
        surface.translate(self.position);
        self.back.render(surface);
        self.needle.render(surface);
        self.front.render(surface);
        surface.restore();
    }
}

/// Row of life icons; a lost life leaves a rising puff
pub struct LifeIndicator {
    pub position: Vec2,
    life: u32,
    life_full: u32,
    living: Sprite,
    fallen: Sprite,
    puffs: Vec<FogEffect>,
}

impl LifeIndicator {
    const EACH_WIDTH: f32 = 130.0;
    const PADDING: f32 = 5.0;

    pub fn new(position: Vec2, life: u32, life_full: u32) -> Self {
        Self {
            position,
            life,
            life_full,
            living: sheet_frame("life", 0.0, 130.0, 111.0),
            fallen: sheet_frame("life", 130.0, 130.0, 111.0),
            puffs: Vec::new(),
        }
    }

    fn slot(i: u32) -> f32 {
        (Self::PADDING + Self::EACH_WIDTH) * i as f32
    }

    pub fn sync(&mut self, life: u32) {
        if life < self.life {
            let lost = Vec2::new(Self::slot(life) + Self::EACH_WIDTH / 2.0, 55.0);
            self.puffs.push(FogEffect::new(lost));
        }
        self.life = life;
    }

    pub fn puff_count(&self) -> usize {
        self.puffs.len()
    }

    fn update(&mut self, input: &KeyStatus) {
        for puff in self.puffs.iter_mut() {
            puff.update(input);
        }
        crate::entity::retain_valid(&mut self.puffs);
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.save();
        surface.translate(self.position);
        for i in 0..self.life_full.max(self.life) {
            let sprite = if i < self.life { &self.living } else { &self.fallen };
            surface.save();
            surface.translate(Vec2::new(Self::slot(i), 0.0));
            sprite.render(surface);
            surface.restore();
        }
        for puff in &self.puffs {
            puff.render(surface);
        }
        surface.restore();
    }
}

/// Four panels, green while an axis is inside tolerance
pub struct DockingIndicator {
    pub position: Vec2,
    panels: [Rect; 4],
    captions: [Label; 4],
}

impl DockingIndicator {
    pub const SAFE: Color = Color::GREEN;
    pub const UNSAFE: Color = Color::RED;

    pub fn new(position: Vec2) -> Self {
        let layout = [(90.0, 60.0), (160.0, 60.0), (240.0, 60.0), (320.0, 80.0)];
        let names = ["VX", "VY", "W", "A"];
        Self {
            position,
            panels: layout.map(|(x, w)| Rect::new(Vec2::new(x, 20.0), Size::new(w, 60.0), Self::SAFE)),
            captions: std::array::from_fn(|i| {
                let (x, w) = layout[i];
                let mut label = Label::new(names[i], Vec2::new(x + w / 2.0, 105.0), 24.0);
                label.align = TextAlign::Center;
                label
            }),
        }
    }

    pub fn sync(&mut self, criteria: &DockingCriteria) {
        for (panel, safe) in self.panels.iter_mut().zip(criteria.axes()) {
            panel.color = if safe { Self::SAFE } else { Self::UNSAFE };
        }
    }

    pub fn panel_colors(&self) -> [Color; 4] {
        self.panels.each_ref().map(|p| p.color)
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.save();
        surface.translate(self.position);
        for panel in &self.panels {
            panel.render(surface);
        }
        for caption in &self.captions {
            caption.render(surface);
        }
        surface.restore();
    }
}

/// Caption plus a number, e.g. "Score 1200"
pub struct NumberIndicator {
    label: Label,
    caption: &'static str,
}

impl NumberIndicator {
    pub fn new(caption: &'static str, position: Vec2, align: TextAlign) -> Self {
        let mut label = Label::new(caption, position, 60.0);
        label.align = align;
        Self { label, caption }
    }

    pub fn sync(&mut self, value: u64) {
        self.label.text = format!("{} {}", self.caption, value);
    }

    pub fn text(&self) -> &str {
        &self.label.text
    }
}

/// Everything drawn on top of the play field
pub struct Hud {
    pub fuel: FuelIndicator,
    pub life: LifeIndicator,
    pub docking: DockingIndicator,
    pub score: NumberIndicator,
    pub level: NumberIndicator,
    fuel_full: u32,
    invalidated: bool,
}

impl Hud {
    pub fn new(status: &PlayerStatus, fuel_full: u32, life_full: u32) -> Self {
        let mut hud = Self {
            fuel: FuelIndicator::new(Vec2::new(40.0, 30.0)),
            life: LifeIndicator::new(Vec2::new(280.0, 30.0), status.life, life_full),
            docking: DockingIndicator::new(Vec2::new(1420.0, 20.0)),
            score: NumberIndicator::new("Score", Vec2::new(1880.0, 200.0), TextAlign::End),
            level: NumberIndicator::new("Level", Vec2::new(1880.0, 270.0), TextAlign::End),
            fuel_full,
            invalidated: false,
        };
        hud.sync(status, &DockingCriteria::default());
        hud
    }

    /// Pull the latest readings
    pub fn sync(&mut self, status: &PlayerStatus, criteria: &DockingCriteria) {
        self.fuel.sync(status.fuel, self.fuel_full);
        self.life.sync(status.life);
        self.docking.sync(criteria);
        self.score.sync(status.score);
        self.level.sync(status.level as u64);
    }
}

impl Entity for Hud {
    fn update(&mut self, input: &KeyStatus) {
        self.life.update(input);
    }

    fn render(&self, surface: &mut dyn Surface) {
        self.fuel.render(surface);
        self.life.render(surface);
        self.docking.render(surface);
        self.score.label.render(surface);
        self.level.label.render(surface);
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
    use crate::tuning::Tuning;

    #[test]
    fn test_needle_sweep() {
        assert!((FuelIndicator::needle_angle(1.0) - 80f32.to_radians()).abs() < 1e-6);
        assert!((FuelIndicator::needle_angle(0.0) + 80f32.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn test_docking_panels_follow_criteria() {
        let mut indicator = DockingIndicator::new(Vec2::ZERO);
        let mut criteria = DockingCriteria::default();
        criteria.update_from(0.0, 9.0, 0.0, 0.0);
        indicator.sync(&criteria);
        assert_eq!(
            indicator.panel_colors(),
            [
                DockingIndicator::SAFE,
                DockingIndicator::UNSAFE,
                DockingIndicator::SAFE,
                DockingIndicator::SAFE
            ]
        );
    }

    #[test]
    fn test_lost_life_puffs_then_clears() {
        let tuning = Tuning::default();
        let mut status = PlayerStatus::new(&tuning);
        let mut hud = Hud::new(&status, tuning.fuel_full, tuning.life_full);
        status.lose_life();
        hud.sync(&status, &DockingCriteria::default());
        assert_eq!(hud.life.puff_count(), 1);
        for _ in 0..FogEffect::DURATION {
            hud.update(&KeyStatus::default());
        }
        assert_eq!(hud.life.puff_count(), 0);
    }

    #[test]
    fn test_renders_score_and_level() {
        let tuning = Tuning::default();
        let mut status = PlayerStatus::new(&tuning);
        status.score = 1234;
        status.level = 2;
        let mut hud = Hud::new(&status, tuning.fuel_full, tuning.life_full);
        hud.sync(&status, &DockingCriteria::default());
        let mut list = CommandList::new();
        hud.render(&mut list);
        let texts = list.texts();
        assert!(texts.contains(&"Score 1234"));
        assert!(texts.contains(&"Level 2"));
        assert_eq!(list.image_count("life"), 3);
    }
}
