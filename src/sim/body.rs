//! Docking bodies standing on the ground: one real, the rest decoys

use glam::Vec2;

use super::actor::{Actor, Collider};
use crate::consts::BODY_DOCK_RADIUS;
use crate::entity::{Entity, Size, Sprite};
use crate::input::KeyStatus;
use crate::renderer::Surface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyType {
    Sea,
    Feel,
    Von,
    Gi,
}

impl BodyType {
    pub const ALL: [BodyType; 4] = [BodyType::Sea, BodyType::Feel, BodyType::Von, BodyType::Gi];

    pub fn frame_index(self) -> usize {
        match self {
            BodyType::Sea => 0,
            BodyType::Feel => 1,
            BodyType::Von => 2,
            BodyType::Gi => 3,
        }
    }
}

/// Limb sprite: image id, pivot, offset from the docking point
struct Limb {
    sprite: Sprite,
}

impl Limb {
    fn new(image: &'static str, size: Size, origin: Vec2, offset: Vec2) -> Self {
        let mut sprite = Sprite::new(image, size).with_position(offset);
        sprite.origin = origin;
        Self { sprite }
    }
}

/// A body waiting for its head. `position` is the docking point on top.
pub struct SeaBody {
    dock: Actor,
    kind: BodyType,
    fake: bool,
    limbs: Vec<Limb>,
    torso: Sprite,
    invalidated: bool,
}

impl SeaBody {
    pub fn new(position: Vec2, kind: BodyType, fake: bool) -> Self {
        let limbs = vec![
            Limb::new("sea_arm_l", Size::new(40.0, 60.0), Vec2::new(36.0, 8.0), Vec2::new(-17.0, 6.0)),
            Limb::new("sea_arm_r", Size::new(40.0, 60.0), Vec2::new(9.0, 9.0), Vec2::new(15.0, 7.0)),
            Limb::new("sea_leg_l", Size::new(30.0, 80.0), Vec2::new(14.0, 9.0), Vec2::new(-17.0, 69.0)),
            Limb::new("sea_leg_r", Size::new(30.0, 80.0), Vec2::new(10.0, 10.0), Vec2::new(15.0, 69.0)),
        ];
        let mut torso = Sprite::strip("sea_body", Size::new(92.0, 110.0), 4, 0);
        torso.origin = Vec2::new(46.0, 3.0);
        torso.set_frame_index(kind.frame_index());

        Self {
            dock: Actor::new(position, BODY_DOCK_RADIUS),
            kind,
            fake,
            limbs,
            torso,
            invalidated: false,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.dock.position
    }

    pub fn kind(&self) -> BodyType {
        self.kind
    }

    /// Decoys reveal themselves instead of accepting a head
    pub fn is_fake(&self) -> bool {
        self.fake
    }
}

impl Collider for SeaBody {
    fn actor(&self) -> &Actor {
        &self.dock
    }
}

impl Entity for SeaBody {
    fn update(&mut self, _input: &KeyStatus) {}

    fn render(&self, surface: &mut dyn Surface) {
        surface.save();
        surface.translate(self.dock.position);
        for limb in &self.limbs {
            limb.sprite.render(surface);
        }
        self.torso.render(surface);
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

    #[test]
    fn test_body_draws_limbs_and_torso() {
        let body = SeaBody::new(Vec2::new(600.0, 900.0), BodyType::Von, false);
        let mut list = CommandList::new();
        body.render(&mut list);
        assert_eq!(list.image_count("sea_body"), 1);
        assert_eq!(list.image_count("sea_leg_l"), 1);
        assert_eq!(body.kind().frame_index(), 2);
        assert!(!body.is_fake());
    }

    #[test]
    fn test_dock_circle_is_at_position() {
        let body = SeaBody::new(Vec2::new(600.0, 900.0), BodyType::Sea, true);
        assert_eq!(body.actor().position, Vec2::new(600.0, 900.0));
        assert_eq!(body.actor().radius(), BODY_DOCK_RADIUS);
    }
}
