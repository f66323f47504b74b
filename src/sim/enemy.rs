//! Hazards: drifting enemy heads and stationary enemy bodies

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::actor::{Actor, Collider};
use crate::consts::{ENEMY_BODY_RADIUS, ENEMY_HEAD_RADIUS, VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use crate::entity::{Entity, Size, Sprite};
use crate::input::KeyStatus;
use crate::renderer::Surface;
use crate::wrap_horizontal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadType {
    Feel,
    Von,
    Gi,
    Editor,
}

impl HeadType {
    pub fn frame_index(self) -> usize {
        match self {
            HeadType::Feel => 0,
            HeadType::Von => 1,
            HeadType::Gi => 2,
            HeadType::Editor => 3,
        }
    }
}

/// Wraps horizontally, bounces off the top and bottom, spins
pub struct EnemyHead {
    actor: Actor,
    pub velocity: Vec2,
    kind: HeadType,
    angle: f32,
    angle_velocity: f32,
    sprite: Sprite,
    invalidated: bool,
}

impl EnemyHead {
    pub fn new<R: Rng + ?Sized>(position: Vec2, velocity: Vec2, kind: HeadType, rng: &mut R) -> Self {
        let mut sprite =
            Sprite::strip("enemy_head", Size::new(247.0, 247.0), 4, 0).with_origin_center();
        sprite.set_frame_index(kind.frame_index());
        Self {
            actor: Actor::new(position, ENEMY_HEAD_RADIUS),
            velocity,
            kind,
            angle: rng.random_range(0.0..TAU),
            angle_velocity: rng.random_range(-0.05..0.05),
            sprite,
            invalidated: false,
        }
    }

    pub fn kind(&self) -> HeadType {
        self.kind
    }

    pub fn position(&self) -> Vec2 {
        self.actor.position
    }
}

impl Collider for EnemyHead {
    fn actor(&self) -> &Actor {
        &self.actor
    }
}

impl Entity for EnemyHead {
    fn update(&mut self, _input: &KeyStatus) {
        let radius = self.actor.radius();
        let position = &mut self.actor.position;
        position.x = wrap_horizontal(position.x + self.velocity.x, VIEWPORT_WIDTH);
        position.y += self.velocity.y;
        if position.y - radius <= 0.0 || position.y + radius >= VIEWPORT_HEIGHT {
            self.velocity.y = -self.velocity.y;
        }
        self.angle = (self.angle + self.angle_velocity).rem_euclid(TAU);
    }

    fn render(&self, surface: &mut dyn Surface) {
        let position = self.actor.position;
        for offset in [0.0, -VIEWPORT_WIDTH, VIEWPORT_WIDTH] {
            surface.save();
            surface.translate(Vec2::new(position.x + offset, position.y));
            surface.rotate(self.angle);
            self.sprite.render(surface);
            surface.restore();
        }
    }

    fn invalidated(&self) -> bool {
        self.invalidated
    }

    fn invalidate(&mut self) {
        self.invalidated = true;
    }
}

/// Stationary hazard; also what a decoy body turns into
pub struct EnemyBody {
    actor: Actor,
    sprite: Sprite,
    invalidated: bool,
}

impl EnemyBody {
    pub fn new<R: Rng + ?Sized>(position: Vec2, rng: &mut R) -> Self {
        let mut sprite =
            Sprite::strip("enemy_body", Size::new(121.0, 114.0), 3, 0).with_origin_center();
        sprite.set_frame_index(rng.random_range(0..3));
        Self {
            actor: Actor::new(position, ENEMY_BODY_RADIUS),
            sprite,
            invalidated: false,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.actor.position
    }
}

impl Collider for EnemyBody {
    fn actor(&self) -> &Actor {
        &self.actor
    }
}

impl Entity for EnemyBody {
    fn update(&mut self, _input: &KeyStatus) {}

    fn render(&self, surface: &mut dyn Surface) {
        surface.save();
        surface.translate(self.actor.position);
        self.sprite.render(surface);
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
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_enemy_head_bounces_off_ceiling() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut head = EnemyHead::new(
            Vec2::new(500.0, ENEMY_HEAD_RADIUS + 1.0),
            Vec2::new(3.0, -2.0),
            HeadType::Feel,
            &mut rng,
        );
        head.update(&KeyStatus::default());
        assert_eq!(head.velocity.y, 2.0);
        assert_eq!(head.position(), Vec2::new(503.0, ENEMY_HEAD_RADIUS - 1.0));
    }

    #[test]
    fn test_enemy_head_wraps_left_edge() {
        let mut rng = Pcg32::seed_from_u64(10);
        let mut head = EnemyHead::new(
            Vec2::new(1.0, 500.0),
            Vec2::new(-3.0, 0.0),
            HeadType::Gi,
            &mut rng,
        );
        head.update(&KeyStatus::default());
        assert_eq!(head.position().x, VIEWPORT_WIDTH - 2.0);
        assert_eq!(head.kind(), HeadType::Gi);
    }

    #[test]
    fn test_enemy_body_is_stationary() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut body = EnemyBody::new(Vec2::new(240.0, 900.0), &mut rng);
        body.update(&KeyStatus::default());
        assert_eq!(body.position(), Vec2::new(240.0, 900.0));
        assert_eq!(body.actor().radius(), ENEMY_BODY_RADIUS);
    }
}
