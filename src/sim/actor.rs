//! Circle collider shared by everything that can hit something

use glam::Vec2;

/// A position plus a collision radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Actor {
    pub position: Vec2,
    radius: f32,
}

impl Actor {
    /// Negative radii are clamped to zero
    pub fn new(position: Vec2, radius: f32) -> Self {
        Self {
            position,
            radius: radius.max(0.0),
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Circles touch or overlap (boundary inclusive, no square root)
    #[inline]
    pub fn is_collide(&self, other: &Actor) -> bool {
        let reach = self.radius + other.radius;
        self.position.distance_squared(other.position) <= reach * reach
    }
}

/// Anything that owns an [`Actor`]
pub trait Collider {
    fn actor(&self) -> &Actor;

    fn is_collide<T: Collider + ?Sized>(&self, other: &T) -> bool {
        self.actor().is_collide(other.actor())
    }
}

impl Collider for Actor {
    fn actor(&self) -> &Actor {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_radius_same_point_collides() {
        let a = Actor::new(Vec2::new(4.0, 4.0), 0.0);
        let b = Actor::new(Vec2::new(4.0, 4.0), 0.0);
        assert!(a.is_collide(&b));
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let a = Actor::new(Vec2::ZERO, 3.0);
        let b = Actor::new(Vec2::new(3.0, 4.0), 2.0);
        assert!(a.is_collide(&b));
        assert!(b.is_collide(&a));

        let c = Actor::new(Vec2::new(3.0, 4.01), 2.0);
        assert!(!a.is_collide(&c));
    }

    #[test]
    fn test_negative_radius_clamps() {
        assert_eq!(Actor::new(Vec2::ZERO, -4.0).radius(), 0.0);
    }
}
