//! Fixed level layouts with shuffled body slots

use glam::Vec2;
use rand::Rng;
use rand::seq::SliceRandom;

use super::body::{BodyType, SeaBody};
use super::enemy::{EnemyBody, EnemyHead, HeadType};
use crate::consts::{BODY_SLOTS, BODY_TOP, LEVEL_MAX};
use crate::error::GameError;

/// Enemy head start: position, velocity, type
type HeadStart = ((f32, f32), (f32, f32), HeadType);

struct LevelPlan {
    /// Real body plus decoys
    bodies: usize,
    heads: &'static [HeadStart],
    enemy_bodies: &'static [(f32, f32)],
}

const PLANS: [LevelPlan; LEVEL_MAX as usize] = [
    LevelPlan {
        bodies: 2,
        heads: &[],
        enemy_bodies: &[],
    },
    LevelPlan {
        bodies: 3,
        heads: &[((500.0, 500.0), (3.0, -2.0), HeadType::Feel)],
        enemy_bodies: &[],
    },
    LevelPlan {
        bodies: 4,
        heads: &[
            ((500.0, 500.0), (3.0, -2.0), HeadType::Feel),
            ((1400.0, 300.0), (-2.0, 3.0), HeadType::Von),
        ],
        enemy_bodies: &[],
    },
    LevelPlan {
        bodies: 5,
        heads: &[
            ((500.0, 500.0), (3.5, -2.5), HeadType::Feel),
            ((1400.0, 300.0), (-2.5, 3.0), HeadType::Gi),
        ],
        enemy_bodies: &[(1100.0, 600.0)],
    },
    LevelPlan {
        bodies: 5,
        heads: &[
            ((500.0, 500.0), (4.0, -2.5), HeadType::Von),
            ((1400.0, 300.0), (-3.0, 3.5), HeadType::Gi),
            ((960.0, 700.0), (-4.0, 2.0), HeadType::Editor),
        ],
        enemy_bodies: &[(420.0, 620.0), (1500.0, 560.0)],
    },
];

/// Everything a level places besides the player's head
pub struct Level {
    /// The real body comes first
    pub bodies: Vec<SeaBody>,
    pub enemy_heads: Vec<EnemyHead>,
    pub enemy_bodies: Vec<EnemyBody>,
}

impl Level {
    pub fn real_body(&self) -> Option<&SeaBody> {
        self.bodies.iter().find(|b| !b.is_fake())
    }
}

/// Build level `level` (1-based). Body slots are shuffled with `rng`.
pub fn generate_level<R: Rng + ?Sized>(level: u32, rng: &mut R) -> Result<Level, GameError> {
    let plan = level
        .checked_sub(1)
        .and_then(|i| PLANS.get(i as usize))
        .ok_or(GameError::UnknownLevel {
            level,
            max: LEVEL_MAX,
        })?;

    let mut slots = BODY_SLOTS;
    slots.shuffle(rng);
    let bodies: Vec<SeaBody> = slots
        .iter()
        .take(plan.bodies)
        .enumerate()
        .map(|(i, &x)| SeaBody::new(Vec2::new(x, BODY_TOP), BodyType::Sea, i > 0))
        .collect();

    let enemy_heads = plan
        .heads
        .iter()
        .map(|&((x, y), (vx, vy), kind)| EnemyHead::new(Vec2::new(x, y), Vec2::new(vx, vy), kind, rng))
        .collect();
    let enemy_bodies = plan
        .enemy_bodies
        .iter()
        .map(|&(x, y)| EnemyBody::new(Vec2::new(x, y), rng))
        .collect();

    log::info!(
        "Level {level}: real body at x={}, {} decoys, {} enemy heads, {} enemy bodies",
        slots[0],
        plan.bodies - 1,
        plan.heads.len(),
        plan.enemy_bodies.len()
    );

    Ok(Level {
        bodies,
        enemy_heads,
        enemy_bodies,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_level_counts() {
        let mut rng = Pcg32::seed_from_u64(42);
        let expected = [(2, 0, 0), (3, 1, 0), (4, 2, 0), (5, 2, 1), (5, 3, 2)];
        for (i, (bodies, heads, enemy_bodies)) in expected.into_iter().enumerate() {
            let level = generate_level(i as u32 + 1, &mut rng).unwrap();
            assert_eq!(level.bodies.len(), bodies);
            assert_eq!(level.enemy_heads.len(), heads);
            assert_eq!(level.enemy_bodies.len(), enemy_bodies);
            assert_eq!(level.bodies.iter().filter(|b| !b.is_fake()).count(), 1);
        }
    }

    #[test]
    fn test_bodies_use_distinct_slots() {
        let mut rng = Pcg32::seed_from_u64(7);
        let level = generate_level(5, &mut rng).unwrap();
        let mut xs: Vec<f32> = level.bodies.iter().map(|b| b.position().x).collect();
        xs.sort_by(f32::total_cmp);
        assert_eq!(xs, BODY_SLOTS.to_vec());
        assert!(level.bodies.iter().all(|b| b.position().y == BODY_TOP));
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = generate_level(3, &mut Pcg32::seed_from_u64(5)).unwrap();
        let b = generate_level(3, &mut Pcg32::seed_from_u64(5)).unwrap();
        assert_eq!(
            a.real_body().map(|b| b.position()),
            b.real_body().map(|b| b.position())
        );
    }

    #[test]
    fn test_unknown_level_is_an_error() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert!(matches!(
            generate_level(0, &mut rng),
            Err(GameError::UnknownLevel { level: 0, max: 5 })
        ));
        assert!(matches!(
            generate_level(6, &mut rng),
            Err(GameError::UnknownLevel { level: 6, .. })
        ));
    }
}
