//! Property tests for the flight and scoring invariants

use glam::Vec2;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use sea_docking::consts::VIEWPORT_WIDTH;
use sea_docking::sim::{Actor, DockingCriteria, ScoreCalculator, SeaHead};
use sea_docking::tuning::{DockingTolerance, FlightTuning, ScoreTuning};
use sea_docking::{Key, KeyStatus};

fn keys_from_bits(bits: u8) -> KeyStatus {
    let mut keys = KeyStatus::new();
    for (i, key) in [Key::Up, Key::Left, Key::Right].into_iter().enumerate() {
        keys.set_pressed(key, bits & (1 << i) != 0);
    }
    keys
}

proptest! {
    #[test]
    fn test_collision_is_symmetric(
        ax in -2000.0f32..2000.0, ay in -2000.0f32..2000.0, ar in 0.0f32..200.0,
        bx in -2000.0f32..2000.0, by in -2000.0f32..2000.0, br in 0.0f32..200.0,
    ) {
        let a = Actor::new(Vec2::new(ax, ay), ar);
        let b = Actor::new(Vec2::new(bx, by), br);
        prop_assert_eq!(a.is_collide(&b), b.is_collide(&a));
        prop_assert!(a.is_collide(&a));
    }

    #[test]
    fn test_accuracy_scores_stay_in_range(
        fuel in 0u32..20_000,
        diff in -5000.0f32..5000.0,
        angle in -3.2f32..3.2,
    ) {
        let score = ScoreCalculator::new(fuel, diff, angle, &ScoreTuning::default());
        prop_assert!(score.position_score <= 500);
        prop_assert!(score.angle_score <= 500);
        prop_assert_eq!(score.fuel_score, fuel);
        prop_assert_eq!(
            score.total_score(),
            fuel as u64 + score.position_score as u64 + score.angle_score as u64
        );
    }

    #[test]
    fn test_position_score_never_rises_with_distance(a in 0.0f32..2000.0, b in 0.0f32..2000.0) {
        let tuning = ScoreTuning::default();
        let (near, far) = if a <= b { (a, b) } else { (b, a) };
        let near = ScoreCalculator::new(0, near, 0.0, &tuning).position_score;
        let far = ScoreCalculator::new(0, far, 0.0, &tuning).position_score;
        prop_assert!(far <= near);
    }

    #[test]
    fn test_angle_score_never_rises_with_angle(a in 0.0f32..3.2, b in 0.0f32..3.2) {
        let tuning = ScoreTuning::default();
        let (small, large) = if a <= b { (a, b) } else { (b, a) };
        let near = ScoreCalculator::new(0, 0.0, small, &tuning).angle_score;
        let far = ScoreCalculator::new(0, 0.0, large, &tuning).angle_score;
        prop_assert!(far <= near);
        let mirrored = ScoreCalculator::new(0, 0.0, -large, &tuning).angle_score;
        prop_assert_eq!(mirrored, far);
    }

    #[test]
    fn test_fuel_spends_at_most_two_per_tick(
        start in 0u32..50,
        inputs in prop::collection::vec(0u8..8, 1..120),
        seed in any::<u64>(),
    ) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut head = SeaHead::new(Vec2::new(960.0, 300.0), &FlightTuning::default());
        let mut fuel = start;
        for bits in inputs {
            let before = fuel;
            head.fly(&keys_from_bits(bits), &mut fuel, true, &mut rng);
            prop_assert!(fuel <= before);
            prop_assert!(before - fuel <= 2);
        }
    }

    #[test]
    fn test_head_stays_inside_horizontal_wrap(
        x in 0.0f32..VIEWPORT_WIDTH,
        vx in -400.0f32..400.0,
        ticks in 1usize..60,
    ) {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut head = SeaHead::new(Vec2::new(x, 300.0), &FlightTuning::default());
        head.velocity = Vec2::new(vx, 0.0);
        let mut fuel = 0;
        for _ in 0..ticks {
            head.fly(&KeyStatus::default(), &mut fuel, true, &mut rng);
            let left = head.position().x;
            prop_assert!((0.0..VIEWPORT_WIDTH).contains(&left), "x = {}", left);
        }
    }

    #[test]
    fn test_criteria_pass_only_inside_every_band(
        vx in -4.0f32..4.0, vy in -4.0f32..4.0, w in -0.05f32..0.05, angle in -0.5f32..0.5,
    ) {
        let tolerance = DockingTolerance::default();
        let mut criteria = DockingCriteria::new(tolerance.clone());
        criteria.update_from(vx, vy, w, angle);
        let inside = vx.abs() <= tolerance.max_horizontal_velocity
            && vy.abs() <= tolerance.max_vertical_velocity
            && w.abs() <= tolerance.max_angle_velocity
            && angle.abs() <= tolerance.max_angle;
        prop_assert_eq!(criteria.check(), inside);
    }
}
