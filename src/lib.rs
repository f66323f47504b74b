//! Sea Docking - A lander-style docking arcade game
//!
//! Core modules:
//! - `script`: Tick-driven script runners (sequential queue, parallel set)
//! - `entity`: Entity lifecycle, drawable primitives and visual effects
//! - `sim`: Flight physics, collisions, docking criteria and scoring
//! - `scene`: Scene state machines (intro, title, in-game)
//! - `ui`: HUD indicators and result screens
//! - `renderer`: Draw surface abstraction and browser canvas backend
//! - `platform`: Frame clock and browser key mapping
//! - `persistence`: Durable key-value storage
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod entity;
pub mod error;
pub mod game;
pub mod highscores;
pub mod input;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod scene;
pub mod script;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use error::GameError;
pub use game::Game;
pub use highscores::HighScores;
pub use input::{Key, KeyStatus};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Simulation ticks per second
    pub const FPS: u32 = 60;
    /// Length of one tick in milliseconds
    pub const TICK_MS: f64 = 1000.0 / FPS as f64;
    /// Maximum ticks run per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Logical viewport (the world wraps horizontally at this width)
    pub const VIEWPORT_WIDTH: f32 = 1920.0;
    pub const VIEWPORT_HEIGHT: f32 = 1080.0;

    /// The head crashes once its lowest point reaches this line
    pub const GROUND_LEVEL: f32 = VIEWPORT_HEIGHT - 60.0;
    /// Top (docking point) of every body
    pub const BODY_TOP: f32 = VIEWPORT_HEIGHT - 180.0;
    /// Collision radius around a body's docking point
    pub const BODY_DOCK_RADIUS: f32 = 20.0;
    /// Fixed horizontal slots bodies are shuffled into
    pub const BODY_SLOTS: [f32; 5] = [240.0, 600.0, 960.0, 1320.0, 1680.0];

    /// Where each attempt starts
    pub const HEAD_SPAWN: (f32, f32) = (VIEWPORT_WIDTH / 2.0, 120.0);

    pub const ENEMY_HEAD_RADIUS: f32 = 50.0;
    pub const ENEMY_BODY_RADIUS: f32 = 45.0;

    /// Highest level; docking here ends the run
    pub const LEVEL_MAX: u32 = 5;
}

/// Normalize angle to (-π, π]
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    while angle > PI {
        angle -= TAU;
    }
    while angle <= -PI {
        angle += TAU;
    }
    angle
}

/// Wrap a horizontal coordinate into [0, width)
#[inline]
pub fn wrap_horizontal(left: f32, width: f32) -> f32 {
    let wrapped = left.rem_euclid(width);
    // rem_euclid rounds tiny negatives up to `width`
    if wrapped >= width { 0.0 } else { wrapped }
}

/// Clamp `value` into [min, max]
#[inline]
pub fn fit_in(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Cubic ease-in-out over progress 0..=1 (see easings.net)
#[inline]
pub fn ease_in_out_cubic(x: f32) -> f32 {
    if x < 0.5 {
        4.0 * x * x * x
    } else {
        1.0 - (-2.0 * x + 2.0).powi(3) / 2.0
    }
}
