//! In-game simulation: flight, collisions, docking and scoring
//!
//! Everything here is deterministic given the same input snapshots and the
//! same seeded RNG. Rendering lives on the entities; no module in here knows
//! about scenes or screens.

pub mod actor;
pub mod body;
pub mod docking;
pub mod enemy;
pub mod head;
pub mod level;
pub mod score;
pub mod status;

pub use actor::{Actor, Collider};
pub use body::{BodyType, SeaBody};
pub use docking::DockingCriteria;
pub use enemy::{EnemyBody, EnemyHead, HeadType};
pub use head::{FlightMode, SeaHead};
pub use level::{Level, generate_level};
pub use score::ScoreCalculator;
pub use status::PlayerStatus;

use crate::entity::Color;
use crate::renderer::Surface;

/// Outline a collision circle (debug overlay)
pub fn render_collider<T: Collider + ?Sized>(collider: &T, surface: &mut dyn Surface) {
    let actor = collider.actor();
    surface.stroke_circle(
        actor.position,
        actor.radius(),
        2.0,
        Color::GREEN,
    );
}
