//! Heads-up display and result screens

pub mod game_over_screen;
pub mod hud;
pub mod success_screen;

pub use game_over_screen::GameOverScreen;
pub use hud::Hud;
pub use success_screen::SuccessScreen;
