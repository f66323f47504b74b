//! Host-facing game object
//!
//! Owns the services, the scene manager, the frame clock and the key latch.
//! A host feeds it key events and frame timestamps and asks it to draw; the
//! game runs as many fixed ticks as the clock says are due.

use crate::error::GameError;
use crate::input::{Key, KeyStatus};
use crate::platform::FrameClock;
use crate::renderer::Surface;
use crate::scene::{Bundle, SceneId, SceneManager, Services};

pub struct Game {
    services: Services,
    scenes: SceneManager,
    clock: FrameClock,
    keys: KeyStatus,
    ticks: u64,
}

impl Game {
    pub fn new(mut services: Services, first: SceneId) -> Result<Self, GameError> {
        let scenes = SceneManager::new(first, &Bundle::new(), &mut services)?;
        log::info!("Game created (first scene {first}, seed {})", services.seed);
        Ok(Self {
            services,
            scenes,
            clock: FrameClock::default(),
            keys: KeyStatus::new(),
            ticks: 0,
        })
    }

    pub fn set_key(&mut self, key: Key, pressed: bool) {
        self.keys.set_pressed(key, pressed);
    }

    /// Run one simulation tick
    pub fn tick(&mut self) -> Result<(), GameError> {
        let input = self.keys.latch();
        self.scenes.update(&input, &mut self.services)?;
        self.ticks += 1;
        Ok(())
    }

    /// Run every tick due at `now_ms`; returns how many ran
    pub fn frame(&mut self, now_ms: f64) -> Result<u32, GameError> {
        let due = self.clock.advance(now_ms);
        for _ in 0..due {
            self.tick()?;
        }
        Ok(due)
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        self.scenes.render(surface);
    }

    /// Forget frame timing and held keys (page hidden, focus lost)
    pub fn suspend(&mut self) {
        self.clock.reset();
        self.keys = KeyStatus::new();
    }

    pub fn scene_id(&self) -> SceneId {
        self.scenes.current_id()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn services(&self) -> &Services {
        &self.services
    }
}
