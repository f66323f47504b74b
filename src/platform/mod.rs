//! Platform glue
//!
//! The fixed-timestep clock the host loop runs on, and the mapping from DOM
//! key names to game keys.

use crate::consts::{MAX_SUBSTEPS, TICK_MS};
use crate::input::Key;

/// Turns frame timestamps into a whole number of simulation ticks.
///
/// Time not yet worth a whole tick carries over to the next frame. When a
/// frame is more than `max_substeps` ticks late (tab in background, debugger
/// pause) the backlog is dropped instead of replayed, so a slow frame can
/// never queue up more work for the next one (no spiral of death). Simulation
/// time then falls behind wall-clock time by the dropped ticks.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<f64>,
    tick_ms: f64,
    max_substeps: u32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(TICK_MS, MAX_SUBSTEPS)
    }
}

impl FrameClock {
    pub fn new(tick_ms: f64, max_substeps: u32) -> Self {
        Self {
            last: None,
            tick_ms,
            max_substeps,
        }
    }

    /// Ticks to run for a frame at `now_ms`
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let Some(last) = self.last else {
            self.last = Some(now_ms);
            return 0;
        };
        if now_ms <= last {
            return 0;
        }

        let due = ((now_ms - last) / self.tick_ms).floor();
        if due > self.max_substeps as f64 {
            log::debug!("Dropping {} late ticks", due as u64 - self.max_substeps as u64);
            self.last = Some(now_ms);
            return self.max_substeps;
        }
        self.last = Some(last + due * self.tick_ms);
        due as u32
    }

    /// Forget the last timestamp (after the page was hidden)
    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Game key for a `KeyboardEvent.key` value
pub fn key_from_dom(key: &str) -> Option<Key> {
    match key {
        "ArrowUp" | "w" | "W" => Some(Key::Up),
        "ArrowLeft" | "a" | "A" => Some(Key::Left),
        "ArrowRight" | "d" | "D" => Some(Key::Right),
        "Enter" | " " => Some(Key::Ok),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_runs_nothing() {
        let mut clock = FrameClock::new(10.0, 8);
        assert_eq!(clock.advance(1000.0), 0);
    }

    #[test]
    fn test_whole_ticks_with_carry() {
        let mut clock = FrameClock::new(10.0, 8);
        clock.advance(0.0);
        assert_eq!(clock.advance(15.0), 1);
        // 5 ms carried over
        assert_eq!(clock.advance(25.0), 1);
        assert_eq!(clock.advance(29.0), 0);
        assert_eq!(clock.advance(35.0), 1);
    }

    #[test]
    fn test_backlog_capped_and_dropped() {
        let mut clock = FrameClock::new(10.0, 8);
        clock.advance(0.0);
        assert_eq!(clock.advance(1000.0), 8);
        assert_eq!(clock.advance(1010.0), 1);
    }

    #[test]
    fn test_dom_keys() {
        assert_eq!(key_from_dom("ArrowUp"), Some(Key::Up));
        assert_eq!(key_from_dom("Enter"), Some(Key::Ok));
        assert_eq!(key_from_dom("Escape"), None);
    }
}
