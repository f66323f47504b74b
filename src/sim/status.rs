//! Per-run player state owned by the in-game scene

use crate::tuning::Tuning;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerStatus {
    pub level: u32,
    pub score: u64,
    pub life: u32,
    /// Written only by the head while flying
    pub fuel: u32,
}

impl PlayerStatus {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            level: 1,
            score: 0,
            life: tuning.life_full,
            fuel: tuning.fuel_full,
        }
    }

    /// Lose a life; true when none are left
    pub fn lose_life(&mut self) -> bool {
        self.life = self.life.saturating_sub(1);
        self.life == 0
    }

    pub fn refuel(&mut self, tuning: &Tuning) {
        self.fuel = tuning.fuel_full;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lose_life_saturates() {
        let mut status = PlayerStatus::new(&Tuning::default());
        assert_eq!(status.life, 3);
        assert!(!status.lose_life());
        assert!(!status.lose_life());
        assert!(status.lose_life());
        assert!(status.lose_life());
        assert_eq!(status.life, 0);
    }
}
