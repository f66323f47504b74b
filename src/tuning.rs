//! Data-driven game balance
//!
//! Every constant that shapes how the head flies, how strict docking is and how
//! fast the score decays lives here so a JSON override can retune the game
//! without touching code. Missing fields fall back to the defaults below.

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Per-tick flight constants for the player's head
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightTuning {
    /// Drag multiplier applied to velocity and spin every tick
    pub air_resistance: f32,
    /// Added to vertical velocity every tick
    pub gravity: f32,
    /// Thrust acceleration per tick of boosting
    pub fuel_up_efficiency: f32,
    /// Spin acceleration per tick of steering
    pub fuel_angle_efficiency: f32,
    /// Amplitude of the random spin kick while boosting
    pub angle_instability: f32,
    /// Angle multiplier applied while boosting
    pub angle_gravity_rate: f32,
    pub head_radius: f32,
}

impl Default for FlightTuning {
    fn default() -> Self {
        Self {
            air_resistance: 0.997,
            gravity: 0.09,
            fuel_up_efficiency: 0.4,
            fuel_angle_efficiency: 0.002,
            angle_instability: 0.0002,
            angle_gravity_rate: 1.008,
            head_radius: 50.0,
        }
    }
}

/// Tolerance bands a docking attempt must sit inside (absolute values)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DockingTolerance {
    pub max_horizontal_velocity: f32,
    pub max_vertical_velocity: f32,
    /// Radians per tick
    pub max_angle_velocity: f32,
    /// Radians
    pub max_angle: f32,
}

impl Default for DockingTolerance {
    fn default() -> Self {
        Self {
            max_horizontal_velocity: 1.5,
            max_vertical_velocity: 2.5,
            max_angle_velocity: 0.01,
            max_angle: 0.15,
        }
    }
}

/// Exponential decay of the accuracy scores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreTuning {
    /// Pixels of horizontal offset per halving of the position score
    pub position_decay: f32,
    /// Halvings of the angle score per radian
    pub angle_decay: f32,
}

impl Default for ScoreTuning {
    fn default() -> Self {
        Self {
            position_decay: 10.0,
            angle_decay: 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub flight: FlightTuning,
    pub docking: DockingTolerance,
    pub score: ScoreTuning,
    /// Fuel at the start of every attempt
    pub fuel_full: u32,
    /// Lives at the start of a run
    pub life_full: u32,
    /// Distance at which a decoy body gives itself away
    pub fake_reveal_distance: f32,
    /// Ticks between a crash and the retry (or game over)
    pub crash_delay: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            flight: FlightTuning::default(),
            docking: DockingTolerance::default(),
            score: ScoreTuning::default(),
            fuel_full: 10_000,
            life_full: 3,
            fake_reveal_distance: 300.0,
            crash_delay: 120,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let tuning: Tuning = serde_json::from_str(json).map_err(GameError::Tuning)?;
        tuning.validate()?;
        log::debug!("Loaded tuning override: {:?}", tuning);
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        let flight = &self.flight;
        if !(flight.air_resistance > 0.0 && flight.air_resistance < 1.0) {
            return Err(GameError::InvalidTuning {
                name: "flight.air_resistance",
                value: flight.air_resistance,
                expected: "0 < value < 1",
            });
        }

        let non_negative = [
            ("flight.head_radius", flight.head_radius),
            ("flight.angle_instability", flight.angle_instability),
            ("docking.max_horizontal_velocity", self.docking.max_horizontal_velocity),
            ("docking.max_vertical_velocity", self.docking.max_vertical_velocity),
            ("docking.max_angle_velocity", self.docking.max_angle_velocity),
            ("docking.max_angle", self.docking.max_angle),
            ("fake_reveal_distance", self.fake_reveal_distance),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0) {
                return Err(GameError::InvalidTuning {
                    name,
                    value,
                    expected: "value >= 0",
                });
            }
        }

        let positive = [
            ("score.position_decay", self.score.position_decay),
            ("score.angle_decay", self.score.angle_decay),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(GameError::InvalidTuning {
                    name,
                    value,
                    expected: "value > 0",
                });
            }
        }

        if self.life_full == 0 {
            return Err(GameError::InvalidTuning {
                name: "life_full",
                value: 0.0,
                expected: "value >= 1",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{"fuel_full": 500, "docking": {"max_angle": 0.3}}"#)
            .unwrap();
        assert_eq!(tuning.fuel_full, 500);
        assert_eq!(tuning.docking.max_angle, 0.3);
        assert_eq!(tuning.docking.max_vertical_velocity, 2.5);
        assert_eq!(tuning.flight, FlightTuning::default());
    }

    #[test]
    fn test_rejects_out_of_range_drag() {
        let err = Tuning::from_json(r#"{"flight": {"air_resistance": 1.5}}"#).unwrap_err();
        assert!(matches!(
            err,
            GameError::InvalidTuning {
                name: "flight.air_resistance",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_negative_tolerance() {
        let err = Tuning::from_json(r#"{"docking": {"max_angle": -1}}"#).unwrap_err();
        assert!(matches!(err, GameError::InvalidTuning { name: "docking.max_angle", .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(Tuning::from_json("{"), Err(GameError::Tuning(_))));
    }
}
