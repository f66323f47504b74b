//! Error types for configuration and programmer mistakes.
//!
//! Only construction-time failures live here. Missing assets are logged and
//! tolerated, and impossible flight input (thrust without fuel) is ignored.

use std::fmt;

#[derive(Debug)]
pub enum GameError {
    /// A level index outside `1..=max` was requested.
    UnknownLevel { level: u32, max: u32 },
    /// A scene name that does not map to any `SceneId`.
    UnknownScene(String),
    /// Tuning JSON could not be parsed.
    Tuning(serde_json::Error),
    /// Settings JSON could not be parsed.
    Settings(serde_json::Error),
    /// A tuning value is outside its valid range.
    InvalidTuning {
        name: &'static str,
        value: f32,
        expected: &'static str,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownLevel { level, max } => {
                write!(f, "level {level} is invalid (expected 1..={max})")
            }
            Self::UnknownScene(name) => write!(f, "scene {name:?} is invalid"),
            Self::Tuning(e) => write!(f, "failed to parse tuning: {e}"),
            Self::Settings(e) => write!(f, "failed to parse settings: {e}"),
            Self::InvalidTuning {
                name,
                value,
                expected,
            } => write!(f, "tuning value {name} = {value} is out of range ({expected})"),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Tuning(e) | Self::Settings(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_unknown_level() {
        let err = GameError::UnknownLevel { level: 9, max: 5 };
        assert_eq!(err.to_string(), "level 9 is invalid (expected 1..=5)");
    }

    #[test]
    fn test_source_for_parse_errors() {
        let parse = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = GameError::Tuning(parse);
        assert!(std::error::Error::source(&err).is_some());
        assert!(std::error::Error::source(&GameError::UnknownScene("x".into())).is_none());
    }
}
