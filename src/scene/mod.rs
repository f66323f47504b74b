//! Scenes and the manager that switches between them
//!
//! A scene owns everything on screen while it is active. It never switches
//! scenes itself: `update` returns a [`SceneCommand`] and the manager acts on
//! it after the tick, so the outgoing scene is never borrowed while the
//! incoming one is built.

pub mod in_game;
pub mod intro;
pub mod title;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::audio::AudioSink;
use crate::error::GameError;
use crate::input::KeyStatus;
use crate::persistence::Storage;
use crate::renderer::Surface;
use crate::settings::Settings;
use crate::tuning::Tuning;

pub use in_game::InGameScene;
pub use intro::IntroScene;
pub use title::TitleScene;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneId {
    Intro,
    Title,
    InGame,
}

impl SceneId {
    pub fn as_str(&self) -> &'static str {
        match self {
            SceneId::Intro => "intro",
            SceneId::Title => "title",
            SceneId::InGame => "in_game",
        }
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SceneId {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "intro" => Ok(SceneId::Intro),
            "title" => Ok(SceneId::Title),
            "in_game" | "ingame" => Ok(SceneId::InGame),
            _ => Err(GameError::UnknownScene(s.to_string())),
        }
    }
}

/// Values carried from one scene to the next
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bundle {
    values: HashMap<String, u64>,
}

impl Bundle {
    pub const SCORE: &'static str = "score";
    pub const LEVEL: &'static str = "level";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: u64) -> Self {
        self.values.insert(key.to_string(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<u64> {
        self.values.get(key).copied()
    }

    pub fn score(&self) -> Option<u64> {
        self.get(Self::SCORE)
    }
}

/// What the active scene asks for after a tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneCommand {
    Stay,
    Change(SceneId, Bundle),
}

/// Capabilities handed to scenes
pub struct Services {
    pub audio: Box<dyn AudioSink>,
    pub storage: Box<dyn Storage>,
    pub settings: Settings,
    pub tuning: Tuning,
    /// Base seed for every RNG a scene creates
    pub seed: u64,
}

impl Services {
    pub fn new(audio: Box<dyn AudioSink>, storage: Box<dyn Storage>, tuning: Tuning, seed: u64) -> Self {
        let settings = Settings::load(storage.as_ref());
        let mut services = Self {
            audio,
            storage,
            settings,
            tuning,
            seed,
        };
        services.audio.apply_settings(&services.settings);
        services
    }

    /// Fresh seed for the next scene so replays of a run differ per scene
    pub fn next_seed(&mut self) -> u64 {
        self.seed = self.seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        self.seed
    }
}

pub trait Scene {
    fn id(&self) -> SceneId;

    fn update(&mut self, input: &KeyStatus, services: &mut Services) -> Result<SceneCommand, GameError>;

    fn render(&self, surface: &mut dyn Surface);
}

/// Build a scene by id
pub fn create_scene(id: SceneId, bundle: &Bundle, services: &mut Services) -> Result<Box<dyn Scene>, GameError> {
    let scene: Box<dyn Scene> = match id {
        SceneId::Intro => Box::new(IntroScene::new()),
        SceneId::Title => Box::new(TitleScene::new(bundle, services)),
        SceneId::InGame => Box::new(InGameScene::new(bundle, services)?),
    };
    log::info!("Start {id} scene");
    Ok(scene)
}

pub struct SceneManager {
    current: Box<dyn Scene>,
}

impl SceneManager {
    pub fn new(id: SceneId, bundle: &Bundle, services: &mut Services) -> Result<Self, GameError> {
        Ok(Self {
            current: create_scene(id, bundle, services)?,
        })
    }

    pub fn current_id(&self) -> SceneId {
        self.current.id()
    }

    pub fn change_scene(&mut self, id: SceneId, bundle: &Bundle, services: &mut Services) -> Result<(), GameError> {
        log::info!("Change scene {} -> {id}", self.current.id());
        self.current = create_scene(id, bundle, services)?;
        Ok(())
    }

    pub fn update(&mut self, input: &KeyStatus, services: &mut Services) -> Result<(), GameError> {
        match self.current.update(input, services)? {
            SceneCommand::Stay => Ok(()),
            SceneCommand::Change(id, bundle) => self.change_scene(id, &bundle, services),
        }
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        self.current.render(surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SilentAudio;
    use crate::persistence::MemoryStorage;

    fn services() -> Services {
        Services::new(Box::new(SilentAudio), Box::new(MemoryStorage::new()), Tuning::default(), 1)
    }

    #[test]
    fn test_scene_id_parse() {
        assert_eq!("Title".parse::<SceneId>().unwrap(), SceneId::Title);
        assert_eq!("in_game".parse::<SceneId>().unwrap(), SceneId::InGame);
        assert!(matches!("lobby".parse::<SceneId>(), Err(GameError::UnknownScene(name)) if name == "lobby"));
    }

    #[test]
    fn test_bundle_carries_score() {
        let bundle = Bundle::new().with(Bundle::SCORE, 1200);
        assert_eq!(bundle.score(), Some(1200));
        assert_eq!(Bundle::new().score(), None);
    }

    #[test]
    fn test_in_game_with_unknown_level_fails_construction() {
        let mut services = services();
        let bundle = Bundle::new().with(Bundle::LEVEL, 9);
        let err = SceneManager::new(SceneId::InGame, &bundle, &mut services).err();
        assert!(matches!(err, Some(GameError::UnknownLevel { level: 9, .. })));
    }

    #[test]
    fn test_manager_changes_scene() {
        let mut services = services();
        let mut manager = SceneManager::new(SceneId::Title, &Bundle::new(), &mut services).unwrap();
        manager
            .change_scene(SceneId::InGame, &Bundle::new(), &mut services)
            .unwrap();
        assert_eq!(manager.current_id(), SceneId::InGame);
    }
}
