//! Title screen: high score table, last score and a press-to-start prompt

use glam::Vec2;

use super::{Bundle, Scene, SceneCommand, SceneId, Services};
use crate::audio::Sound;
use crate::consts::{BODY_SLOTS, BODY_TOP, VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use crate::entity::{Color, Entity, Label, Rect};
use crate::error::GameError;
use crate::highscores::HighScores;
use crate::input::{Key, KeyStatus};
use crate::renderer::Surface;
use crate::script::{Blink, ParallelScriptRunner};
use crate::sim::{BodyType, SeaBody};

pub struct TitleStage {
    pub background: Rect,
    pub title: Label,
    pub scores: Vec<Label>,
    pub last_score: Option<Label>,
    pub prompt: Label,
    pub lineup: Vec<SeaBody>,
}

fn prompt_color(stage: &mut TitleStage) -> &mut Color {
    &mut stage.prompt.color
}

pub struct TitleScene {
    stage: TitleStage,
    effects: ParallelScriptRunner<TitleStage>,
    /// OK must be released once before it can start a run
    armed: bool,
}

impl TitleScene {
    pub fn new(bundle: &Bundle, services: &mut Services) -> Self {
        let center = VIEWPORT_WIDTH / 2.0;
        let high_scores = HighScores::load(services.storage.as_ref());

        let scores = high_scores
            .scores()
            .iter()
            .enumerate()
            .map(|(i, score)| {
                Label::centered(
                    format!("{}. {score}", i + 1),
                    Vec2::new(center, VIEWPORT_HEIGHT * 0.36 + 56.0 * i as f32),
                    48.0,
                    Color::WHITE,
                )
            })
            .collect();
        let last_score = bundle.score().map(|score| {
            Label::centered(
                format!("Last score {score}"),
                Vec2::new(center, VIEWPORT_HEIGHT * 0.68),
                56.0,
                Color::rgb(250.0, 220.0, 90.0),
            )
        });
        // One body of each kind, standing in the middle slots
        let lineup = BodyType::ALL
            .iter()
            .zip(BODY_SLOTS.iter().skip(1))
            .map(|(&kind, &x)| SeaBody::new(Vec2::new(x - 180.0, BODY_TOP), kind, false))
            .collect();

        let stage = TitleStage {
            background: Rect::fullscreen(Color::BLACK),
            title: Label::centered("SEA DOCKING", Vec2::new(center, VIEWPORT_HEIGHT * 0.2), 160.0, Color::WHITE),
            scores,
            last_score,
            prompt: Label::centered(
                "Press Enter to start",
                Vec2::new(center, VIEWPORT_HEIGHT * 0.76),
                64.0,
                Color::WHITE,
            ),
            lineup,
        };

        let mut effects: ParallelScriptRunner<TitleStage> = ParallelScriptRunner::new();
        effects.run(Blink::new(prompt_color, 45));

        Self {
            stage,
            effects,
            armed: false,
        }
    }

    pub fn stage(&self) -> &TitleStage {
        &self.stage
    }
}

impl Scene for TitleScene {
    fn id(&self) -> SceneId {
        SceneId::Title
    }

    fn update(&mut self, input: &KeyStatus, services: &mut Services) -> Result<SceneCommand, GameError> {
        self.effects.update(&mut self.stage, input);
        for body in self.stage.lineup.iter_mut() {
            body.update(input);
        }

        let ok = input.is_pressed(Key::Ok);
        if !ok {
            self.armed = true;
        } else if self.armed {
            services.audio.play(Sound::Select);
            return Ok(SceneCommand::Change(SceneId::InGame, Bundle::new()));
        }
        Ok(SceneCommand::Stay)
    }

    fn render(&self, surface: &mut dyn Surface) {
        let stage = &self.stage;
        stage.background.render(surface);
        for body in &stage.lineup {
            body.render(surface);
        }
        stage.title.render(surface);
        for label in &stage.scores {
            label.render(surface);
        }
        if let Some(label) = &stage.last_score {
            label.render(surface);
        }
        stage.prompt.render(surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SilentAudio;
    use crate::persistence::MemoryStorage;
    use crate::renderer::CommandList;
    use crate::tuning::Tuning;

    fn services_with_scores(scores: &[u64]) -> Services {
        let mut storage = MemoryStorage::new();
        for &score in scores {
            HighScores::record(&mut storage, score);
        }
        Services::new(Box::new(SilentAudio), Box::new(storage), Tuning::default(), 11)
    }

    #[test]
    fn test_shows_table_and_last_score() {
        let mut services = services_with_scores(&[300, 900]);
        let scene = TitleScene::new(&Bundle::new().with(Bundle::SCORE, 300), &mut services);

        let mut list = CommandList::new();
        scene.render(&mut list);
        let texts = list.texts();
        assert!(texts.contains(&"1. 900"));
        assert!(texts.contains(&"2. 300"));
        assert!(texts.contains(&"5. 0"));
        assert!(texts.contains(&"Last score 300"));
        assert_eq!(scene.stage().lineup.len(), BodyType::ALL.len());
    }

    #[test]
    fn test_held_ok_must_be_released_first() {
        let mut services = services_with_scores(&[]);
        let mut scene = TitleScene::new(&Bundle::new(), &mut services);
        let ok = KeyStatus::with(&[Key::Ok]);

        assert_eq!(scene.update(&ok, &mut services).unwrap(), SceneCommand::Stay);
        assert_eq!(scene.update(&KeyStatus::default(), &mut services).unwrap(), SceneCommand::Stay);
        assert_eq!(
            scene.update(&ok, &mut services).unwrap(),
            SceneCommand::Change(SceneId::InGame, Bundle::new())
        );
    }
}
