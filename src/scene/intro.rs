//! Logo intro

use glam::Vec2;

use super::{Bundle, Scene, SceneCommand, SceneId, Services};
use crate::audio::Sound;
use crate::consts::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use crate::entity::{Color, Entity, Rect, Size, Sprite};
use crate::error::GameError;
use crate::input::KeyStatus;
use crate::renderer::Surface;
use crate::script::{Fade, Run, SequentialScriptRunner, Wait};

const LOGO_SIZE: Size = Size::new(800.0, 400.0);

pub struct IntroStage {
    pub background: Rect,
    pub logo: Sprite,
    cues: Vec<Sound>,
    done: bool,
}

fn logo_color(stage: &mut IntroStage) -> &mut Color {
    &mut stage.logo.color
}

pub struct IntroScene {
    stage: IntroStage,
    runner: SequentialScriptRunner<IntroStage>,
}

impl Default for IntroScene {
    fn default() -> Self {
        Self::new()
    }
}

impl IntroScene {
    pub fn new() -> Self {
        let mut logo = Sprite::new("logo", LOGO_SIZE)
            .with_origin_center()
            .with_position(Vec2::new(VIEWPORT_WIDTH / 2.0, VIEWPORT_HEIGHT / 2.0));
        logo.color.set_a(0.0);

        let mut runner: SequentialScriptRunner<IntroStage> = SequentialScriptRunner::new();
        runner.push(|| Wait::new(50));
        runner.push(|| Fade::new(logo_color, 1.0, 30));
        runner.push(|| Run::new(|s: &mut IntroStage| s.cues.push(Sound::Logo)));
        runner.push(|| Wait::new(90));
        runner.push(|| Fade::new(logo_color, 0.0, 30));
        runner.push(|| Run::new(|s: &mut IntroStage| s.done = true));

        Self {
            stage: IntroStage {
                background: Rect::fullscreen(Color::WHITE),
                logo,
                cues: Vec::new(),
                done: false,
            },
            runner,
        }
    }

    pub fn stage(&self) -> &IntroStage {
        &self.stage
    }
}

impl Scene for IntroScene {
    fn id(&self) -> SceneId {
        SceneId::Intro
    }

    fn update(&mut self, input: &KeyStatus, services: &mut Services) -> Result<SceneCommand, GameError> {
        self.runner.update(&mut self.stage, input);
        for sound in self.stage.cues.drain(..) {
            services.audio.play(sound);
        }
        if self.stage.done {
            return Ok(SceneCommand::Change(SceneId::Title, Bundle::new()));
        }
        Ok(SceneCommand::Stay)
    }

    fn render(&self, surface: &mut dyn Surface) {
        self.stage.background.render(surface);
        self.stage.logo.render(surface);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::audio::AudioLog;
    use crate::persistence::MemoryStorage;
    use crate::tuning::Tuning;

    #[test]
    fn test_logo_sequence_then_title() {
        let log = Rc::new(RefCell::new(AudioLog::new()));
        let mut services = Services::new(Box::new(log.clone()), Box::new(MemoryStorage::new()), Tuning::default(), 3);
        let mut scene = IntroScene::new();
        let input = KeyStatus::default();

        // Wait(50) + Fade(30) + Run
        for _ in 0..(52 + 32 + 2) {
            assert_eq!(scene.update(&input, &mut services).unwrap(), SceneCommand::Stay);
        }
        assert_eq!(scene.stage().logo.color.a(), 1.0);
        assert_eq!(log.borrow().played(Sound::Logo), 1);

        let mut ticks = 0;
        let command = loop {
            ticks += 1;
            match scene.update(&input, &mut services).unwrap() {
                SceneCommand::Stay => assert!(ticks < 500),
                command => break command,
            }
        };
        assert_eq!(command, SceneCommand::Change(SceneId::Title, Bundle::new()));
        assert_eq!(scene.stage().logo.color.a(), 0.0);
        // Wait(90) + Fade(30) + Run
        assert_eq!(ticks, 92 + 32 + 2);
    }
}
