//! Final score reveal at the end of a run

use glam::Vec2;

use crate::consts::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use crate::entity::{Color, Entity, Label, Rect};
use crate::input::{Key, KeyStatus};
use crate::renderer::Surface;
use crate::script::{
    Blink, CountUp, Fade, ParallelScriptRunner, Run, Script, SequentialScriptRunner, Wait,
    WaitForKey,
};

/// Longest count-up of the final score, in ticks
pub const COUNT_UP_CAP: u32 = 130;

pub struct GameOverWidgets {
    pub backdrop: Rect,
    pub title: Label,
    pub score: Label,
    /// High score rank, empty when the run did not place
    pub rank: Label,
    pub prompt: Label,
    pub fade: Rect,
    closed: bool,
    spawned: Vec<Box<dyn Script<GameOverWidgets>>>,
}

fn score_label(w: &mut GameOverWidgets) -> &mut Label {
    &mut w.score
}

fn prompt_color(w: &mut GameOverWidgets) -> &mut Color {
    &mut w.prompt.color
}

fn fade_color(w: &mut GameOverWidgets) -> &mut Color {
    &mut w.fade.color
}

pub struct GameOverScreen {
    final_score: u64,
    widgets: GameOverWidgets,
    runner: SequentialScriptRunner<GameOverWidgets>,
    effects: ParallelScriptRunner<GameOverWidgets>,
    invalidated: bool,
}

impl GameOverScreen {
    pub fn new(final_score: u64, rank: Option<usize>) -> Self {
        let center = |y: f32| Vec2::new(VIEWPORT_WIDTH / 2.0, VIEWPORT_HEIGHT * y);
        let rank_text = rank
            .map(|r| format!("New high score! #{r}"))
            .unwrap_or_default();

        let widgets = GameOverWidgets {
            backdrop: Rect::fullscreen(Color::rgba(0.0, 0.0, 0.0, 0.15)),
            title: Label::centered("Game Over", center(0.3), 230.0, Color::rgb(70.0, 0.0, 130.0)),
            score: Label::centered("", center(0.49), 120.0, Color::TRANSPARENT),
            rank: Label::centered(rank_text, center(0.56), 60.0, Color::TRANSPARENT),
            prompt: Label::centered(
                "Press Enter to return to the title...",
                center(0.65),
                70.0,
                Color::TRANSPARENT,
            ),
            fade: Rect::fullscreen(Color::TRANSPARENT),
            closed: false,
            spawned: Vec::new(),
        };

        let mut runner: SequentialScriptRunner<GameOverWidgets> = SequentialScriptRunner::new();
        runner.push(|| Wait::new(50));
        runner.push(|| Run::new(|w: &mut GameOverWidgets| w.score.color.set_a(1.0)));
        runner.push(move || CountUp::new(score_label, "Final score", final_score, COUNT_UP_CAP));
        runner.push(|| Run::new(|w: &mut GameOverWidgets| w.rank.color.set_a(1.0)));
        runner.push(|| Wait::new(50));
        runner.push(|| {
            Run::new(|w: &mut GameOverWidgets| {
                w.prompt.color.set_a(1.0);
                w.spawned.push(Box::new(Blink::new(prompt_color, 60)));
            })
        });
        runner.push(|| WaitForKey::new(Key::Ok));
        runner.push(|| Run::new(|w: &mut GameOverWidgets| w.prompt.visible = false));
        runner.push(|| Fade::new(fade_color, 1.0, 30));
        runner.push(|| Wait::new(30));
        runner.push(|| Run::new(|w: &mut GameOverWidgets| w.closed = true));

        Self {
            final_score,
            widgets,
            runner,
            effects: ParallelScriptRunner::new(),
            invalidated: false,
        }
    }

    pub fn final_score(&self) -> u64 {
        self.final_score
    }

    pub fn widgets(&self) -> &GameOverWidgets {
        &self.widgets
    }

    pub fn is_prompting(&self) -> bool {
        self.widgets.prompt.visible && !self.effects.is_empty()
    }
}

impl Entity for GameOverScreen {
    fn update(&mut self, input: &KeyStatus) {
        if self.invalidated {
            return;
        }
        self.runner.update(&mut self.widgets, input);
        for script in self.widgets.spawned.drain(..) {
            self.effects.run_boxed(script);
        }
        self.effects.update(&mut self.widgets, input);

        if self.widgets.closed {
            self.invalidate();
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        let w = &self.widgets;
        w.backdrop.render(surface);
        for label in [&w.title, &w.score, &w.rank, &w.prompt] {
            label.render(surface);
        }
        w.fade.render(surface);
    }

    fn invalidated(&self) -> bool {
        self.invalidated
    }

    fn invalidate(&mut self) {
        self.invalidated = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(screen: &mut GameOverScreen, input: &KeyStatus, ticks: u32) {
        for _ in 0..ticks {
            screen.update(input);
        }
    }

    #[test]
    fn test_large_score_counts_up_within_cap() {
        let mut screen = GameOverScreen::new(1_000_000, Some(1));
        // Wait 50 + reveal + capped count-up, one start tick each
        run(&mut screen, &KeyStatus::default(), 52 + 2 + COUNT_UP_CAP + 1);
        assert_eq!(screen.widgets().score.text, "Final score: 1000000");
        assert_eq!(screen.widgets().rank.text, "New high score! #1");
    }

    #[test]
    fn test_zero_score_still_reaches_prompt() {
        let mut screen = GameOverScreen::new(0, None);
        run(&mut screen, &KeyStatus::default(), 150);
        assert!(screen.is_prompting());
        assert_eq!(screen.widgets().score.text, "Final score: 0");
        assert!(screen.widgets().rank.text.is_empty());
    }

    #[test]
    fn test_closes_after_ok_fade_and_wait() {
        let mut screen = GameOverScreen::new(420, None);
        let idle = KeyStatus::default();
        run(&mut screen, &idle, 300);
        assert!(!screen.invalidated());

        run(&mut screen, &KeyStatus::with(&[Key::Ok]), 1);
        run(&mut screen, &idle, 60);
        assert!(!screen.invalidated());
        run(&mut screen, &idle, 10);
        assert!(screen.invalidated());
        assert_eq!(screen.final_score(), 420);
    }
}
