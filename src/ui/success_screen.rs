//! Score breakdown after a successful docking
//!
//! The whole reveal is queued up front: each step is a script built only when
//! the previous one finishes. Closing takes an OK press followed by a fade.

use glam::Vec2;

use crate::consts::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use crate::entity::{Color, Entity, Label, Rect};
use crate::input::{Key, KeyStatus};
use crate::renderer::Surface;
use crate::script::{
    Blink, CountUp, Fade, ParallelScriptRunner, Run, Script, SequentialScriptRunner, Wait,
    WaitForKey,
};
use crate::sim::ScoreCalculator;

/// Longest count-up per component, in ticks
pub const COUNT_UP_CAP: u32 = 40;

/// Widgets the reveal scripts act on
pub struct SuccessWidgets {
    pub title: Label,
    pub fuel: Label,
    pub position: Label,
    pub angle: Label,
    pub total: Label,
    pub prompt: Label,
    pub fade: Rect,
    closed: bool,
    spawned: Vec<Box<dyn Script<SuccessWidgets>>>,
}

fn fuel(w: &mut SuccessWidgets) -> &mut Label {
    &mut w.fuel
}

fn position(w: &mut SuccessWidgets) -> &mut Label {
    &mut w.position
}

fn angle(w: &mut SuccessWidgets) -> &mut Label {
    &mut w.angle
}

fn prompt_color(w: &mut SuccessWidgets) -> &mut Color {
    &mut w.prompt.color
}

fn fade_color(w: &mut SuccessWidgets) -> &mut Color {
    &mut w.fade.color
}

fn hidden_line(y: f32, size: f32) -> Label {
    Label::centered("", Vec2::new(VIEWPORT_WIDTH / 2.0, VIEWPORT_HEIGHT * y), size, Color::TRANSPARENT)
}

pub struct SuccessScreen {
    widgets: SuccessWidgets,
    runner: SequentialScriptRunner<SuccessWidgets>,
    effects: ParallelScriptRunner<SuccessWidgets>,
    invalidated: bool,
}

impl SuccessScreen {
    pub fn new(score: ScoreCalculator) -> Self {
        let mut total = hidden_line(0.62, 120.0);
        total.text = format!("Total {}", score.total_score());
        let mut prompt = hidden_line(0.75, 70.0);
        prompt.text = "Press Enter to continue...".to_string();

        let widgets = SuccessWidgets {
            title: Label::centered(
                "Docked!",
                Vec2::new(VIEWPORT_WIDTH / 2.0, VIEWPORT_HEIGHT * 0.22),
                230.0,
                Color::rgb(110.0, 30.0, 170.0),
            ),
            fuel: hidden_line(0.37, 90.0),
            position: hidden_line(0.45, 90.0),
            angle: hidden_line(0.53, 90.0),
            total,
            prompt,
            fade: Rect::fullscreen(Color::TRANSPARENT),
            closed: false,
            spawned: Vec::new(),
        };

        let mut runner: SequentialScriptRunner<SuccessWidgets> = SequentialScriptRunner::new();
        runner.push(|| Wait::new(50));
        runner.push(|| Run::new(|w: &mut SuccessWidgets| w.fuel.color.set_a(1.0)));
        runner.push(move || CountUp::new(fuel, "Fuel", score.fuel_score as u64, COUNT_UP_CAP));
        runner.push(|| Wait::new(30));
        runner.push(|| Run::new(|w: &mut SuccessWidgets| w.position.color.set_a(1.0)));
        runner.push(move || {
            CountUp::new(position, "Position", score.position_score as u64, COUNT_UP_CAP)
        });
        runner.push(|| Wait::new(30));
        runner.push(|| Run::new(|w: &mut SuccessWidgets| w.angle.color.set_a(1.0)));
        runner.push(move || CountUp::new(angle, "Angle", score.angle_score as u64, COUNT_UP_CAP));
        runner.push(|| Wait::new(50));
        runner.push(|| Run::new(|w: &mut SuccessWidgets| w.total.color.set_a(1.0)));
        runner.push(|| Wait::new(50));
        runner.push(|| {
            Run::new(|w: &mut SuccessWidgets| {
                w.prompt.color.set_a(1.0);
                w.spawned.push(Box::new(Blink::new(prompt_color, 60)));
            })
        });
        runner.push(|| WaitForKey::new(Key::Ok));
        runner.push(|| Run::new(|w: &mut SuccessWidgets| w.prompt.visible = false));
        runner.push(|| Fade::new(fade_color, 1.0, 30));
        runner.push(|| Run::new(|w: &mut SuccessWidgets| w.closed = true));

        Self {
            widgets,
            runner,
            effects: ParallelScriptRunner::new(),
            invalidated: false,
        }
    }

    pub fn widgets(&self) -> &SuccessWidgets {
        &self.widgets
    }

    /// Waiting for the player to press OK
    pub fn is_prompting(&self) -> bool {
        self.widgets.prompt.visible && !self.effects.is_empty()
    }
}

impl Entity for SuccessScreen {
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
        for label in [&w.title, &w.fuel, &w.position, &w.angle, &w.total, &w.prompt] {
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

    fn run(screen: &mut SuccessScreen, input: &KeyStatus, ticks: u32) {
        for _ in 0..ticks {
            screen.update(input);
        }
    }

    fn score() -> ScoreCalculator {
        ScoreCalculator {
            fuel_score: 9000,
            position_score: 250,
            angle_score: 3,
        }
    }

    #[test]
    fn test_reveals_components_in_order() {
        let mut screen = SuccessScreen::new(score());
        let idle = KeyStatus::default();

        run(&mut screen, &idle, 60);
        assert_eq!(screen.widgets().fuel.color.a(), 1.0);
        assert_eq!(screen.widgets().position.color.a(), 0.0);

        run(&mut screen, &idle, 220);
        let w = screen.widgets();
        assert_eq!(w.fuel.text, "Fuel: 9000");
        assert_eq!(w.position.text, "Position: 250");
        assert_eq!(w.angle.text, "Angle: 3");
        assert_eq!(w.total.color.a(), 1.0);
    }

    #[test]
    fn test_waits_for_ok_then_fades_and_closes() {
        let mut screen = SuccessScreen::new(score());
        let idle = KeyStatus::default();
        run(&mut screen, &idle, 400);
        assert!(screen.is_prompting());
        assert!(!screen.invalidated());

        run(&mut screen, &KeyStatus::with(&[Key::Ok]), 1);
        run(&mut screen, &idle, 40);
        assert!(!screen.widgets().prompt.visible);
        assert!(screen.invalidated());
        assert_eq!(screen.widgets().fade.color.a(), 1.0);
    }

    #[test]
    fn test_ok_before_prompt_is_ignored() {
        let mut screen = SuccessScreen::new(score());
        run(&mut screen, &KeyStatus::with(&[Key::Ok]), 20);
        run(&mut screen, &KeyStatus::default(), 400);
        assert!(!screen.invalidated());
        assert!(screen.widgets().prompt.visible);
    }
}
