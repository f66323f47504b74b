//! Reusable scripts
//!
//! Scripts reach the value they animate through a [`Lens`], a plain field
//! accessor on the runner's context. Values that depend on the target's
//! current state (fade step, travel step, wave origin) are captured on the
//! script's first step, not when it is built.

use std::f32::consts::TAU;

use glam::Vec2;

use super::Script;
use crate::entity::{Color, Label};
use crate::input::{Key, KeyStatus};

/// Field accessor used by scripts to reach their target
pub type Lens<C, T> = fn(&mut C) -> &mut T;

/// Does nothing for `ticks` steps, finishing on the step after
#[derive(Debug, Clone)]
pub struct Wait {
    remain: i64,
    done: bool,
}

impl Wait {
    pub fn new(ticks: u32) -> Self {
        Self {
            remain: ticks as i64,
            done: false,
        }
    }
}

impl<C> Script<C> for Wait {
    fn update(&mut self, _ctx: &mut C, _input: &KeyStatus) {
        self.remain -= 1;
        if self.remain < 0 {
            self.done = true;
        }
    }

    fn finished(&self) -> bool {
        self.done
    }
}

/// Runs an action once
pub struct Run<C> {
    action: Option<Box<dyn FnOnce(&mut C)>>,
}

impl<C> Run<C> {
    pub fn new(action: impl FnOnce(&mut C) + 'static) -> Self {
        Self {
            action: Some(Box::new(action)),
        }
    }
}

impl<C> Script<C> for Run<C> {
    fn update(&mut self, ctx: &mut C, _input: &KeyStatus) {
        if let Some(action) = self.action.take() {
            action(ctx);
        }
    }

    fn finished(&self) -> bool {
        self.action.is_none()
    }
}

/// Moves a color's alpha linearly to `end_alpha`
pub struct Fade<C> {
    target: Lens<C, Color>,
    end_alpha: f32,
    duration: u32,
    remain: i64,
    delta: Option<f32>,
    done: bool,
}

impl<C> Fade<C> {
    pub fn new(target: Lens<C, Color>, end_alpha: f32, duration: u32) -> Self {
        Self {
            target,
            end_alpha,
            duration,
            remain: duration as i64,
            delta: None,
            done: false,
        }
    }
}

impl<C> Script<C> for Fade<C> {
    fn update(&mut self, ctx: &mut C, _input: &KeyStatus) {
        if self.done {
            return;
        }
        let color = (self.target)(ctx);
        let delta = match self.delta {
            Some(delta) => delta,
            None => {
                let delta = (self.end_alpha - color.a()) / self.duration.max(1) as f32;
                self.delta = Some(delta);
                delta
            }
        };

        self.remain -= 1;
        if self.remain < 0 {
            color.set_a(self.end_alpha);
            self.done = true;
        } else {
            color.set_a(color.a() + delta);
        }
    }

    fn finished(&self) -> bool {
        self.done
    }
}

/// Moves a position linearly to a target
pub struct Transition<C> {
    target: Lens<C, Vec2>,
    destination: Vec2,
    duration: u32,
    remain: i64,
    step: Option<Vec2>,
    done: bool,
}

impl<C> Transition<C> {
    pub fn new(target: Lens<C, Vec2>, destination: Vec2, duration: u32) -> Self {
        Self {
            target,
            destination,
            duration,
            remain: duration as i64,
            step: None,
            done: false,
        }
    }
}

impl<C> Script<C> for Transition<C> {
    fn update(&mut self, ctx: &mut C, _input: &KeyStatus) {
        if self.done {
            return;
        }
        let position = (self.target)(ctx);
        let step = *self
            .step
            .get_or_insert((self.destination - *position) / self.duration.max(1) as f32);

        self.remain -= 1;
        if self.remain < 0 {
            *position = self.destination;
            self.done = true;
        } else {
            *position += step;
        }
    }

    fn finished(&self) -> bool {
        self.done
    }
}

/// Shakes a position along a sine wave around where it started
pub struct WaveTransition<C> {
    target: Lens<C, Vec2>,
    amplitude: Vec2,
    cycle: u32,
    /// `None` loops forever
    loops: Option<u32>,
    remain_cycle: i64,
    origin: Option<Vec2>,
    done: bool,
}

impl<C> WaveTransition<C> {
    pub fn new(target: Lens<C, Vec2>, amplitude: Vec2, cycle: u32, loops: Option<u32>) -> Self {
        Self {
            target,
            amplitude,
            cycle: cycle.max(1),
            loops,
            remain_cycle: cycle.max(1) as i64,
            origin: None,
            done: false,
        }
    }
}

impl<C> Script<C> for WaveTransition<C> {
    fn update(&mut self, ctx: &mut C, _input: &KeyStatus) {
        if self.done {
            return;
        }
        let position = (self.target)(ctx);
        let origin = *self.origin.get_or_insert(*position);

        self.remain_cycle -= 1;
        if self.remain_cycle < 0 {
            self.remain_cycle = self.cycle as i64;
            if let Some(loops) = self.loops.as_mut() {
                *loops = loops.saturating_sub(1);
                if *loops == 0 {
                    *position = origin;
                    self.done = true;
                }
            }
        } else {
            let phase = self.remain_cycle as f32 / self.cycle as f32 * TAU;
            *position = origin + self.amplitude * phase.sin();
        }
    }

    fn finished(&self) -> bool {
        self.done
    }

    fn is_infinite(&self) -> bool {
        self.loops.is_none()
    }
}

/// Toggles a color between its starting alpha and transparent, forever
pub struct Blink<C> {
    target: Lens<C, Color>,
    duration: u32,
    remain: i64,
    initial_alpha: Option<f32>,
}

impl<C> Blink<C> {
    pub fn new(target: Lens<C, Color>, duration: u32) -> Self {
        Self {
            target,
            duration,
            remain: duration as i64,
            initial_alpha: None,
        }
    }
}

impl<C> Script<C> for Blink<C> {
    fn update(&mut self, ctx: &mut C, _input: &KeyStatus) {
        let color = (self.target)(ctx);
        let initial = *self.initial_alpha.get_or_insert(color.a());

        self.remain -= 1;
        if self.remain < 0 {
            self.remain = self.duration as i64;
            let next = if color.a() == 0.0 { initial } else { 0.0 };
            color.set_a(next);
        }
    }

    fn finished(&self) -> bool {
        false
    }

    fn is_infinite(&self) -> bool {
        true
    }
}

/// Counts a label's number up from 0 to `value`.
///
/// Runs for `min(cap, value)` steps so huge values still finish quickly.
pub struct CountUp<C> {
    target: Lens<C, Label>,
    prefix: &'static str,
    value: u64,
    duration: u32,
    elapsed: u32,
    done: bool,
}

impl<C> CountUp<C> {
    pub fn new(target: Lens<C, Label>, prefix: &'static str, value: u64, cap: u32) -> Self {
        Self {
            target,
            prefix,
            value,
            duration: (cap as u64).min(value) as u32,
            elapsed: 0,
            done: false,
        }
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// Number shown after `elapsed` steps
    pub fn displayed(&self, elapsed: u32) -> u64 {
        if self.duration == 0 {
            return self.value;
        }
        let elapsed = elapsed.min(self.duration) as u128;
        (self.value as u128 * elapsed / self.duration as u128) as u64
    }
}

impl<C> Script<C> for CountUp<C> {
    fn update(&mut self, ctx: &mut C, _input: &KeyStatus) {
        if self.done {
            return;
        }
        self.elapsed += 1;
        let shown = self.displayed(self.elapsed);
        (self.target)(ctx).text = format!("{}: {}", self.prefix, shown);
        if self.elapsed >= self.duration {
            self.done = true;
        }
    }

    fn finished(&self) -> bool {
        self.done
    }
}

/// Finishes on the first step where `key` is held
#[derive(Debug, Clone)]
pub struct WaitForKey {
    key: Key,
    done: bool,
}

impl WaitForKey {
    pub fn new(key: Key) -> Self {
        Self { key, done: false }
    }
}

impl<C> Script<C> for WaitForKey {
    fn update(&mut self, _ctx: &mut C, input: &KeyStatus) {
        if input.is_pressed(self.key) {
            self.done = true;
        }
    }

    fn finished(&self) -> bool {
        self.done
    }
}
