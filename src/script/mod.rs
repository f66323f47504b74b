//! Tick-driven scripts
//!
//! A script is a small piece of behavior that spans several ticks by keeping
//! its own state between calls. Nothing here blocks or yields: a script is
//! stepped once per tick by exactly one runner until it reports `finished`.
//!
//! Scripts act on a context `C` owned by whoever owns the runner (a screen's
//! widget state, a scene's world, ...). Keeping the runner and the context as
//! sibling fields lets the owner lend the context mutably while the runner
//! steps.

pub mod common;

use std::collections::VecDeque;

use crate::input::KeyStatus;

pub use common::{Blink, CountUp, Fade, Lens, Run, Transition, Wait, WaitForKey, WaveTransition};

/// A unit of multi-tick behavior
pub trait Script<C> {
    /// Advance one tick
    fn update(&mut self, ctx: &mut C, input: &KeyStatus);

    /// Once true, stays true
    fn finished(&self) -> bool;

    /// Hint that the script never finishes on its own
    fn is_infinite(&self) -> bool {
        false
    }
}

type ScriptFactory<C> = Box<dyn FnOnce() -> Box<dyn Script<C>>>;

/// Runs queued scripts one after another.
///
/// Scripts are pushed as factories and only built when they reach the head of
/// the queue, so a script observes the state at the moment it starts. The tick
/// that builds a script does not step it; its first step is the next tick.
pub struct SequentialScriptRunner<C> {
    queue: VecDeque<ScriptFactory<C>>,
    current: Option<Box<dyn Script<C>>>,
    on_all_finished: Option<Box<dyn FnMut(&mut C)>>,
    /// Set once a script finished since the queue last drained
    pending_drain: bool,
}

impl<C> Default for SequentialScriptRunner<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> SequentialScriptRunner<C> {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            current: None,
            on_all_finished: None,
            pending_drain: false,
        }
    }

    /// Enqueue a script builder (FIFO)
    pub fn push<S, F>(&mut self, factory: F)
    where
        C: 'static,
        S: Script<C> + 'static,
        F: FnOnce() -> S + 'static,
    {
        self.queue
            .push_back(Box::new(move || Box::new(factory()) as Box<dyn Script<C>>));
    }

    /// Called once every time the queue runs dry after running something
    pub fn set_on_all_finished(&mut self, callback: impl FnMut(&mut C) + 'static) {
        self.on_all_finished = Some(Box::new(callback));
    }

    pub fn update(&mut self, ctx: &mut C, input: &KeyStatus) {
        if let Some(script) = self.current.as_mut() {
            script.update(ctx, input);
            if script.finished() {
                self.current = None;
                self.pending_drain = true;
            }
        } else if let Some(factory) = self.queue.pop_front() {
            self.current = Some(factory());
        } else if self.pending_drain {
            self.pending_drain = false;
            if let Some(callback) = self.on_all_finished.as_mut() {
                callback(ctx);
            }
        }
    }

    /// Nothing running and nothing queued
    pub fn is_idle(&self) -> bool {
        self.current.is_none() && self.queue.is_empty()
    }

    pub fn is_running(&self) -> bool {
        self.current.is_some()
    }
}

/// Runs a set of scripts side by side, in insertion order.
///
/// Within a tick, later scripts see the effects of earlier ones; that order is
/// the only ordering guarantee.
pub struct ParallelScriptRunner<C> {
    scripts: Vec<Box<dyn Script<C>>>,
}

impl<C> Default for ParallelScriptRunner<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> ParallelScriptRunner<C> {
    pub fn new() -> Self {
        Self {
            scripts: Vec::new(),
        }
    }

    pub fn run<S: Script<C> + 'static>(&mut self, script: S) {
        self.scripts.push(Box::new(script));
    }

    pub fn run_boxed(&mut self, script: Box<dyn Script<C>>) {
        self.scripts.push(script);
    }

    pub fn update(&mut self, ctx: &mut C, input: &KeyStatus) {
        for script in self.scripts.iter_mut() {
            script.update(ctx, input);
        }
        self.scripts.retain(|s| !s.finished());
    }

    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test context: a log of which script stepped on which tick
    #[derive(Default)]
    struct Log {
        tick: u32,
        steps: Vec<(&'static str, u32)>,
        drained: u32,
    }

    /// Finishes after `steps` updates
    struct Counted {
        name: &'static str,
        steps: u32,
        done: bool,
    }

    impl Counted {
        fn new(name: &'static str, steps: u32) -> Self {
            Self {
                name,
                steps,
                done: false,
            }
        }
    }

    impl Script<Log> for Counted {
        fn update(&mut self, ctx: &mut Log, _input: &KeyStatus) {
            ctx.steps.push((self.name, ctx.tick));
            self.steps -= 1;
            if self.steps == 0 {
                self.done = true;
            }
        }

        fn finished(&self) -> bool {
            self.done
        }
    }

    fn tick_sequential(runner: &mut SequentialScriptRunner<Log>, log: &mut Log, ticks: u32) {
        for _ in 0..ticks {
            log.tick += 1;
            runner.update(log, &KeyStatus::default());
        }
    }

    #[test]
    fn test_sequential_first_step_is_deferred() {
        let mut runner = SequentialScriptRunner::new();
        let mut log = Log::default();
        runner.push(|| Counted::new("a", 1));

        tick_sequential(&mut runner, &mut log, 1);
        assert!(runner.is_running());
        assert!(log.steps.is_empty());

        tick_sequential(&mut runner, &mut log, 1);
        assert_eq!(log.steps, vec![("a", 2)]);
        assert!(runner.is_idle());
    }

    #[test]
    fn test_sequential_runs_in_order_with_one_start_tick_each() {
        let mut runner = SequentialScriptRunner::new();
        let mut log = Log::default();
        runner.push(|| Counted::new("a", 2));
        runner.push(|| Counted::new("b", 3));

        // d1 + d2 steps plus one start tick per script
        tick_sequential(&mut runner, &mut log, 2 + 3 + 2);
        assert_eq!(
            log.steps,
            vec![("a", 2), ("a", 3), ("b", 5), ("b", 6), ("b", 7)]
        );
        assert!(runner.is_idle());
    }

    #[test]
    fn test_sequential_factory_is_lazy() {
        use std::cell::Cell;
        use std::rc::Rc;

        let built = Rc::new(Cell::new(0));
        let mut runner = SequentialScriptRunner::new();
        let mut log = Log::default();

        runner.push(|| Counted::new("a", 1));
        let counter = built.clone();
        runner.push(move || {
            counter.set(counter.get() + 1);
            Counted::new("b", 1)
        });
        assert_eq!(built.get(), 0);

        tick_sequential(&mut runner, &mut log, 2);
        assert_eq!(built.get(), 0);
        tick_sequential(&mut runner, &mut log, 1);
        assert_eq!(built.get(), 1);
    }

    #[test]
    fn test_sequential_empty_update_is_noop() {
        let mut runner: SequentialScriptRunner<Log> = SequentialScriptRunner::new();
        let mut log = Log::default();
        tick_sequential(&mut runner, &mut log, 5);
        assert!(log.steps.is_empty());
        assert!(runner.is_idle());
    }

    #[test]
    fn test_all_finished_callback_fires_once_per_drain() {
        let mut runner = SequentialScriptRunner::new();
        runner.set_on_all_finished(|log: &mut Log| log.drained += 1);
        let mut log = Log::default();

        tick_sequential(&mut runner, &mut log, 3);
        assert_eq!(log.drained, 0);

        runner.push(|| Counted::new("a", 1));
        tick_sequential(&mut runner, &mut log, 10);
        assert_eq!(log.drained, 1);

        runner.push(|| Counted::new("b", 1));
        tick_sequential(&mut runner, &mut log, 10);
        assert_eq!(log.drained, 2);
    }

    #[test]
    fn test_parallel_steps_all_and_drops_finished() {
        let mut runner = ParallelScriptRunner::new();
        let mut log = Log::default();
        runner.run(Counted::new("short", 1));
        runner.run(Counted::new("long", 3));
        assert_eq!(runner.len(), 2);

        log.tick = 1;
        runner.update(&mut log, &KeyStatus::default());
        assert_eq!(log.steps, vec![("short", 1), ("long", 1)]);
        assert_eq!(runner.len(), 1);

        for t in 2..=3 {
            log.tick = t;
            runner.update(&mut log, &KeyStatus::default());
        }
        assert!(runner.is_empty());
        assert_eq!(log.steps.len(), 4);
    }
}
