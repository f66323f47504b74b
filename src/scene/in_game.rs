//! The play field: one run from level 1 until the lives or the levels run out
//!
//! Each tick of an attempt flies the head, steps every actor, reveals decoys
//! the head gets close to and then resolves contact in a fixed order: the
//! real body's docking point, the ground, enemies, falling off the bottom.
//! A crash waits `crash_delay` ticks before retrying (or ending the run); a
//! docking shows the score breakdown before the next level.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::{Bundle, Scene, SceneCommand, SceneId, Services};
use crate::audio::Sound;
use crate::consts::{HEAD_SPAWN, LEVEL_MAX};
use crate::entity::particle::ParticleConfig;
use crate::entity::{
    Color, CrashEffect, Entity, FogEffect, ParticleGenerator, Size, Sprite, SuccessEffect,
    retain_valid,
};
use crate::error::GameError;
use crate::highscores::HighScores;
use crate::input::KeyStatus;
use crate::renderer::Surface;
use crate::script::{ParallelScriptRunner, Run, SequentialScriptRunner, Wait, WaveTransition};
use crate::sim::{
    Collider, DockingCriteria, EnemyBody, EnemyHead, PlayerStatus, ScoreCalculator, SeaBody,
    SeaHead, generate_level, render_collider,
};
use crate::tuning::Tuning;
use crate::ui::{GameOverScreen, Hud, SuccessScreen};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrashReason {
    Ground,
    /// Hit an enemy or a decoy's docking point
    Collision,
    /// Touched the real body outside the docking tolerances
    RoughDocking,
    Fell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Retry,
    GameOver,
}

/// State the scene's scripts act on
pub struct World {
    pub status: PlayerStatus,
    /// Offset applied to the whole play field (crash shake)
    pub camera: Vec2,
    pending: Option<Pending>,
}

fn camera(world: &mut World) -> &mut Vec2 {
    &mut world.camera
}

pub enum ResultScreen {
    Success(SuccessScreen),
    GameOver(GameOverScreen),
}

impl ResultScreen {
    fn as_entity(&self) -> &dyn Entity {
        match self {
            ResultScreen::Success(screen) => screen,
            ResultScreen::GameOver(screen) => screen,
        }
    }

    fn as_entity_mut(&mut self) -> &mut dyn Entity {
        match self {
            ResultScreen::Success(screen) => screen,
            ResultScreen::GameOver(screen) => screen,
        }
    }
}

pub enum Phase {
    Playing,
    Crashed(CrashReason),
    Result(ResultScreen),
}

enum Contact {
    Docked,
    Crash(CrashReason),
}

fn exhaust_config() -> ParticleConfig {
    ParticleConfig {
        color: Color::rgba(255.0, 255.0, 255.0, 0.7),
        duration: 30,
        interval: 2,
        speed: 6.0,
        min_radius: 4.0,
        max_radius: 16.0,
        angle: 0.0,
        angle_variance: 0.3,
    }
}

pub struct InGameScene {
    tuning: Tuning,
    rng: Pcg32,
    world: World,
    head: Option<SeaHead>,
    bodies: Vec<SeaBody>,
    enemy_heads: Vec<EnemyHead>,
    enemy_bodies: Vec<EnemyBody>,
    crashes: Vec<CrashEffect>,
    fogs: Vec<FogEffect>,
    successes: Vec<SuccessEffect>,
    exhaust: ParticleGenerator,
    criteria: DockingCriteria,
    hud: Hud,
    background: Sprite,
    phase: Phase,
    /// Crash follow-up (delay, then retry or game over)
    scripts: SequentialScriptRunner<World>,
    /// Camera effects
    effects: ParallelScriptRunner<World>,
    was_boosting: bool,
    game_over_recorded: bool,
    particles: bool,
    debug_circles: bool,
    screen_shake: bool,
}

impl InGameScene {
    /// Start a run. The bundle may carry a starting `level`.
    pub fn new(bundle: &Bundle, services: &mut Services) -> Result<Self, GameError> {
        let tuning = services.tuning.clone();
        let mut status = PlayerStatus::new(&tuning);
        if let Some(level) = bundle.get(Bundle::LEVEL) {
            status.level = u32::try_from(level).unwrap_or(u32::MAX);
        }
        let mut rng = Pcg32::seed_from_u64(services.next_seed());
        let exhaust = ParticleGenerator::new(exhaust_config(), rng.random());
        let hud = Hud::new(&status, tuning.fuel_full, tuning.life_full);

        let mut scene = Self {
            criteria: DockingCriteria::new(tuning.docking.clone()),
            tuning,
            rng,
            world: World {
                status,
                camera: Vec2::ZERO,
                pending: None,
            },
            head: None,
            bodies: Vec::new(),
            enemy_heads: Vec::new(),
            enemy_bodies: Vec::new(),
            crashes: Vec::new(),
            fogs: Vec::new(),
            successes: Vec::new(),
            exhaust,
            hud,
            background: Sprite::new("room", Size::fullscreen()),
            phase: Phase::Playing,
            scripts: SequentialScriptRunner::new(),
            effects: ParallelScriptRunner::new(),
            was_boosting: false,
            game_over_recorded: false,
            particles: services.settings.particles,
            debug_circles: services.settings.debug_circles,
            screen_shake: services.settings.screen_shake(),
        };
        scene.start_attempt()?;
        services.audio.fade_bgm(1.0, 60);
        Ok(scene)
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.phase, Phase::Playing)
    }

    pub fn status(&self) -> &PlayerStatus {
        &self.world.status
    }

    pub fn status_mut(&mut self) -> &mut PlayerStatus {
        &mut self.world.status
    }

    pub fn head(&self) -> Option<&SeaHead> {
        self.head.as_ref()
    }

    pub fn head_mut(&mut self) -> Option<&mut SeaHead> {
        self.head.as_mut()
    }

    pub fn criteria(&self) -> &DockingCriteria {
        &self.criteria
    }

    pub fn real_body_position(&self) -> Option<Vec2> {
        self.bodies
            .iter()
            .find(|b| !b.is_fake())
            .map(|b| b.position())
    }

    pub fn bodies(&self) -> &[SeaBody] {
        &self.bodies
    }

    pub fn enemy_body_count(&self) -> usize {
        self.enemy_bodies.len()
    }

    pub fn camera(&self) -> Vec2 {
        self.world.camera
    }

    /// Fresh head, full tank and a regenerated layout for the current level
    fn start_attempt(&mut self) -> Result<(), GameError> {
        let level = generate_level(self.world.status.level, &mut self.rng)?;
        self.bodies = level.bodies;
        self.enemy_heads = level.enemy_heads;
        self.enemy_bodies = level.enemy_bodies;

        self.world.status.refuel(&self.tuning);
        self.world.camera = Vec2::ZERO;
        self.head = Some(SeaHead::new(
            Vec2::new(HEAD_SPAWN.0, HEAD_SPAWN.1),
            &self.tuning.flight,
        ));
        self.criteria = DockingCriteria::new(self.tuning.docking.clone());
        self.exhaust.stop();
        self.was_boosting = false;
        self.phase = Phase::Playing;
        log::info!(
            "Attempt at level {} ({} lives, score {})",
            self.world.status.level,
            self.world.status.life,
            self.world.status.score
        );
        Ok(())
    }

    fn update_actors(&mut self, input: &KeyStatus) {
        for body in self.bodies.iter_mut() {
            body.update(input);
        }
        for enemy in self.enemy_heads.iter_mut() {
            enemy.update(input);
        }
        for enemy in self.enemy_bodies.iter_mut() {
            enemy.update(input);
        }
        for effect in self.crashes.iter_mut() {
            effect.update(input);
        }
        for effect in self.fogs.iter_mut() {
            effect.update(input);
        }
        for effect in self.successes.iter_mut() {
            effect.update(input);
        }
        self.exhaust.update(input);

        retain_valid(&mut self.bodies);
        retain_valid(&mut self.enemy_heads);
        retain_valid(&mut self.enemy_bodies);
        retain_valid(&mut self.crashes);
        retain_valid(&mut self.fogs);
        retain_valid(&mut self.successes);
    }

    fn play(&mut self, input: &KeyStatus, services: &mut Services) {
        let Some(head) = self.head.as_mut() else {
            return;
        };
        head.fly(
            input,
            &mut self.world.status.fuel,
            self.criteria.check(),
            &mut self.rng,
        );
        head.update(input);

        let boosting = head.is_boosting();
        let (nozzle, direction) = head.exhaust();
        self.exhaust.position = nozzle;
        self.exhaust.config.angle = direction;
        if boosting != self.was_boosting {
            if boosting {
                services.audio.play(Sound::Boost);
                if self.particles {
                    self.exhaust.start();
                }
            } else {
                services.audio.stop(Sound::Boost);
                self.exhaust.stop();
            }
            self.was_boosting = boosting;
        }


        self.update_actors(input);

        let Some(head) = self.head.as_ref() else {
            return;
        };
        self.criteria.update(head);
        let position = head.position();
        self.reveal_decoys(position, services);

        match self.contact() {
            Some(Contact::Docked) => self.dock(services),
            Some(Contact::Crash(reason)) => self.crash(reason, services),
            None => {}
        }
    }

    /// Decoys within reach turn into enemy bodies
    fn reveal_decoys(&mut self, head: Vec2, services: &mut Services) {
        let reach = self.tuning.fake_reveal_distance;
        for body in self
            .bodies
            .iter_mut()
            .filter(|b| b.is_fake() && !b.invalidated())
        {
            let position = body.position();
            if position.distance(head) > reach {
                continue;
            }
            log::debug!("Decoy at x={} revealed", position.x);
            body.invalidate();
            self.fogs.push(FogEffect::new(position));
            self.enemy_bodies
                .push(EnemyBody::new(position, &mut self.rng));
            services.audio.play(Sound::Fog);
        }
    }

    fn contact(&self) -> Option<Contact> {
        let head = self.head.as_ref()?;

        let touched = self
            .bodies
            .iter()
            .filter(|b| !b.invalidated())
            .find(|b| head.is_collide(*b));
        if let Some(body) = touched {
            return Some(match (body.is_fake(), self.criteria.check()) {
                (false, true) => Contact::Docked,
                (false, false) => Contact::Crash(CrashReason::RoughDocking),
                (true, _) => Contact::Crash(CrashReason::Collision),
            });
        }
        if head.touches_ground() {
            return Some(Contact::Crash(CrashReason::Ground));
        }
        let hit_enemy = self.enemy_heads.iter().any(|e| head.is_collide(e))
            || self.enemy_bodies.iter().any(|e| head.is_collide(e));
        if hit_enemy {
            return Some(Contact::Crash(CrashReason::Collision));
        }
        if head.has_fallen() {
            return Some(Contact::Crash(CrashReason::Fell));
        }
        None
    }

    fn stop_boost(&mut self, services: &mut Services) {
        self.exhaust.stop();
        if self.was_boosting {
            services.audio.stop(Sound::Boost);
            self.was_boosting = false;
        }
    }

    fn dock(&mut self, services: &mut Services) {
        let (Some(head), Some(body)) = (
            self.head.as_mut(),
            self.bodies.iter().find(|b| !b.is_fake()),
        ) else {
            return;
        };
        let body_position = body.position();
        head.set_success();
        let score = ScoreCalculator::new(
            self.world.status.fuel,
            head.position().x - body_position.x,
            head.angle(),
            &self.tuning.score,
        );
        self.world.status.score += score.total_score();
        log::info!(
            "Docked at level {} for {} points (total {})",
            self.world.status.level,
            score.total_score(),
            self.world.status.score
        );

        self.stop_boost(services);
        self.successes.push(SuccessEffect::new(body_position));
        services.audio.play(Sound::Docking);
        services.audio.play(Sound::Success);
        services.audio.fade_bgm(0.5, 30);
        self.phase = Phase::Result(ResultScreen::Success(SuccessScreen::new(score)));
    }

    fn crash(&mut self, reason: CrashReason, services: &mut Services) {
        let Some(mut head) = self.head.take() else {
            return;
        };
        head.invalidate();
        let out_of_lives = self.world.status.lose_life();
        log::info!(
            "Crashed ({reason:?}) at level {}, {} lives left",
            self.world.status.level,
            self.world.status.life
        );

        self.stop_boost(services);
        self.crashes.push(CrashEffect::new(head.position()));
        services.audio.play(Sound::Crash);
        if self.screen_shake {
            self.effects
                .run(WaveTransition::new(camera, Vec2::new(0.0, 24.0), 8, Some(4)));
        }

        let delay = self.tuning.crash_delay;
        let next = if out_of_lives {
            Pending::GameOver
        } else {
            Pending::Retry
        };
        self.scripts.push(move || Wait::new(delay));
        self.scripts
            .push(move || Run::new(move |w: &mut World| w.pending = Some(next)));
        self.phase = Phase::Crashed(reason);
    }

    /// Record the final score (once per run) and show the game over screen
    fn game_over(&mut self, services: &mut Services) {
        if self.game_over_recorded {
            return;
        }
        self.game_over_recorded = true;
        let score = self.world.status.score;
        let rank = HighScores::record(services.storage.as_mut(), score);
        log::info!("Game over with {score} points (rank {rank:?})");

        self.stop_boost(services);
        services.audio.play(Sound::GameOver);
        services.audio.fade_bgm(0.3, 30);
        self.phase = Phase::Result(ResultScreen::GameOver(GameOverScreen::new(score, rank)));
    }

    fn after_crash(&mut self, input: &KeyStatus, services: &mut Services) -> Result<(), GameError> {
        self.scripts.update(&mut self.world, input);
        match self.world.pending.take() {
            Some(Pending::Retry) => self.start_attempt()?,
            Some(Pending::GameOver) => self.game_over(services),
            None => {}
        }
        Ok(())
    }

    fn update_result(
        &mut self,
        input: &KeyStatus,
        services: &mut Services,
    ) -> Result<SceneCommand, GameError> {
        let closed = match &mut self.phase {
            Phase::Result(screen) => {
                let screen = screen.as_entity_mut();
                screen.update(input);
                screen.invalidated()
            }
            _ => false,
        };
        if !closed {
            return Ok(SceneCommand::Stay);
        }

        match std::mem::replace(&mut self.phase, Phase::Playing) {
            Phase::Result(ResultScreen::Success(_)) => {
                if self.world.status.level >= LEVEL_MAX {
                    self.game_over(services);
                } else {
                    self.world.status.level += 1;
                    self.start_attempt()?;
                    services.audio.fade_bgm(1.0, 30);
                }
                Ok(SceneCommand::Stay)
            }
            Phase::Result(ResultScreen::GameOver(screen)) => Ok(SceneCommand::Change(
                SceneId::Title,
                Bundle::new().with(Bundle::SCORE, screen.final_score()),
            )),
            other => {
                self.phase = other;
                Ok(SceneCommand::Stay)
            }
        }
    }
}

impl Scene for InGameScene {
    fn id(&self) -> SceneId {
        SceneId::InGame
    }

    fn update(&mut self, input: &KeyStatus, services: &mut Services) -> Result<SceneCommand, GameError> {
        self.effects.update(&mut self.world, input);

        let command = match self.phase {
            Phase::Playing => {
                self.play(input, services);
                SceneCommand::Stay
            }
            Phase::Crashed(_) => {
                self.update_actors(input);
                self.after_crash(input, services)?;
                SceneCommand::Stay
            }
            Phase::Result(_) => {
                self.update_actors(input);
                self.update_result(input, services)?
            }
        };

        self.hud.sync(&self.world.status, &self.criteria);
        self.hud.update(input);
        Ok(command)
    }

    fn render(&self, surface: &mut dyn Surface) {
        self.background.render(surface);

        surface.save();
        surface.translate(self.world.camera);
        for body in &self.bodies {
            body.render(surface);
        }
        for enemy in &self.enemy_bodies {
            enemy.render(surface);
        }
        for enemy in &self.enemy_heads {
            enemy.render(surface);
        }
        self.exhaust.render(surface);
        if let Some(head) = &self.head {
            head.render(surface);
        }
        for effect in &self.successes {
            effect.render(surface);
        }
        for effect in &self.fogs {
            effect.render(surface);
        }
        for effect in &self.crashes {
            effect.render(surface);
        }

        if self.debug_circles {
            for body in &self.bodies {
                render_collider(body, surface);
            }
            for enemy in &self.enemy_bodies {
                render_collider(enemy, surface);
            }
            for enemy in &self.enemy_heads {
                render_collider(enemy, surface);
            }
            if let Some(head) = &self.head {
                render_collider(head, surface);
            }
        }
        surface.restore();

        self.hud.render(surface);
        if let Phase::Result(screen) = &self.phase {
            screen.as_entity().render(surface);
        }
    }
}
