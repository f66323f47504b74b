//! Particle emitter (exhaust plume behind the head)

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::{Color, Entity, retain_valid};
use crate::input::KeyStatus;
use crate::renderer::Surface;

/// Emitter parameters; all durations are in ticks
#[derive(Debug, Clone)]
pub struct ParticleConfig {
    pub color: Color,
    /// Lifetime of each particle
    pub duration: u32,
    /// Ticks between spawns while running
    pub interval: u32,
    pub speed: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    /// Emission direction (0 = up, clockwise)
    pub angle: f32,
    pub angle_variance: f32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            duration: 60,
            interval: 5,
            speed: 5.0,
            min_radius: 5.0,
            max_radius: 5.0,
            angle: 0.0,
            angle_variance: std::f32::consts::PI,
        }
    }
}

#[derive(Debug, Clone)]
struct Particle {
    position: Vec2,
    velocity: Vec2,
    color: Color,
    duration: u32,
    remain: i32,
    min_radius: f32,
    max_radius: f32,
    invalidated: bool,
}

impl Particle {
    fn current_radius(&self) -> f32 {
        let t = self.remain.max(0) as f32 / self.duration.max(1) as f32;
        self.min_radius + (self.max_radius - self.min_radius) * t
    }
}

impl Entity for Particle {
    fn update(&mut self, _input: &KeyStatus) {
        self.remain -= 1;
        if self.remain < 0 {
            self.invalidate();
            return;
        }
        self.position += self.velocity;
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.fill_circle(self.position, self.current_radius(), self.color);
    }

    fn invalidated(&self) -> bool {
        self.invalidated
    }

    fn invalidate(&mut self) {
        self.invalidated = true;
    }
}

pub struct ParticleGenerator {
    pub position: Vec2,
    pub config: ParticleConfig,
    remain_interval: i32,
    running: bool,
    particles: Vec<Particle>,
    rng: Pcg32,
    invalidated: bool,
}

impl ParticleGenerator {
    pub fn new(config: ParticleConfig, seed: u64) -> Self {
        Self {
            position: Vec2::ZERO,
            config,
            remain_interval: 0,
            running: false,
            particles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            invalidated: false,
        }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stop emitting; live particles fade out on their own
    pub fn stop(&mut self) {
        self.running = false;
        self.remain_interval = 0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    fn random_velocity(&mut self) -> Vec2 {
        let variance = self.config.angle_variance;
        let jitter = if variance > 0.0 {
            self.rng.random_range(-variance..variance)
        } else {
            0.0
        };
        let angle = self.config.angle + jitter;
        Vec2::new(angle.sin(), -angle.cos()) * self.config.speed
    }
}

impl Entity for ParticleGenerator {
    fn update(&mut self, input: &KeyStatus) {
        if self.running {
            self.remain_interval -= 1;
            if self.remain_interval < 0 {
                self.remain_interval = self.config.interval as i32;
                let velocity = self.random_velocity();
                self.particles.push(Particle {
                    position: self.position,
                    velocity,
                    color: self.config.color,
                    duration: self.config.duration,
                    remain: self.config.duration as i32,
                    min_radius: self.config.min_radius,
                    max_radius: self.config.max_radius,
                    invalidated: false,
                });
            }
        }

        for particle in self.particles.iter_mut() {
            particle.update(input);
        }
        retain_valid(&mut self.particles);
    }

    fn render(&self, surface: &mut dyn Surface) {
        for particle in &self.particles {
            particle.render(surface);
        }
    }

    fn invalidated(&self) -> bool {
        self.invalidated
    }

    fn invalidate(&mut self) {
        self.invalidated = true;
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emits_on_interval_and_expires() {
        let config = ParticleConfig {
            duration: 3,
            interval: 2,
            ..Default::default()
        };
        let mut generator = ParticleGenerator::new(config, 7);
        let input = KeyStatus::default();

        generator.update(&input);
        assert_eq!(generator.particle_count(), 0);

        generator.start();
        generator.update(&input);
        assert_eq!(generator.particle_count(), 1);

        generator.stop();
        for _ in 0..5 {
            generator.update(&input);
        }
        assert_eq!(generator.particle_count(), 0);
    }

    #[test]
    fn test_particles_move_along_emission_angle() {
        let config = ParticleConfig {
            angle_variance: 0.0,
            speed: 2.0,
            angle: std::f32::consts::PI,
            ..Default::default()
        };
        let mut generator = ParticleGenerator::new(config, 1);
        generator.start();
        let input = KeyStatus::default();
        generator.update(&input);
        generator.update(&input);

        // Pointing down: y grows
        assert!(generator.particles[0].position.y > 1.9);
        assert!(generator.particles[0].position.x.abs() < 1e-4);
    }
}
