//! Particle bursts: fixed-size swarms of kinematic points that fade out
//! over the effect's lifetime.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use super::rng::Rng;
use crate::config::TwerpConfig;
use crate::core::time::TimeInfo;
use crate::error::{check_duration, Result};
use crate::math::Rgb;

/// A single particle. `position` is relative to the effect origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: f32,
    pub color: Rgb,
    pub alpha: f32,
    pub age: f32,
}

impl Particle {
    pub const SPEED_LIMIT: f32 = 100.0;
    pub const MIN_SIZE: f32 = 2.0;
    pub const MAX_SIZE: f32 = 7.0;

    /// Random velocity and size, at the effect origin.
    pub fn random(color: Rgb, rng: &mut Rng) -> Self {
        Particle {
            position: Vec2::ZERO,
            velocity: Vec2::new(
                rng.range(-Self::SPEED_LIMIT, Self::SPEED_LIMIT),
                rng.range(-Self::SPEED_LIMIT, Self::SPEED_LIMIT),
            ),
            size: rng.range(Self::MIN_SIZE, Self::MAX_SIZE),
            color,
            alpha: 1.0,
            age: 0.0,
        }
    }
}

/// Per-particle draw record (28 bytes), laid out for direct GPU upload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

pub type InitHook = Box<dyn FnOnce(&mut ParticleEffect, &mut Rng)>;
pub type UpdateHook = Box<dyn FnMut(TimeInfo, &mut ParticleEffect)>;
pub type DrawHook = Box<dyn FnMut(TimeInfo, &ParticleEffect, &mut Vec<ParticleInstance>)>;

pub struct ParticleEffect {
    pub particles: Vec<Particle>,
    origin: Vec2,
    age: f32,
    max_lifetime: f32,
    delay: f32,
    update_hook: Option<UpdateHook>,
    draw_hook: Option<DrawHook>,
}

impl ParticleEffect {
    pub fn builder(origin: Vec2, color: Rgb, count: usize, max_lifetime: f32) -> ParticleEffectBuilder {
        ParticleEffectBuilder {
            origin,
            color,
            count,
            max_lifetime,
            delay: 0.0,
            init: None,
            update: None,
            draw: None,
        }
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn age(&self) -> f32 {
        self.age
    }

    pub fn max_lifetime(&self) -> f32 {
        self.max_lifetime
    }

    pub fn delay(&self) -> f32 {
        self.delay
    }

    /// Still inside the start delay. Hooks decide what that means.
    pub fn is_delayed(&self) -> bool {
        self.age < self.delay
    }

    pub fn is_alive(&self) -> bool {
        self.age < self.max_lifetime
    }

    /// Linear fade from 1 at birth to 0 at `max_lifetime`.
    pub fn fade(&self) -> f32 {
        (1.0 - self.age / self.max_lifetime).clamp(0.0, 1.0)
    }

    pub fn update(&mut self, time: TimeInfo) {
        self.age += time.delta;
        if let Some(mut hook) = self.update_hook.take() {
            hook(time, self);
            self.update_hook = Some(hook);
            return;
        }
        for p in &mut self.particles {
            p.position += p.velocity * time.delta;
            p.age += time.delta;
        }
    }

    /// Append this effect's draw records to `out`.
    pub fn draw(&mut self, time: TimeInfo, out: &mut Vec<ParticleInstance>) {
        if let Some(mut hook) = self.draw_hook.take() {
            hook(time, self, out);
            self.draw_hook = Some(hook);
            return;
        }
        let fade = self.fade();
        out.extend(self.particles.iter().map(|p| self.instance(p, p.alpha * fade)));
    }

    /// Draw record for `p` in world space with the given alpha.
    pub fn instance(&self, p: &Particle, alpha: f32) -> ParticleInstance {
        let pos = self.origin + p.position;
        ParticleInstance {
            x: pos.x,
            y: pos.y,
            size: p.size,
            r: p.color.r,
            g: p.color.g,
            b: p.color.b,
            a: alpha,
        }
    }
}

pub struct ParticleEffectBuilder {
    origin: Vec2,
    color: Rgb,
    count: usize,
    max_lifetime: f32,
    delay: f32,
    init: Option<InitHook>,
    update: Option<UpdateHook>,
    draw: Option<DrawHook>,
}

impl ParticleEffectBuilder {
    pub fn delay(mut self, seconds: f32) -> Self {
        self.delay = seconds;
        self
    }

    /// Runs once after the default particles are created.
    pub fn on_init(mut self, f: impl FnOnce(&mut ParticleEffect, &mut Rng) + 'static) -> Self {
        self.init = Some(Box::new(f));
        self
    }

    /// Replaces the default `position += velocity * delta` motion.
    pub fn on_update(mut self, f: impl FnMut(TimeInfo, &mut ParticleEffect) + 'static) -> Self {
        self.update = Some(Box::new(f));
        self
    }

    /// Replaces the default faded square per particle.
    pub fn on_draw(mut self, f: impl FnMut(TimeInfo, &ParticleEffect, &mut Vec<ParticleInstance>) + 'static) -> Self {
        self.draw = Some(Box::new(f));
        self
    }

    pub fn build(self, rng: &mut Rng) -> Result<ParticleEffect> {
        let max_lifetime = check_duration(self.max_lifetime)?;
        let particles = (0..self.count).map(|_| Particle::random(self.color, rng)).collect();
        let mut effect = ParticleEffect {
            particles,
            origin: self.origin,
            age: 0.0,
            max_lifetime,
            delay: self.delay.max(0.0),
            update_hook: self.update,
            draw_hook: self.draw,
        };
        if let Some(init) = self.init {
            init(&mut effect, rng);
        }
        Ok(effect)
    }
}

/// Owns live particle effects, advancing and pruning them each tick.
pub struct ParticleSystem {
    effects: Vec<ParticleEffect>,
    instances: Vec<ParticleInstance>,
    rng: Rng,
    max_effects: usize,
}

impl ParticleSystem {
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, &TwerpConfig::default())
    }

    pub fn with_config(seed: u64, config: &TwerpConfig) -> Self {
        ParticleSystem {
            effects: Vec::new(),
            instances: Vec::with_capacity(1024),
            rng: Rng::new(seed.wrapping_add(7919)),
            max_effects: config.max_particle_effects,
        }
    }

    /// Build and add an effect. Returns `Ok(false)` if the effect budget is full.
    pub fn spawn(&mut self, builder: ParticleEffectBuilder) -> Result<bool> {
        if self.effects.len() >= self.max_effects {
            log::warn!("particle budget of {} effects reached, spawn refused", self.max_effects);
            return Ok(false);
        }
        let effect = builder.build(&mut self.rng)?;
        self.effects.push(effect);
        Ok(true)
    }

    /// Update all effects and prune expired ones. Returns the number pruned.
    pub fn tick(&mut self, time: TimeInfo) -> usize {
        for effect in &mut self.effects {
            effect.update(time);
        }
        let before = self.effects.len();
        self.effects.retain(ParticleEffect::is_alive);
        let pruned = before - self.effects.len();
        if pruned > 0 {
            log::debug!("pruned {} particle effects, {} live", pruned, self.effects.len());
        }
        pruned
    }

    /// Rebuild the draw records for every live effect.
    pub fn draw(&mut self, time: TimeInfo) -> &[ParticleInstance] {
        self.instances.clear();
        for effect in &mut self.effects {
            effect.draw(time, &mut self.instances);
        }
        &self.instances
    }

    /// Draw records from the last `draw`, as raw bytes.
    pub fn instance_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }

    pub fn effects(&self) -> &[ParticleEffect] {
        &self.effects
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn clear(&mut self) {
        self.effects.clear();
        self.instances.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::color::{RED, YELLOW};

    fn dt(delta: f32) -> TimeInfo {
        TimeInfo::from_delta(delta)
    }

    #[test]
    fn default_particles_within_ranges() {
        let mut rng = Rng::new(3);
        let effect = ParticleEffect::builder(Vec2::new(50.0, 50.0), RED, 40, 1.0)
            .build(&mut rng)
            .unwrap();
        assert_eq!(effect.particles.len(), 40);
        for p in &effect.particles {
            assert_eq!(p.position, Vec2::ZERO);
            assert!(p.velocity.x.abs() <= 100.0 && p.velocity.y.abs() <= 100.0);
            assert!((2.0..7.0).contains(&p.size));
            assert_eq!(p.alpha, 1.0);
        }
    }

    #[test]
    fn degenerate_lifetime_rejected() {
        let mut rng = Rng::new(3);
        assert!(ParticleEffect::builder(Vec2::ZERO, RED, 1, 0.0).build(&mut rng).is_err());
    }

    #[test]
    fn default_motion_and_fade() {
        let mut rng = Rng::new(1);
        let mut effect = ParticleEffect::builder(Vec2::new(10.0, 20.0), RED, 1, 2.0)
            .on_init(|e, _| e.particles[0].velocity = Vec2::new(4.0, -2.0))
            .build(&mut rng)
            .unwrap();
        effect.update(dt(0.5));
        assert_eq!(effect.particles[0].position, Vec2::new(2.0, -1.0));

        let mut out = Vec::new();
        effect.draw(dt(0.5), &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!((out[0].x, out[0].y), (12.0, 19.0));
        assert_eq!(out[0].a, 0.75);
    }

    #[test]
    fn hooks_replace_defaults() {
        let mut rng = Rng::new(1);
        let mut effect = ParticleEffect::builder(Vec2::ZERO, YELLOW, 3, 1.0)
            .delay(0.25)
            .on_update(|time, e| {
                if !e.is_delayed() {
                    for p in &mut e.particles {
                        p.position.y += 10.0 * time.delta;
                    }
                }
            })
            .on_draw(|_, e, out| {
                if let Some(p) = e.particles.first() {
                    out.push(e.instance(p, 1.0));
                }
            })
            .build(&mut rng)
            .unwrap();

        effect.update(dt(0.125));
        assert!(effect.particles.iter().all(|p| p.position == Vec2::ZERO));
        effect.update(dt(0.25));
        assert!(effect.particles.iter().all(|p| p.position.y == 2.5));

        let mut out = Vec::new();
        effect.draw(dt(0.0), &mut out);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn system_prunes_expired_effects() {
        let mut system = ParticleSystem::new(9);
        assert!(system.spawn(ParticleEffect::builder(Vec2::ZERO, RED, 5, 0.5)).unwrap());
        assert!(system.spawn(ParticleEffect::builder(Vec2::ZERO, RED, 5, 1.0)).unwrap());

        assert_eq!(system.tick(dt(0.25)), 0);
        assert_eq!(system.draw(dt(0.25)).len(), 10);
        assert_eq!(system.instance_bytes().len(), 10 * std::mem::size_of::<ParticleInstance>());

        assert_eq!(system.tick(dt(0.25)), 1);
        assert_eq!(system.len(), 1);
        assert_eq!(system.tick(dt(0.5)), 1);
        assert!(system.is_empty());
    }

    #[test]
    fn spawn_refused_over_budget() {
        let config = TwerpConfig {
            max_particle_effects: 1,
            ..TwerpConfig::default()
        };
        let mut system = ParticleSystem::with_config(1, &config);
        assert!(system.spawn(ParticleEffect::builder(Vec2::ZERO, RED, 1, 1.0)).unwrap());
        assert!(!system.spawn(ParticleEffect::builder(Vec2::ZERO, RED, 1, 1.0)).unwrap());
        assert_eq!(system.len(), 1);
    }
}
