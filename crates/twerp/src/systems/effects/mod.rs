//! Visual effects: timed fades and wiggles, and particle bursts.
//!
//! None of these draw; they produce colours, offsets and `ParticleInstance`
//! records for the caller's renderer.

mod particle;
mod rng;
mod timed;

pub use particle::{
    DrawHook, InitHook, Particle, ParticleEffect, ParticleEffectBuilder, ParticleInstance, ParticleSystem,
    UpdateHook,
};
pub use rng::Rng;
pub use timed::{EffectState, Fader, TimedEffect, Wiggle};
