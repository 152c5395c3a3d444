pub mod config;
pub mod core;
pub mod error;
pub mod extensions;
pub mod math;
pub mod physics;
pub mod systems;

// Re-export key types at crate root for convenience
pub use config::TwerpConfig;
pub use crate::core::time::{Clock, TimeInfo};
pub use error::{Result, TwerpError};
pub use math::{lerp, lerp_any, lerp_vec2, Bounds, ColorStop, Hsl, Lerp, LinearGradient, Rgb};
pub use physics::{check_collision_block, check_collision_grid, BrickGrid, Cell, CellCoord, CollisionResult, Direction};
pub use systems::effects::{
    EffectState, Fader, Particle, ParticleEffect, ParticleEffectBuilder, ParticleInstance, ParticleSystem, Rng,
    TimedEffect, Wiggle,
};

pub use extensions::{
    ease, Animatable, Easing, Sequence, SequenceState, Setter, Tween, TweenId, TweenOutcome, Twerp, Value, ValueBag,
};
