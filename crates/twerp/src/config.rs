use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Runtime knobs shared by the clock, the tween engine and the particle system.
/// Every field has a default, so a partial JSON document is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TwerpConfig {
    /// Factor applied to every frame delta (0.5 = half speed).
    pub time_scale: f32,
    /// Drop finished animations during `Twerp::update` instead of keeping them inert.
    pub prune_dead: bool,
    /// Maximum number of live particle effects.
    pub max_particle_effects: usize,
}

impl Default for TwerpConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            prune_dead: true,
            max_particle_effects: 256,
        }
    }
}

impl TwerpConfig {
    /// Parse a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
