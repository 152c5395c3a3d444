// extensions/easing.rs
//
// Easing curves that reshape tween progress before interpolation.
// Pure functions of t; the tween engine feeds them elapsed / duration.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::math::Lerp;

/// Easing curve applied to normalised progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant velocity: progress is used as-is.
    #[default]
    Linear,
    QuadIn,
    QuadOut,
    QuadInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    SineIn,
    SineOut,
    SineInOut,
    /// Overshoot then settle.
    BackOut,
    /// Bouncy finish.
    BounceOut,
    /// Elastic spring.
    ElasticOut,
}

impl Easing {
    /// Map progress `t` to eased progress. `t` is clamped to [0, 1] first, so
    /// every curve starts at exactly 0 and ends at exactly 1; only Back and
    /// Elastic leave [0, 1] in between.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadIn => t.powi(2),
            Easing::QuadOut => out(t, |t| t.powi(2)),
            Easing::QuadInOut => in_out(t, |t| t.powi(2)),
            Easing::CubicIn => t.powi(3),
            Easing::CubicOut => out(t, |t| t.powi(3)),
            Easing::CubicInOut => in_out(t, |t| t.powi(3)),
            Easing::SineIn => 1.0 - (t * PI / 2.0).cos(),
            Easing::SineOut => (t * PI / 2.0).sin(),
            Easing::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
            Easing::BackOut => {
                const C1: f32 = 1.70158;
                const C3: f32 = C1 + 1.0;
                if t == 1.0 {
                    1.0
                } else {
                    1.0 + C3 * (t - 1.0).powi(3) + C1 * (t - 1.0).powi(2)
                }
            }
            Easing::BounceOut => bounce_out(t),
            Easing::ElasticOut => {
                const C4: f32 = (2.0 * PI) / 3.0;
                if t == 0.0 || t == 1.0 {
                    t
                } else {
                    2.0_f32.powf(-10.0 * t) * ((t * 10.0 - 0.75) * C4).sin() + 1.0
                }
            }
        }
    }
}

/// Mirror an ease-in curve into an ease-out.
#[inline]
fn out(t: f32, curve: impl Fn(f32) -> f32) -> f32 {
    1.0 - curve(1.0 - t)
}

/// Ease-in for the first half, ease-out for the second.
#[inline]
fn in_out(t: f32, curve: impl Fn(f32) -> f32) -> f32 {
    if t < 0.5 {
        curve(2.0 * t) / 2.0
    } else {
        1.0 - curve(2.0 - 2.0 * t) / 2.0
    }
}

#[inline]
fn bounce_out(t: f32) -> f32 {
    const N1: f32 = 7.5625;
    const D1: f32 = 2.75;

    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else if t == 1.0 {
        1.0
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

/// Interpolate any `Lerp` value with easing.
#[inline]
pub fn ease<V: Lerp>(from: &V, to: &V, t: f32, easing: Easing) -> Result<V> {
    from.lerp_to(to, easing.apply(t))
}
