//! Error type shared by every fallible operation in the crate.

use thiserror::Error;

/// Errors raised while building or running animations and effects.
///
/// None of these are fatal to the process: each one belongs to a single
/// tween, effect or call and leaves everything else running.
#[derive(Debug, Error)]
pub enum TwerpError {
    /// Two composite values cannot be interpolated because their shapes differ
    /// (e.g. gradients with different stop counts, or a number against a point).
    #[error("value mismatch: {0}")]
    ValueMismatch(String),

    /// The value (or the property it is written to) cannot be interpolated.
    #[error("unsupported interpolant: {0}")]
    UnsupportedInterpolant(String),

    /// A duration that is zero, negative or not finite.
    #[error("degenerate duration {0}s (must be finite and > 0)")]
    DegenerateDuration(f32),

    /// A grid cell size that is zero, negative or not finite.
    #[error("degenerate cell size {0} (must be finite and > 0)")]
    DegenerateCellSize(f32),

    /// A property bag tween whose `from` and `to` key sets differ.
    #[error("property bag key `{0}` is missing from one side")]
    KeyMismatch(String),

    /// The tween target was already mutably borrowed when the engine tried to write it.
    #[error("tween target is borrowed elsewhere")]
    TargetBorrowed,

    /// Malformed JSON configuration.
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TwerpError>;

/// Reject durations that would divide by zero or poison progress with NaN.
pub(crate) fn check_duration(seconds: f32) -> Result<f32> {
    if seconds.is_finite() && seconds > 0.0 {
        Ok(seconds)
    } else {
        Err(TwerpError::DegenerateDuration(seconds))
    }
}
