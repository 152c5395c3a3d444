use serde::{Deserialize, Serialize};

use crate::config::TwerpConfig;

/// Per-frame timing handed to every subsystem.
/// Both values are in seconds; `delta` is never negative.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TimeInfo {
    /// Time since the driver started ticking.
    pub since_start: f32,
    /// Time since the previous tick.
    pub delta: f32,
}

impl TimeInfo {
    pub fn new(since_start: f32, delta: f32) -> Self {
        Self { since_start, delta }
    }

    /// A tick that only advances by `delta`. Handy in tests and scripted drivers.
    pub fn from_delta(delta: f32) -> Self {
        Self { since_start: 0.0, delta }
    }

    /// Same tick with `delta` multiplied by `factor`.
    pub fn scaled(self, factor: f32) -> Self {
        Self {
            since_start: self.since_start,
            delta: self.delta * factor,
        }
    }
}

/// Turns raw frame timestamps into `TimeInfo`.
///
/// The first tick reports `delta = 0`. A timestamp earlier than the previous
/// one is tolerated and also yields `delta = 0`.
#[derive(Debug, Clone)]
pub struct Clock {
    /// Timestamp of the first tick.
    start: Option<f64>,
    /// Timestamp of the previous tick.
    last: f64,
    /// Factor applied to each delta.
    scale: f32,
    /// Scaled time accumulated since the first tick.
    since_start: f32,
}

impl Clock {
    pub fn new() -> Self {
        Self::with_scale(1.0)
    }

    pub fn with_scale(scale: f32) -> Self {
        Self {
            start: None,
            last: 0.0,
            scale,
            since_start: 0.0,
        }
    }

    pub fn from_config(config: &TwerpConfig) -> Self {
        Self::with_scale(config.time_scale)
    }

    /// Current time scale.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    /// Feed the timestamp of the current frame (seconds) and get the tick to dispatch.
    pub fn tick(&mut self, now: f64) -> TimeInfo {
        let raw = match self.start {
            None => {
                self.start = Some(now);
                0.0
            }
            Some(_) => {
                let d = now - self.last;
                if d < 0.0 {
                    log::warn!("clock went backwards by {:.4}s, treating as zero delta", -d);
                    0.0
                } else {
                    d as f32
                }
            }
        };
        self.last = now;

        let delta = raw * self.scale;
        self.since_start += delta;
        TimeInfo::new(self.since_start, delta)
    }

    /// Forget the start time; the next tick begins a new session.
    pub fn reset(&mut self) {
        self.start = None;
        self.since_start = 0.0;
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_has_zero_delta() {
        let mut clock = Clock::new();
        let t = clock.tick(12.5);
        assert_eq!(t.delta, 0.0);
        assert_eq!(t.since_start, 0.0);
    }

    #[test]
    fn deltas_accumulate() {
        let mut clock = Clock::new();
        clock.tick(1.0);
        let t = clock.tick(1.25);
        assert!((t.delta - 0.25).abs() < 1e-6);
        let t = clock.tick(1.5);
        assert!((t.since_start - 0.5).abs() < 1e-6);
    }

    #[test]
    fn scale_applies_to_delta() {
        let mut clock = Clock::from_config(&TwerpConfig {
            time_scale: 0.5,
            ..TwerpConfig::default()
        });
        clock.tick(0.0);
        let t = clock.tick(1.0);
        assert!((t.delta - 0.5).abs() < 1e-6);
    }

    #[test]
    fn backwards_timestamp_is_zero_delta() {
        let mut clock = Clock::new();
        clock.tick(5.0);
        let t = clock.tick(4.0);
        assert_eq!(t.delta, 0.0);
        let t = clock.tick(4.5);
        assert!((t.delta - 0.5).abs() < 1e-6);
    }

    #[test]
    fn reset_restarts_session() {
        let mut clock = Clock::new();
        clock.tick(0.0);
        clock.tick(2.0);
        clock.reset();
        let t = clock.tick(10.0);
        assert_eq!(t.delta, 0.0);
        assert_eq!(t.since_start, 0.0);
    }

    #[test]
    fn scaled_time_info() {
        let t = TimeInfo::new(3.0, 0.1).scaled(2.0);
        assert!((t.delta - 0.2).abs() < 1e-6);
        assert_eq!(t.since_start, 3.0);
    }
}
