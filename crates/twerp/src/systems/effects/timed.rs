//! One-shot timed transitions: a colour fade and a positional wiggle.
//!
//! Both share `TimedEffect`, which turns per-tick deltas into normalised
//! progress. Effects only advance while running; before `start()` and after
//! expiry they report their end state.

use glam::Vec2;

use crate::core::time::TimeInfo;
use crate::error::{check_duration, Result};
use crate::math::{Bounds, Rgb};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EffectState {
    /// Never started, or stopped.
    #[default]
    Idle,
    Running,
    /// Ran past its duration. Elapsed time is kept until restarted.
    Expired,
}

#[derive(Debug, Clone)]
pub struct TimedEffect {
    duration: f32,
    elapsed: f32,
    state: EffectState,
}

impl TimedEffect {
    pub fn new(duration: f32) -> Result<Self> {
        Ok(Self {
            duration: check_duration(duration)?,
            elapsed: 0.0,
            state: EffectState::Idle,
        })
    }

    pub fn start(&mut self) {
        self.elapsed = 0.0;
        self.state = EffectState::Running;
    }

    pub fn stop(&mut self) {
        self.elapsed = 0.0;
        self.state = EffectState::Idle;
    }

    pub fn state(&self) -> EffectState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == EffectState::Running
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Advance by `time.delta` if running, then return the progress.
    pub fn update(&mut self, time: TimeInfo) -> f32 {
        if self.state == EffectState::Running {
            self.elapsed += time.delta;
            if self.elapsed > self.duration {
                self.state = EffectState::Expired;
            }
        }
        self.progress()
    }

    /// `elapsed / duration`, capped at 1.
    pub fn progress(&self) -> f32 {
        (self.elapsed / self.duration).min(1.0)
    }
}

/// Fades between two colours, holding the end colour when not running.
#[derive(Debug, Clone)]
pub struct Fader {
    effect: TimedEffect,
    from: Rgb,
    to: Rgb,
}

impl Fader {
    pub fn new(from: Rgb, to: Rgb, duration: f32) -> Result<Self> {
        Ok(Self {
            effect: TimedEffect::new(duration)?,
            from,
            to,
        })
    }

    pub fn start(&mut self) {
        self.effect.start();
    }

    pub fn stop(&mut self) {
        self.effect.stop();
    }

    pub fn state(&self) -> EffectState {
        self.effect.state()
    }

    /// Advance one tick and return the colour to draw with.
    pub fn color(&mut self, time: TimeInfo) -> Rgb {
        let t = self.effect.update(time);
        if self.effect.is_running() {
            self.from.mix(self.to, t)
        } else {
            self.to
        }
    }
}

/// Shakes a position along `offset`, `cycles` full oscillations per run.
#[derive(Debug, Clone)]
pub struct Wiggle {
    effect: TimedEffect,
    pub offset: Vec2,
    cycles: f32,
}

impl Wiggle {
    pub fn new(offset: Vec2, duration: f32, cycles: f32) -> Result<Self> {
        Ok(Self {
            effect: TimedEffect::new(duration)?,
            offset,
            cycles,
        })
    }

    pub fn start(&mut self) {
        self.effect.start();
    }

    pub fn stop(&mut self) {
        self.effect.stop();
    }

    pub fn state(&self) -> EffectState {
        self.effect.state()
    }

    /// Advance one tick and return the current displacement; zero when not running.
    pub fn offset_at(&mut self, time: TimeInfo) -> Vec2 {
        let t = self.effect.update(time);
        if !self.effect.is_running() {
            return Vec2::ZERO;
        }
        let theta = (t * std::f32::consts::TAU * self.cycles).sin();
        self.offset * theta
    }

    /// `bounds` displaced by this tick's offset.
    pub fn apply(&mut self, time: TimeInfo, bounds: Bounds) -> Bounds {
        bounds.translate(self.offset_at(time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TwerpError;
    use crate::math::color::{BLACK, WHITE};

    fn dt(delta: f32) -> TimeInfo {
        TimeInfo::from_delta(delta)
    }

    #[test]
    fn degenerate_durations_rejected() {
        assert!(matches!(TimedEffect::new(0.0), Err(TwerpError::DegenerateDuration(_))));
        assert!(Fader::new(BLACK, WHITE, -1.0).is_err());
        assert!(Wiggle::new(Vec2::X, f32::NAN, 3.0).is_err());
    }

    #[test]
    fn effect_lifecycle() {
        let mut effect = TimedEffect::new(1.0).unwrap();
        assert_eq!(effect.update(dt(0.5)), 0.0);
        assert_eq!(effect.state(), EffectState::Idle);

        effect.start();
        assert_eq!(effect.update(dt(0.5)), 0.5);
        assert_eq!(effect.state(), EffectState::Running);
        assert_eq!(effect.update(dt(0.75)), 1.0);
        assert_eq!(effect.state(), EffectState::Expired);
        // Held, not advanced, once expired.
        assert_eq!(effect.update(dt(0.5)), 1.0);

        effect.stop();
        assert_eq!(effect.state(), EffectState::Idle);
        assert_eq!(effect.progress(), 0.0);
    }

    #[test]
    fn fader_holds_end_colour_outside_run() {
        let mut fader = Fader::new(BLACK, WHITE, 1.0).unwrap();
        assert_eq!(fader.color(dt(0.1)), WHITE);

        fader.start();
        let mid = fader.color(dt(0.5));
        assert!(mid.r > 0.0 && mid.r < 1.0);
        assert_eq!(mid, Rgb::new(0.5, 0.5, 0.5));

        assert_eq!(fader.color(dt(1.0)), WHITE);
        assert_eq!(fader.state(), EffectState::Expired);
        assert_eq!(fader.color(dt(0.1)), WHITE);
    }

    #[test]
    fn wiggle_oscillates_then_rests() {
        let mut wiggle = Wiggle::new(Vec2::new(10.0, 0.0), 1.0, 1.0).unwrap();
        assert_eq!(wiggle.offset_at(dt(0.25)), Vec2::ZERO);

        wiggle.start();
        let quarter = wiggle.offset_at(dt(0.25));
        assert!((quarter.x - 10.0).abs() < 1e-4);
        let three_quarters = wiggle.offset_at(dt(0.5));
        assert!((three_quarters.x + 10.0).abs() < 1e-4);

        let bounds = Bounds::new(5.0, 5.0, 10.0, 10.0);
        assert_eq!(wiggle.apply(dt(1.0), bounds), bounds);
    }
}
