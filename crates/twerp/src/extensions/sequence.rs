// extensions/sequence.rs
//
// Chains tweens and pauses one after another, optionally looping back to an
// earlier step. A sequence never blocks: call `poll` once per frame after
// `Twerp::update` and it issues the next step when the current one is done.

use std::cell::RefCell;
use std::rc::Rc;

use super::tween::{Tween, TweenId, TweenOutcome, Twerp};
use crate::error::Result;

type Step = Box<dyn FnMut(&mut Twerp) -> Result<TweenId>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceState {
    Idle,
    Running { step: usize },
    Finished,
    /// A step failed to register (see the error returned by `start`/`poll`)
    /// or was retired before finishing.
    Failed,
}

pub struct Sequence {
    steps: Vec<Step>,
    loop_from: Option<usize>,
    state: SequenceState,
    current: Option<TweenId>,
}

impl Sequence {
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            loop_from: None,
            state: SequenceState::Idle,
            current: None,
        }
    }

    /// Append a tween. `make` is called each time the step is issued, so a
    /// looping sequence gets a fresh tween every pass.
    pub fn then<T, F>(mut self, target: &Rc<RefCell<T>>, mut make: F) -> Self
    where
        T: 'static,
        F: FnMut() -> Tween<T> + 'static,
    {
        let target = Rc::clone(target);
        self.steps.push(Box::new(move |twerp: &mut Twerp| twerp.tween(&target, make())));
        self
    }

    /// Append a pause.
    pub fn wait(mut self, seconds: f32) -> Self {
        self.steps.push(Box::new(move |twerp: &mut Twerp| twerp.delay(seconds)));
        self
    }

    /// After the last step, continue from `step` instead of finishing.
    pub fn loop_from(mut self, step: usize) -> Self {
        self.loop_from = Some(step);
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn state(&self) -> SequenceState {
        self.state
    }

    /// The tween or pause currently being waited on.
    pub fn current(&self) -> Option<TweenId> {
        self.current
    }

    /// Issue the first step. Restarts from the top if already running.
    pub fn start(&mut self, twerp: &mut Twerp) -> Result<()> {
        self.stop(twerp);
        if self.steps.is_empty() {
            self.state = SequenceState::Finished;
            return Ok(());
        }
        self.issue(0, twerp)
    }

    /// Advance to the next step once the current one has finished.
    /// At most one step is issued per call. Call once per frame, right after
    /// `Twerp::update`, so a step retired by the engine is seen as a failure.
    pub fn poll(&mut self, twerp: &mut Twerp) -> Result<SequenceState> {
        let SequenceState::Running { step } = self.state else {
            return Ok(self.state);
        };
        if let Some(id) = self.current {
            match twerp.outcome(id) {
                TweenOutcome::Running => return Ok(self.state),
                TweenOutcome::Retired => {
                    log::warn!("sequence step {} ({:?}) retired before finishing", step, id);
                    self.current = None;
                    self.state = SequenceState::Failed;
                    return Ok(self.state);
                }
                TweenOutcome::Completed | TweenOutcome::Gone => {}
            }
        }

        let next = step + 1;
        if next < self.steps.len() {
            self.issue(next, twerp)?;
        } else if let Some(restart) = self.loop_from.filter(|&s| s < self.steps.len()) {
            log::debug!("sequence looping to step {}", restart);
            self.issue(restart, twerp)?;
        } else {
            log::debug!("sequence finished after {} steps", self.steps.len());
            self.current = None;
            self.state = SequenceState::Finished;
        }
        Ok(self.state)
    }

    /// Cancel the running step and return to `Idle`.
    pub fn stop(&mut self, twerp: &mut Twerp) {
        if let Some(id) = self.current.take() {
            twerp.remove(id);
        }
        self.state = SequenceState::Idle;
    }

    fn issue(&mut self, step: usize, twerp: &mut Twerp) -> Result<()> {
        match (self.steps[step])(twerp) {
            Ok(id) => {
                log::debug!("sequence step {} issued as {:?}", step, id);
                self.current = Some(id);
                self.state = SequenceState::Running { step };
                Ok(())
            }
            Err(err) => {
                self.current = None;
                self.state = SequenceState::Failed;
                Err(err)
            }
        }
    }
}

impl Default for Sequence {
    fn default() -> Self {
        Self::new()
    }
}
