// extensions/tween.rs
//
// Tween engine: interpolates properties of caller-owned targets over time.
// Targets are shared as Rc<RefCell<T>>; the engine only keeps a Weak, so a
// dropped target simply ends its animations.
//
// Usage:
//   let mut twerp = Twerp::new();
//   let rect = Rc::new(RefCell::new(Rect::default()));
//   twerp.tween(&rect, Tween::prop(|r: &mut Rect, x| r.x = x, 50.0, 250.0).over(1.0))?;
//   twerp.update(time);  // once per frame

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::easing::Easing;
use super::value::{check_keys, resolve, Animatable, Setter, Value, ValueBag};
use crate::config::TwerpConfig;
use crate::core::time::TimeInfo;
use crate::error::{check_duration, Result, TwerpError};
use crate::math::Lerp;

/// Handle to a registered animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenId(pub u32);

/// One interpolated property: endpoints plus the code that writes it.
trait Channel<T> {
    /// Fails if the endpoints cannot be interpolated.
    fn validate(&self) -> Result<()>;
    fn apply(&mut self, target: &mut T, t: f32) -> Result<()>;
}

/// Statically typed endpoints with an infallible setter closure.
struct Lane<V, F> {
    from: V,
    to: V,
    set: F,
}

impl<T, V, F> Channel<T> for Lane<V, F>
where
    V: Lerp,
    F: FnMut(&mut T, V),
{
    fn validate(&self) -> Result<()> {
        self.from.lerp_to(&self.to, 0.0).map(drop)
    }

    fn apply(&mut self, target: &mut T, t: f32) -> Result<()> {
        let v = self.from.lerp_to(&self.to, t)?;
        (self.set)(target, v);
        Ok(())
    }
}

/// `Value` endpoints written through a setter resolved from `Animatable`.
struct NamedLane<T> {
    from: Value,
    to: Value,
    set: Setter<T>,
}

impl<T> Channel<T> for NamedLane<T> {
    fn validate(&self) -> Result<()> {
        self.from.lerp_to(&self.to, 0.0).map(drop)
    }

    fn apply(&mut self, target: &mut T, t: f32) -> Result<()> {
        let v = self.from.lerp_to(&self.to, t)?;
        (self.set)(target, v)
    }
}

struct Track<T> {
    name: String,
    channel: Box<dyn Channel<T>>,
}

/// What a tween drives: one property, or a bag of them at once.
enum Props<T> {
    Single(Track<T>),
    Bag(Vec<Track<T>>),
}

impl<T> Props<T> {
    fn tracks(&self) -> &[Track<T>] {
        match self {
            Props::Single(track) => std::slice::from_ref(track),
            Props::Bag(tracks) => tracks,
        }
    }

    fn tracks_mut(&mut self) -> &mut [Track<T>] {
        match self {
            Props::Single(track) => std::slice::from_mut(track),
            Props::Bag(tracks) => tracks,
        }
    }
}

/// Description of an animation, consumed by `Twerp::tween`.
///
/// The duration defaults to 0 and must be set with `over`; registering a
/// tween without a positive duration fails with `DegenerateDuration`.
pub struct Tween<T> {
    props: Props<T>,
    duration: f32,
    easing: Easing,
}

impl<T: 'static> Tween<T> {
    /// Animate a single property through a setter.
    pub fn prop<V, F>(set: F, from: V, to: V) -> Self
    where
        V: Lerp + 'static,
        F: FnMut(&mut T, V) + 'static,
    {
        Self::single(String::new(), Box::new(Lane { from, to, set }))
    }

    /// Animate a single property looked up by name on an `Animatable` target.
    pub fn named(prop: &str, from: impl Into<Value>, to: impl Into<Value>) -> Result<Self>
    where
        T: Animatable,
    {
        let set = resolve::<T>(prop)?;
        let lane = NamedLane {
            from: from.into(),
            to: to.into(),
            set,
        };
        Ok(Self::single(prop.to_owned(), Box::new(lane)))
    }

    /// Start an empty property bag; add properties with `with`.
    pub fn bag() -> Self {
        Self {
            props: Props::Bag(Vec::new()),
            duration: 0.0,
            easing: Easing::Linear,
        }
    }

    /// Animate every property named in `from`/`to` at once.
    /// Both bags must name the same properties (`KeyMismatch` otherwise) and
    /// every name must resolve on `T` (`UnsupportedInterpolant` otherwise).
    pub fn from_bags(from: &ValueBag, to: &ValueBag) -> Result<Self>
    where
        T: Animatable,
    {
        check_keys(from, to)?;
        let mut tracks = Vec::with_capacity(from.len());
        for (key, start) in from {
            let set = resolve::<T>(key)?;
            let end = to[key].clone();
            tracks.push(Track {
                name: key.clone(),
                channel: Box::new(NamedLane {
                    from: start.clone(),
                    to: end,
                    set,
                }),
            });
        }
        Ok(Self {
            props: Props::Bag(tracks),
            duration: 0.0,
            easing: Easing::Linear,
        })
    }

    fn single(name: String, channel: Box<dyn Channel<T>>) -> Self {
        Self {
            props: Props::Single(Track { name, channel }),
            duration: 0.0,
            easing: Easing::Linear,
        }
    }

    // -- Builder methods --

    /// Add a property to the bag. A single-property tween becomes a bag.
    pub fn with<V, F>(mut self, name: &str, set: F, from: V, to: V) -> Self
    where
        V: Lerp + 'static,
        F: FnMut(&mut T, V) + 'static,
    {
        let track = Track {
            name: name.to_owned(),
            channel: Box::new(Lane { from, to, set }),
        };
        self.props = match self.props {
            Props::Single(first) => Props::Bag(vec![first, track]),
            Props::Bag(mut tracks) => {
                tracks.push(track);
                Props::Bag(tracks)
            }
        };
        self
    }

    /// Duration in seconds.
    pub fn over(mut self, seconds: f32) -> Self {
        self.duration = seconds;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Names of the animated properties (empty for an unnamed single property).
    pub fn property_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.props.tracks().iter().map(|t| t.name.as_str())
    }

    fn validate(&self) -> Result<()> {
        check_duration(self.duration)?;
        for track in self.props.tracks() {
            track.channel.validate()?;
        }
        Ok(())
    }
}

/// Outcome of advancing one animation by one tick.
enum Progress {
    Running,
    /// Wrote the final value and retired.
    Finished,
    /// Already dead; nothing happened.
    Inert,
    /// Target dropped by its owner.
    Orphaned,
    /// Target busy; this tick was skipped.
    Deferred,
    /// A write failed; retired.
    Failed(TwerpError),
}

/// A registered animation with its type erased.
trait Animation {
    fn advance(&mut self, delta: f32) -> Progress;
    fn is_alive(&self) -> bool;
}

/// Elapsed-time bookkeeping shared by tweens and delays.
///
/// Progress for the current tick is computed before time is bumped, so the
/// tick that observes `elapsed >= duration` still writes t = 1 exactly once.
struct Timeline {
    duration: f32,
    elapsed: f32,
    alive: bool,
}

impl Timeline {
    fn new(duration: f32) -> Self {
        Self {
            duration,
            elapsed: 0.0,
            alive: true,
        }
    }

    fn progress(&self) -> f32 {
        self.elapsed / self.duration
    }

    /// Retire if complete, otherwise advance. Returns the tick's outcome.
    fn finish_tick(&mut self, delta: f32) -> Progress {
        if self.elapsed >= self.duration {
            self.alive = false;
            return Progress::Finished;
        }
        self.elapsed += delta;
        Progress::Running
    }
}

struct Anim<T> {
    target: Weak<RefCell<T>>,
    props: Props<T>,
    easing: Easing,
    timeline: Timeline,
}

impl<T> Animation for Anim<T> {
    fn advance(&mut self, delta: f32) -> Progress {
        if !self.timeline.alive {
            return Progress::Inert;
        }
        let Some(target) = self.target.upgrade() else {
            self.timeline.alive = false;
            return Progress::Orphaned;
        };
        let Ok(mut target) = target.try_borrow_mut() else {
            return Progress::Deferred;
        };

        let t = self.easing.apply(self.timeline.progress());
        for track in self.props.tracks_mut() {
            if let Err(err) = track.channel.apply(&mut target, t) {
                self.timeline.alive = false;
                return Progress::Failed(err);
            }
        }
        self.timeline.finish_tick(delta)
    }

    fn is_alive(&self) -> bool {
        self.timeline.alive
    }
}

/// A pause with no target, used as a sleep step in sequences.
struct Delay {
    timeline: Timeline,
}

impl Animation for Delay {
    fn advance(&mut self, delta: f32) -> Progress {
        if !self.timeline.alive {
            return Progress::Inert;
        }
        self.timeline.finish_tick(delta)
    }

    fn is_alive(&self) -> bool {
        self.timeline.alive
    }
}

/// How an animation stands, as of the last `update`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenOutcome {
    Running,
    /// Wrote its final value during the last update.
    Completed,
    /// Stopped during the last update without finishing: a write failed or
    /// the target was dropped.
    Retired,
    /// Not running and not seen ending in the last update (ended earlier,
    /// removed, or never issued).
    Gone,
}

struct Slot {
    id: TweenId,
    anim: Box<dyn Animation>,
}

/// Owns all registered animations and advances them once per tick,
/// in registration order.
pub struct Twerp {
    anims: Vec<Slot>,
    next_id: u32,
    prune_dead: bool,
    /// Tweens that finished normally during the last update.
    completed: Vec<TweenId>,
    /// Tweens retired without finishing during the last update.
    retired: Vec<TweenId>,
}

impl Twerp {
    pub fn new() -> Self {
        Self::with_config(&TwerpConfig::default())
    }

    pub fn with_config(config: &TwerpConfig) -> Self {
        Self {
            anims: Vec::new(),
            next_id: 0,
            prune_dead: config.prune_dead,
            completed: Vec::new(),
            retired: Vec::new(),
        }
    }

    fn next_id(&mut self) -> TweenId {
        let id = TweenId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Register an animation on `target`. Nothing is written until the next
    /// `update`. Fails without registering anything if the duration is not
    /// positive or the endpoints cannot be interpolated.
    pub fn tween<T: 'static>(&mut self, target: &Rc<RefCell<T>>, tween: Tween<T>) -> Result<TweenId> {
        tween.validate()?;
        let id = self.next_id();
        log::debug!("{:?}: registered over {}s", id, tween.duration);
        let anim = Anim {
            target: Rc::downgrade(target),
            props: tween.props,
            easing: tween.easing,
            timeline: Timeline::new(tween.duration),
        };
        self.anims.push(Slot {
            id,
            anim: Box::new(anim),
        });
        Ok(id)
    }

    /// Register a pause that finishes after `seconds` of ticks.
    pub fn delay(&mut self, seconds: f32) -> Result<TweenId> {
        let duration = check_duration(seconds)?;
        let id = self.next_id();
        self.anims.push(Slot {
            id,
            anim: Box::new(Delay {
                timeline: Timeline::new(duration),
            }),
        });
        Ok(id)
    }

    /// Advance every animation by `time.delta`.
    /// Returns the number of animations that finished this tick.
    ///
    /// The completed and retired lists only describe this tick; ids from
    /// earlier ticks are dropped here.
    pub fn update(&mut self, time: TimeInfo) -> usize {
        let mut finished = 0;
        self.completed.clear();
        self.retired.clear();

        for slot in &mut self.anims {
            match slot.anim.advance(time.delta) {
                Progress::Finished => {
                    log::debug!("{:?}: finished", slot.id);
                    self.completed.push(slot.id);
                    finished += 1;
                }
                Progress::Failed(err) => {
                    log::warn!("{:?}: retired after error: {}", slot.id, err);
                    self.retired.push(slot.id);
                }
                Progress::Orphaned => {
                    log::debug!("{:?}: target dropped", slot.id);
                    self.retired.push(slot.id);
                }
                Progress::Deferred => {
                    log::warn!("{:?}: {}, skipping tick", slot.id, TwerpError::TargetBorrowed);
                }
                Progress::Running | Progress::Inert => {}
            }
        }

        if self.prune_dead {
            self.anims.retain(|slot| slot.anim.is_alive());
        }

        finished
    }

    /// Remove an animation. Its target keeps whatever value was last written.
    pub fn remove(&mut self, id: TweenId) -> bool {
        let before = self.anims.len();
        self.anims.retain(|slot| slot.id != id);
        self.anims.len() != before
    }

    /// Whether `id` is registered and still running.
    pub fn is_alive(&self, id: TweenId) -> bool {
        self.anims.iter().any(|slot| slot.id == id && slot.anim.is_alive())
    }

    /// Whether `id` was issued by this engine and is no longer running
    /// (finished, failed, orphaned or removed).
    pub fn is_finished(&self, id: TweenId) -> bool {
        id.0 < self.next_id && !self.is_alive(id)
    }

    pub fn outcome(&self, id: TweenId) -> TweenOutcome {
        if self.is_alive(id) {
            TweenOutcome::Running
        } else if self.completed.contains(&id) {
            TweenOutcome::Completed
        } else if self.retired.contains(&id) {
            TweenOutcome::Retired
        } else {
            TweenOutcome::Gone
        }
    }

    /// Ids of tweens that finished normally during the last update, in order.
    pub fn completed(&self) -> &[TweenId] {
        &self.completed
    }

    /// Drain ids of tweens that finished normally during the last update.
    pub fn drain_completed(&mut self) -> impl Iterator<Item = TweenId> + '_ {
        self.completed.drain(..)
    }

    /// Number of stored animations, dead ones included when pruning is off.
    pub fn len(&self) -> usize {
        self.anims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anims.is_empty()
    }

    /// Number of animations still running.
    pub fn active_count(&self) -> usize {
        self.anims.iter().filter(|slot| slot.anim.is_alive()).count()
    }

    /// Clear all animations.
    pub fn clear(&mut self) {
        self.anims.clear();
        self.completed.clear();
        self.retired.clear();
    }

    /// Immediately set a property across `targets`, evenly distributed from
    /// `from` (first element) to `to` (last element). A single element gets
    /// `to`; an empty slice is left alone.
    pub fn spread<T, V, F>(targets: &mut [T], mut set: F, from: &V, to: &V) -> Result<()>
    where
        V: Lerp,
        F: FnMut(&mut T, V),
    {
        from.lerp_to(to, 0.0)?;
        let n = targets.len();
        if n == 1 {
            set(&mut targets[0], from.lerp_to(to, 1.0)?);
            return Ok(());
        }
        let last = n.saturating_sub(1) as f32;
        for (i, target) in targets.iter_mut().enumerate() {
            set(target, from.lerp_to(to, i as f32 / last)?);
        }
        Ok(())
    }

    /// `spread` for a property looked up by name on an `Animatable` type.
    pub fn spread_named<T: Animatable>(targets: &mut [T], prop: &str, from: &Value, to: &Value) -> Result<()> {
        let set = resolve::<T>(prop)?;
        let mut outcome = Ok(());
        Self::spread(
            targets,
            |target, v| {
                if outcome.is_ok() {
                    outcome = set(target, v);
                }
            },
            from,
            to,
        )?;
        outcome
    }
}

impl Default for Twerp {
    fn default() -> Self {
        Self::new()
    }
}
