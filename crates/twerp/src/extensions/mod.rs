// extensions/mod.rs
//
// Tweening: easing curves, dynamic values, the tween engine and sequences.

pub mod easing;
pub mod sequence;
pub mod tween;
pub mod value;

pub use easing::{ease, Easing};
pub use sequence::{Sequence, SequenceState};
pub use tween::{Tween, TweenId, TweenOutcome, Twerp};
pub use value::{Animatable, Setter, Value, ValueBag};
