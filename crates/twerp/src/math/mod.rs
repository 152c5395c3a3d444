//! Value types and the interpolation primitive.

pub mod bounds;
pub mod color;
pub mod gradient;
pub mod lerp;

pub use bounds::Bounds;
pub use color::{Hsl, Rgb};
pub use gradient::{ColorStop, LinearGradient};
pub use lerp::{lerp, lerp_any, lerp_vec2, Lerp};
