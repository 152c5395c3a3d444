//! RGB and HSL colours with channels normalised to [0, 1].

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use super::lerp::{lerp, Lerp};
use crate::error::Result;

/// Linear RGB colour, each channel in [0, 1].
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

pub const RED: Rgb = Rgb::new(1.0, 0.0, 0.0);
pub const GREEN: Rgb = Rgb::new(0.0, 1.0, 0.0);
pub const BLUE: Rgb = Rgb::new(0.0, 0.0, 1.0);
pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);
pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);
pub const VIOLET: Rgb = Rgb::new(0.3, 0.0, 0.8);
pub const YELLOW: Rgb = Rgb::new(1.0, 0.8, 0.1);

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// 80% brightness, used for borders.
    pub fn darken(self) -> Self {
        Self::new(self.r * 0.8, self.g * 0.8, self.b * 0.8)
    }

    /// Channel-wise blend; infallible counterpart of `lerp_to`.
    pub fn mix(self, to: Rgb, t: f32) -> Self {
        Self::new(lerp(self.r, to.r, t), lerp(self.g, to.g, t), lerp(self.b, to.b, t))
    }
}

impl Lerp for Rgb {
    fn lerp_to(&self, to: &Self, t: f32) -> Result<Self> {
        Ok(self.mix(*to, t))
    }
}

/// Hue/saturation/lightness colour. Hue is a fraction of a full turn.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

impl Hsl {
    pub const fn new(h: f32, s: f32, l: f32) -> Self {
        Self { h, s, l }
    }

    pub fn to_rgb(self) -> Rgb {
        if self.s == 0.0 {
            return Rgb::new(self.l, self.l, self.l);
        }
        let q = if self.l < 0.5 {
            self.l * (1.0 + self.s)
        } else {
            self.l + self.s - self.l * self.s
        };
        let p = 2.0 * self.l - q;
        Rgb::new(
            hue_to_channel(p, q, self.h + 1.0 / 3.0),
            hue_to_channel(p, q, self.h),
            hue_to_channel(p, q, self.h - 1.0 / 3.0),
        )
    }
}

fn hue_to_channel(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

impl From<Hsl> for Rgb {
    fn from(hsl: Hsl) -> Self {
        hsl.to_rgb()
    }
}

// Component-wise, hue included: no shortest-arc wrapping.
impl Lerp for Hsl {
    fn lerp_to(&self, to: &Self, t: f32) -> Result<Self> {
        Ok(Hsl::new(lerp(self.h, to.h, t), lerp(self.s, to.s, t), lerp(self.l, to.l, t)))
    }
}
