//! Linear interpolation: the scalar formula and the `Lerp` capability for
//! composite values.

use glam::Vec2;

use crate::error::Result;

/// Linearly interpolate between two values.
/// `t` is not clamped: values outside [0, 1] extrapolate.
/// `t == 1` returns `b` bit-for-bit, and for `t` in [0, 1] rounding never
/// carries the result outside `[a, b]`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    if t == 1.0 {
        return b;
    }
    let v = a + (b - a) * t;
    if (0.0..=1.0).contains(&t) {
        v.max(a.min(b)).min(a.max(b))
    } else {
        v
    }
}

/// Linearly interpolate between two Vec2 values.
#[inline]
pub fn lerp_vec2(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    Vec2::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t))
}

/// A value that can be interpolated toward another value of the same type.
///
/// Composite values combine member-wise with the scalar rule. Implementations
/// whose members can disagree in shape (gradient stop lists, mixed `Value`
/// kinds) report `TwerpError::ValueMismatch` instead of padding or truncating.
pub trait Lerp: Sized {
    /// `t = 0` returns `self`, `t = 1` returns `to`; other values extrapolate.
    fn lerp_to(&self, to: &Self, t: f32) -> Result<Self>;
}

impl Lerp for f32 {
    #[inline]
    fn lerp_to(&self, to: &Self, t: f32) -> Result<Self> {
        Ok(lerp(*self, *to, t))
    }
}

impl Lerp for f64 {
    #[inline]
    fn lerp_to(&self, to: &Self, t: f32) -> Result<Self> {
        if t == 1.0 {
            Ok(*to)
        } else {
            Ok(self + (to - self) * t as f64)
        }
    }
}

impl Lerp for Vec2 {
    #[inline]
    fn lerp_to(&self, to: &Self, t: f32) -> Result<Self> {
        Ok(lerp_vec2(*self, *to, t))
    }
}

impl<V: Lerp + Copy, const N: usize> Lerp for [V; N] {
    fn lerp_to(&self, to: &Self, t: f32) -> Result<Self> {
        let mut out = *self;
        for (slot, (a, b)) in out.iter_mut().zip(self.iter().zip(to.iter())) {
            *slot = a.lerp_to(b, t)?;
        }
        Ok(out)
    }
}

/// Interpolate any `Lerp` value, argument order `(t, from, to)`.
#[inline]
pub fn lerp_any<V: Lerp>(t: f32, from: &V, to: &V) -> Result<V> {
    from.lerp_to(to, t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        assert_eq!(lerp(3.0, 7.0, 0.0), 3.0);
        assert_eq!(lerp(3.0, 7.0, 1.0), 7.0);
    }

    #[test]
    fn endpoint_exact_for_awkward_values() {
        assert_eq!(lerp(0.1, 0.3, 1.0), 0.3);
        assert_eq!(lerp(-1e-3, 12345.678, 1.0), 12345.678);
    }

    #[test]
    fn extrapolates_outside_unit_range() {
        assert_eq!(lerp(0.0, 10.0, 1.5), 15.0);
        assert_eq!(lerp(0.0, 10.0, -0.5), -5.0);
    }

    #[test]
    fn vec2_is_component_wise() {
        let v = lerp_any(0.25, &Vec2::new(0.0, 100.0), &Vec2::new(40.0, 0.0)).unwrap();
        assert_eq!(v, Vec2::new(lerp(0.0, 40.0, 0.25), lerp(100.0, 0.0, 0.25)));
    }

    #[test]
    fn arrays_lerp_each_slot() {
        let v = [0.0_f32, 10.0, 20.0].lerp_to(&[10.0, 10.0, 0.0], 0.5).unwrap();
        assert_eq!(v, [5.0, 10.0, 10.0]);
    }
}
