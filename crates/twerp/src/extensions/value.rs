// extensions/value.rs
//
// Dynamic interpolants for tweens described by property name, plus the
// `Animatable` table a target type uses to expose its properties.
// Names resolve to setters once, when the tween is built.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TwerpError};
use crate::math::{Hsl, Lerp, LinearGradient, Rgb};

/// Any value a named property can be tweened through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(f32),
    Point(Vec2),
    Rgb(Rgb),
    Hsl(Hsl),
    Gradient(LinearGradient),
}

impl Value {
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Point(_) => "point",
            Value::Rgb(_) => "rgb",
            Value::Hsl(_) => "hsl",
            Value::Gradient(_) => "gradient",
        }
    }
}

impl Lerp for Value {
    fn lerp_to(&self, to: &Self, t: f32) -> Result<Self> {
        Ok(match (self, to) {
            (Value::Number(a), Value::Number(b)) => Value::Number(a.lerp_to(b, t)?),
            (Value::Point(a), Value::Point(b)) => Value::Point(a.lerp_to(b, t)?),
            (Value::Rgb(a), Value::Rgb(b)) => Value::Rgb(a.lerp_to(b, t)?),
            (Value::Hsl(a), Value::Hsl(b)) => Value::Hsl(a.lerp_to(b, t)?),
            (Value::Gradient(a), Value::Gradient(b)) => Value::Gradient(a.lerp_to(b, t)?),
            (a, b) => {
                return Err(TwerpError::ValueMismatch(format!(
                    "cannot interpolate {} toward {}",
                    a.kind(),
                    b.kind()
                )))
            }
        })
    }
}

macro_rules! value_conversions {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }

            impl TryFrom<Value> for $ty {
                type Error = TwerpError;

                fn try_from(v: Value) -> Result<Self> {
                    match v {
                        Value::$variant(inner) => Ok(inner),
                        other => Err(TwerpError::UnsupportedInterpolant(format!(
                            "expected {}, got {}",
                            stringify!($variant).to_lowercase(),
                            other.kind()
                        ))),
                    }
                }
            }
        )*
    };
}

value_conversions! {
    Number => f32,
    Point => Vec2,
    Rgb => Rgb,
    Hsl => Hsl,
    Gradient => LinearGradient,
}

/// Named endpoint values for a property-bag tween.
pub type ValueBag = BTreeMap<String, Value>;

/// Writes a `Value` into one property of `T`. Fails with
/// `UnsupportedInterpolant` when the value kind does not fit the field.
pub type Setter<T> = fn(&mut T, Value) -> Result<()>;

/// A target type that exposes named, tweenable properties.
///
/// ```ignore
/// impl Animatable for Shape {
///     fn setter(name: &str) -> Option<Setter<Self>> {
///         match name {
///             "alpha" => Some(|s, v| { s.alpha = v.try_into()?; Ok(()) }),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait Animatable: Sized {
    /// Setter for `name`, or `None` if the property is not animatable.
    fn setter(name: &str) -> Option<Setter<Self>>;
}

/// Resolve `name` on `T`, failing with `UnsupportedInterpolant` for unknown names.
pub(crate) fn resolve<T: Animatable>(name: &str) -> Result<Setter<T>> {
    T::setter(name).ok_or_else(|| {
        TwerpError::UnsupportedInterpolant(format!("property `{name}` is not animatable"))
    })
}

/// Check that two bags name exactly the same properties.
pub(crate) fn check_keys(from: &ValueBag, to: &ValueBag) -> Result<()> {
    if let Some(key) = from.keys().find(|k| !to.contains_key(*k)) {
        return Err(TwerpError::KeyMismatch(key.clone()));
    }
    if let Some(key) = to.keys().find(|k| !from.contains_key(*k)) {
        return Err(TwerpError::KeyMismatch(key.clone()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::color::{BLUE, RED};

    #[test]
    fn same_kinds_interpolate() {
        let v = Value::from(RED).lerp_to(&Value::from(BLUE), 0.5).unwrap();
        assert_eq!(v, Value::Rgb(RED.mix(BLUE, 0.5)));
        let n = Value::Number(2.0).lerp_to(&Value::Number(4.0), 0.5).unwrap();
        assert_eq!(n, Value::Number(3.0));
    }

    #[test]
    fn mixed_kinds_are_a_mismatch() {
        let err = Value::Number(1.0).lerp_to(&Value::Point(Vec2::ONE), 0.5).unwrap_err();
        assert!(matches!(err, TwerpError::ValueMismatch(_)));
    }

    #[test]
    fn try_from_wrong_kind_is_unsupported() {
        let err = f32::try_from(Value::Rgb(RED)).unwrap_err();
        assert!(matches!(err, TwerpError::UnsupportedInterpolant(_)));
        assert_eq!(Vec2::try_from(Value::Point(Vec2::X)).unwrap(), Vec2::X);
    }

    #[test]
    fn bag_from_json() {
        let bag: ValueBag = serde_json::from_str(
            r#"{ "scale": 0.5, "position": [0, 10], "color": { "r": 1, "g": 0, "b": 0 } }"#,
        )
        .unwrap();
        assert_eq!(bag["scale"], Value::Number(0.5));
        assert_eq!(bag["position"], Value::Point(Vec2::new(0.0, 10.0)));
        assert_eq!(bag["color"], Value::Rgb(RED));
    }

    #[test]
    fn key_sets_must_match() {
        let mut from = ValueBag::new();
        from.insert("x".into(), Value::Number(0.0));
        let mut to = from.clone();
        assert!(check_keys(&from, &to).is_ok());

        to.insert("y".into(), Value::Number(1.0));
        let err = check_keys(&from, &to).unwrap_err();
        assert!(matches!(err, TwerpError::KeyMismatch(ref k) if k == "y"));
    }
}
