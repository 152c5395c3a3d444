use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::color::Rgb;
use super::lerp::{lerp, lerp_vec2, Lerp};
use crate::error::{Result, TwerpError};

/// A colour at a normalised position along a gradient axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub position: f32,
    pub color: Rgb,
}

/// Linear gradient fill: an axis from `start` to `end` plus ordered colour stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearGradient {
    pub start: Vec2,
    pub end: Vec2,
    #[serde(default)]
    pub stops: Vec<ColorStop>,
}

impl LinearGradient {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self {
            start,
            end,
            stops: Vec::new(),
        }
    }

    /// Append a stop. Stops keep insertion order.
    pub fn add_color_stop(&mut self, position: f32, color: Rgb) {
        self.stops.push(ColorStop { position, color });
    }

    pub fn with_stop(mut self, position: f32, color: Rgb) -> Self {
        self.add_color_stop(position, color);
        self
    }
}

impl Lerp for LinearGradient {
    /// Anchors and each stop pair interpolate independently.
    /// Gradients with different stop counts are a `ValueMismatch`.
    fn lerp_to(&self, to: &Self, t: f32) -> Result<Self> {
        if self.stops.len() != to.stops.len() {
            return Err(TwerpError::ValueMismatch(format!(
                "gradient with {} stops cannot interpolate toward one with {}",
                self.stops.len(),
                to.stops.len()
            )));
        }
        let stops = self
            .stops
            .iter()
            .zip(&to.stops)
            .map(|(a, b)| ColorStop {
                position: lerp(a.position, b.position, t),
                color: a.color.mix(b.color, t),
            })
            .collect();
        Ok(Self {
            start: lerp_vec2(self.start, to.start, t),
            end: lerp_vec2(self.end, to.end, t),
            stops,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::color::{BLACK, GREEN, RED, WHITE};

    #[test]
    fn matching_stops_interpolate_member_wise() {
        let a = LinearGradient::new(Vec2::new(100.0, 0.0), Vec2::new(200.0, 0.0))
            .with_stop(0.0, RED)
            .with_stop(1.0, GREEN);
        let b = LinearGradient::new(Vec2::new(0.0, 0.0), Vec2::new(300.0, 0.0))
            .with_stop(0.0, BLACK)
            .with_stop(0.5, BLACK);

        let mid = a.lerp_to(&b, 0.5).unwrap();
        assert_eq!(mid.start, Vec2::new(50.0, 0.0));
        assert_eq!(mid.end, Vec2::new(250.0, 0.0));
        assert_eq!(mid.stops[0].color, RED.mix(BLACK, 0.5));
        assert_eq!(mid.stops[1].position, 0.75);
        assert_eq!(mid.stops[1].color, GREEN.mix(BLACK, 0.5));
    }

    #[test]
    fn mismatched_stop_counts_rejected() {
        let a = LinearGradient::new(Vec2::ZERO, Vec2::X)
            .with_stop(0.0, WHITE)
            .with_stop(1.0, WHITE);
        let b = LinearGradient::new(Vec2::ZERO, Vec2::X).with_stop(0.0, BLACK);
        let err = a.lerp_to(&b, 0.5).unwrap_err();
        assert!(matches!(err, TwerpError::ValueMismatch(_)));
    }

    #[test]
    fn deserializes_from_json() {
        let g: LinearGradient = serde_json::from_str(
            r#"{ "start": [0, 0], "end": [0, 100],
                 "stops": [{ "position": 0.5, "color": { "r": 1, "g": 1, "b": 1 } }] }"#,
        )
        .unwrap();
        assert_eq!(g.end, Vec2::new(0.0, 100.0));
        assert_eq!(g.stops[0].color, WHITE);
    }
}
