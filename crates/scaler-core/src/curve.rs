//! Piecewise keyframe curve backing the custom scaling policy.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::REFERENCE_SIZE;

/// Errors raised when constructing a scaling curve.
#[derive(Debug, Error)]
pub enum CurveError {
    #[error("a scaling curve requires at least one key")]
    Empty,
}

/// A single `(ratio, value)` key on a scaling curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveKey {
    pub ratio: f32,
    pub value: f32,
}

impl CurveKey {
    pub const fn new(ratio: f32, value: f32) -> Self {
        Self { ratio, value }
    }
}

/// A keyframe curve evaluated by linear interpolation between keys.
///
/// Outside the key domain the curve clamps to its end values. Monotonicity is
/// by convention only; nothing validates the shape the world creator drew.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CurveKey>", into = "Vec<CurveKey>")]
pub struct ScalingCurve {
    /// Keys sorted by ratio.
    keys: Vec<CurveKey>,
}

impl ScalingCurve {
    /// Creates a curve from a key list, sorting it by ratio.
    pub fn new(mut keys: Vec<CurveKey>) -> Result<Self, CurveError> {
        if keys.is_empty() {
            return Err(CurveError::Empty);
        }
        keys.sort_by(|a, b| a.ratio.total_cmp(&b.ratio));
        Ok(Self { keys })
    }

    /// Evaluates the curve at the given ratio.
    pub fn evaluate(&self, ratio: f32) -> f32 {
        let first = self.keys[0];
        if ratio <= first.ratio {
            return first.value;
        }
        let last = self.keys[self.keys.len() - 1];
        if ratio >= last.ratio {
            return last.value;
        }

        for pair in self.keys.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if ratio <= b.ratio {
                let span = b.ratio - a.ratio;
                let t = if span > 0.0 { (ratio - a.ratio) / span } else { 1.0 };
                return a.value + (b.value - a.value) * t;
            }
        }

        last.value
    }

    /// Returns the keys sorted by ratio.
    pub fn keys(&self) -> &[CurveKey] {
        &self.keys
    }
}

impl Default for ScalingCurve {
    /// Same shape a world creator gets out of the box: quarter speed at zero
    /// size, neutral at the reference size, steep gain toward the size cap.
    fn default() -> Self {
        Self {
            keys: vec![
                CurveKey::new(0.0, 0.25),
                CurveKey::new(REFERENCE_SIZE, 1.0),
                CurveKey::new(100.0, 80.0),
            ],
        }
    }
}

impl TryFrom<Vec<CurveKey>> for ScalingCurve {
    type Error = CurveError;

    fn try_from(keys: Vec<CurveKey>) -> Result<Self, Self::Error> {
        Self::new(keys)
    }
}

impl From<ScalingCurve> for Vec<CurveKey> {
    fn from(curve: ScalingCurve) -> Self {
        curve.keys
    }
}
