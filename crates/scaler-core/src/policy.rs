//! Scale-factor policies mapping a size ratio to an effect multiplier.

use serde::{Deserialize, Serialize};

use crate::curve::ScalingCurve;

/// Strategy for turning a size ratio into an effect multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScalePolicy {
    /// The multiplier is the ratio itself.
    Linear,
    /// Applies a power to the ratio, with separate exponents for shrinking
    /// and growing. Exponents below 1.0 soften the effect on that side.
    NonLinear { down_exponent: f32, up_exponent: f32 },
    /// Lets the world creator define an arbitrary keyframe curve.
    CustomCurve { curve: ScalingCurve },
}

impl Default for ScalePolicy {
    fn default() -> Self {
        Self::NonLinear {
            down_exponent: 0.5,
            up_exponent: 0.8,
        }
    }
}

impl ScalePolicy {
    /// Maps a size ratio to an effect multiplier.
    ///
    /// Pure and total for any strictly positive ratio. At ratio 1 the
    /// non-linear branches both yield exactly 1 for any positive exponent;
    /// a zero or negative exponent is accepted without validation and
    /// produces degenerate multipliers (constant 1, or inversion).
    pub fn evaluate(&self, ratio: f32) -> f32 {
        match self {
            Self::Linear => ratio,
            Self::NonLinear {
                down_exponent,
                up_exponent,
            } => {
                let exponent = if ratio < 1.0 {
                    *down_exponent
                } else {
                    *up_exponent
                };
                ratio.powf(exponent)
            }
            Self::CustomCurve { curve } => curve.evaluate(ratio),
        }
    }
}
