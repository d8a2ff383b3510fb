//! Fade Curves
//!
//! Shaping applied to transition progress. Linear is the default and
//! keeps fades exactly proportional to elapsed time.

use serde::{Deserialize, Serialize};

/// Fade curve type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FadeCurve {
    /// Linear fade
    #[default]
    Linear,
    /// Quadratic ease-in (slow start)
    EaseInQuad,
    /// Quadratic ease-out (slow end)
    EaseOutQuad,
    /// S-curve (sine-based)
    SCurve,
}

impl FadeCurve {
    /// Apply the curve to a linear progress value (0.0-1.0)
    #[inline]
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            FadeCurve::Linear => t,
            FadeCurve::EaseInQuad => t * t,
            FadeCurve::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            FadeCurve::SCurve => (1.0 - (t * std::f32::consts::PI).cos()) / 2.0,
        }
    }
}
