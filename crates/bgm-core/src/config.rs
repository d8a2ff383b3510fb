//! Engine Configuration
//!
//! Fade timings are configuration, not hard-coded invariants. The
//! defaults match the shipped game tuning; hosts override per title
//! or per level via JSON profiles.

use crate::BgmResult;
use crate::curve::FadeCurve;
use serde::{Deserialize, Serialize};

/// Engine timing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Cross-fade duration when returning to the ambient track (ms)
    #[serde(default = "default_ambient_crossfade")]
    pub ambient_crossfade_ms: u32,
    /// Background fade-out duration when entering the event track (ms)
    #[serde(default = "default_event_fade_out")]
    pub event_fade_out_ms: u32,
    /// Curve applied to transition progress
    #[serde(default)]
    pub fade_curve: FadeCurve,
}

fn default_ambient_crossfade() -> u32 {
    1500
}

fn default_event_fade_out() -> u32 {
    1000
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ambient_crossfade_ms: 1500,
            event_fade_out_ms: 1000,
            fade_curve: FadeCurve::Linear,
        }
    }
}

impl EngineConfig {
    /// Parse a config profile from JSON. Missing fields fall back to
    /// the defaults per field.
    pub fn from_json(json: &str) -> BgmResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
