//! Volume Policy
//!
//! Master volume and mute flag. Pure: computes the effective target for
//! any live track, never touches tracks itself. The controller decides
//! when values get pushed: immediately when idle, or deferred to the
//! active transition which owns track volumes until it finishes.

use crate::{MAX_VOLUME, MIN_VOLUME};

/// Default master volume (50%)
pub const DEFAULT_MASTER_VOLUME: f32 = 0.5;

/// Volume input as supplied by the host layer.
///
/// UI bindings deliver sliders as numbers and text fields as strings;
/// both resolve through the same clamping rules, and garbage resolves
/// to silence rather than surfacing an error.
#[derive(Debug, Clone, PartialEq)]
pub enum VolumeSetting {
    Level(f32),
    Text(String),
}

impl VolumeSetting {
    /// Resolve to a clamped `[0, 1]` level. Non-finite and unparseable
    /// input resolves to 0.
    pub fn resolve(&self) -> f32 {
        let raw = match self {
            VolumeSetting::Level(v) => *v,
            VolumeSetting::Text(s) => s.trim().parse::<f32>().unwrap_or(0.0),
        };
        if raw.is_finite() {
            raw.clamp(MIN_VOLUME, MAX_VOLUME)
        } else {
            0.0
        }
    }
}

/// Master volume + mute flag.
#[derive(Debug, Clone)]
pub struct VolumePolicy {
    master: f32,
    muted: bool,
}

impl Default for VolumePolicy {
    fn default() -> Self {
        Self {
            master: DEFAULT_MASTER_VOLUME,
            muted: false,
        }
    }
}

impl VolumePolicy {
    /// Set the master volume from host input, clamped to `[0, 1]`.
    pub fn set_master(&mut self, setting: VolumeSetting) {
        self.master = setting.resolve();
    }

    pub fn master(&self) -> f32 {
        self.master
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    /// Effective volume for any live track.
    #[inline]
    pub fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master }
    }
}
