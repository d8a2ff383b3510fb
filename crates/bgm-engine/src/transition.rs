//! Transition State
//!
//! A transition is a timed interpolation of one or two tracks' volumes.
//! Interpolation always starts from volume snapshots captured at the
//! instant the transition begins, so a transition that supersedes
//! another mid-flight resumes from the live audible level instead of
//! jumping. Progress is clamped to `[0, 1]` on both ends, which keeps
//! every frame step bounded under clock jitter.

use bgm_core::{FadeCurve, TrackRole};

/// Action the controller runs when a transition completes. A cancelled
/// transition never yields its follow-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowUp {
    /// Start the event track from the top (the enter-event handoff).
    StartEventPlayback,
}

/// Which interpolation a transition performs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// One track to silence
    FadeOut,
    /// The out track to silence while the in track rises to the
    /// effective volume
    CrossFade,
}

/// The single active transition
#[derive(Debug, Clone)]
pub struct Transition {
    pub kind: TransitionKind,
    /// Track being faded to silence
    pub out: TrackRole,
    /// Volume of the out track when the transition started
    pub out_snapshot: f32,
    /// Volume of the in track when the transition started (cross-fade only)
    pub in_snapshot: f32,
    /// Clock timestamp at start (ms)
    pub started_at_ms: f64,
    /// Duration (ms), always > 0
    pub duration_ms: f64,
    pub curve: FadeCurve,
    pub follow_up: Option<FollowUp>,
}

impl Transition {
    /// Fade a single track to silence.
    pub fn fade_out(
        out: TrackRole,
        out_snapshot: f32,
        started_at_ms: f64,
        duration_ms: u32,
        curve: FadeCurve,
        follow_up: Option<FollowUp>,
    ) -> Self {
        Self {
            kind: TransitionKind::FadeOut,
            out,
            out_snapshot,
            in_snapshot: 0.0,
            started_at_ms,
            duration_ms: duration_ms.max(1) as f64,
            curve,
            follow_up,
        }
    }

    /// Fade the out track to silence while the opposite track rises
    /// toward the effective volume.
    pub fn cross_fade(
        out: TrackRole,
        out_snapshot: f32,
        in_snapshot: f32,
        started_at_ms: f64,
        duration_ms: u32,
        curve: FadeCurve,
    ) -> Self {
        Self {
            kind: TransitionKind::CrossFade,
            out,
            out_snapshot,
            in_snapshot,
            started_at_ms,
            duration_ms: duration_ms.max(1) as f64,
            curve,
            follow_up: None,
        }
    }

    /// The track being faded in.
    pub fn in_role(&self) -> TrackRole {
        match self.out {
            TrackRole::Background => TrackRole::Event,
            TrackRole::Event => TrackRole::Background,
        }
    }

    /// Progress in `[0, 1]`, clamped against clock jitter on both ends.
    pub fn progress(&self, now_ms: f64) -> f32 {
        let elapsed = now_ms - self.started_at_ms;
        (elapsed / self.duration_ms).clamp(0.0, 1.0) as f32
    }

    /// Volume of the out track at `progress`.
    pub fn out_volume(&self, progress: f32) -> f32 {
        (self.out_snapshot * (1.0 - self.curve.apply(progress))).max(0.0)
    }

    /// Volume of the in track at `progress`, interpolating from the
    /// start snapshot toward `target`. The caller resamples `target`
    /// every frame so a mute or master change mid-fade is honored
    /// immediately.
    pub fn in_volume(&self, progress: f32, target: f32) -> f32 {
        self.in_snapshot + (target - self.in_snapshot) * self.curve.apply(progress)
    }

    pub fn is_complete(&self, now_ms: f64) -> bool {
        self.progress(now_ms) >= 1.0
    }
}
