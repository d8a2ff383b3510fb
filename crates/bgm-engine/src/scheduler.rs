//! Transition Scheduler
//!
//! Owns the single active transition. Starting a new transition
//! unconditionally supersedes the running one: the superseded
//! transition's follow-up never runs, and its frame steps can never
//! resume because no handle to it survives. At most one transition is
//! alive system-wide.

use crate::transition::{FollowUp, Transition, TransitionKind};
use bgm_core::{Track, TrackRole, VolumePolicy};

/// Idle/Running state machine driving the active transition.
#[derive(Default)]
pub struct TransitionScheduler {
    active: Option<Transition>,
}

impl TransitionScheduler {
    pub fn new() -> Self {
        Self { active: None }
    }

    /// Whether a transition is currently running.
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_kind(&self) -> Option<TransitionKind> {
        self.active.as_ref().map(|t| t.kind)
    }

    /// Progress of the active transition, if any.
    pub fn progress(&self, now_ms: f64) -> Option<f32> {
        self.active.as_ref().map(|t| t.progress(now_ms))
    }

    /// Begin a transition, superseding whatever is running.
    pub fn start(&mut self, transition: Transition) {
        if let Some(prev) = self.cancel() {
            log::debug!("[Scheduler] superseding {:?} transition", prev.kind);
        }
        log::debug!(
            "[Scheduler] start {:?} out={:?} dur={}ms",
            transition.kind,
            transition.out,
            transition.duration_ms
        );
        self.active = Some(transition);
    }

    /// Discard the active transition without running its follow-up.
    pub fn cancel(&mut self) -> Option<Transition> {
        self.active.take()
    }

    /// Advance the active transition one frame: write participant
    /// volumes, and on completion park the out track, snap the in track
    /// to the exact target, and hand back the follow-up.
    ///
    /// The effective volume is resampled from `policy` on every call,
    /// so a mute or master change mid-fade lands on the next frame.
    pub fn step(
        &mut self,
        now_ms: f64,
        policy: &VolumePolicy,
        background: &mut Track,
        event: &mut Track,
    ) -> Option<FollowUp> {
        let target = policy.effective_volume();

        let t = self.active.as_ref()?;
        let kind = t.kind;
        let out_role = t.out;
        let progress = t.progress(now_ms);
        let out_vol = t.out_volume(progress);
        let in_vol = t.in_volume(progress, target);

        let (out_track, in_track) = split_by_role(out_role, background, event);
        out_track.set_volume(out_vol);
        if kind == TransitionKind::CrossFade {
            in_track.set_volume(in_vol);
        }

        if progress < 1.0 {
            return None;
        }

        // Finished. The out track is silent: park it rewound for re-use.
        // The in track snaps to the exact target, shedding any
        // floating-point residue from the interpolation.
        let done = self.active.take()?;
        out_track.pause();
        out_track.seek_to_start();
        if kind == TransitionKind::CrossFade {
            in_track.set_volume(target);
        }
        log::debug!("[Scheduler] {:?} complete", kind);
        done.follow_up
    }
}

/// Resolve the out-track role to (out, in) mutable references.
fn split_by_role<'a>(
    out: TrackRole,
    background: &'a mut Track,
    event: &'a mut Track,
) -> (&'a mut Track, &'a mut Track) {
    match out {
        TrackRole::Background => (background, event),
        TrackRole::Event => (event, background),
    }
}
