//! Playback Controller
//!
//! The BGM state machine: a looping ambient background track, a
//! non-looping event track, one-shot effects, and the transitions
//! between the **Ambient** and **Event** states.
//!
//! All dependencies are injected at construction: the two track sinks,
//! a factory for transient effect sinks, the frame clock, and the
//! timing configuration. There is no ambient global state; hosts own
//! exactly one controller per process.

use crate::command::{EngineCommand, EngineState, PlayerState};
use crate::effects::{EffectBank, EffectSource};
use crate::scheduler::TransitionScheduler;
use crate::transition::{FollowUp, Transition};
use bgm_core::{
    AudioSink, CompletionAction, EngineConfig, FrameClock, SinkFactory, Track, TrackRole,
    VolumePolicy, VolumeSetting,
};
use rtrb::{Consumer, Producer};

// ═══════════════════════════════════════════════════════════════════════════
// CONTROLLER
// ═══════════════════════════════════════════════════════════════════════════

/// Orchestrates the two long-lived tracks and the volume policy through
/// the transition scheduler.
pub struct BgmController {
    background: Track,
    event: Track,
    policy: VolumePolicy,
    scheduler: TransitionScheduler,
    effects: EffectBank,
    factory: Box<dyn SinkFactory>,
    clock: Box<dyn FrameClock>,
    config: EngineConfig,
    /// Audio stays locked until the first user gesture arrives
    activated: bool,
    state: PlayerState,
    command_rx: Option<Consumer<EngineCommand>>,
    state_tx: Option<Producer<EngineState>>,
}

impl BgmController {
    /// Create a controller around the two injected track sinks.
    ///
    /// `background_uri` loads into a looping track, `event_uri` into a
    /// non-looping one. Nothing plays until [`activate`](Self::activate).
    pub fn new(
        background_uri: &str,
        background_sink: Box<dyn AudioSink>,
        event_uri: &str,
        event_sink: Box<dyn AudioSink>,
        factory: Box<dyn SinkFactory>,
        clock: Box<dyn FrameClock>,
        config: EngineConfig,
    ) -> Self {
        Self {
            background: Track::background(background_uri, background_sink),
            event: Track::event(event_uri, event_sink),
            policy: VolumePolicy::default(),
            scheduler: TransitionScheduler::new(),
            effects: EffectBank::new(),
            factory,
            clock,
            config,
            activated: false,
            state: PlayerState::Ambient,
            command_rx: None,
            state_tx: None,
        }
    }

    /// Wire up the command/state channel pair from
    /// [`create_channels`](crate::command::create_channels).
    pub fn attach_channels(
        &mut self,
        command_rx: Consumer<EngineCommand>,
        state_tx: Producer<EngineState>,
    ) {
        self.command_rx = Some(command_rx);
        self.state_tx = Some(state_tx);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // STATE MACHINE OPERATIONS
    // ═══════════════════════════════════════════════════════════════════════

    /// Unlock the engine and start the ambient track. Platform audio is
    /// typically gated on a first user gesture; until this runs, the
    /// playback operations are ignored. Idempotent.
    pub fn activate(&mut self) {
        if self.activated {
            return;
        }
        self.activated = true;
        log::info!("[Controller] activated");
        self.enter_ambient();
    }

    pub fn is_activated(&self) -> bool {
        self.activated
    }

    /// Cross-fade from the event track back to the background track.
    pub fn enter_ambient(&mut self) {
        if !self.activated {
            log::debug!("[Controller] enter_ambient ignored before activation");
            return;
        }
        self.state = PlayerState::Ambient;

        // Leaving the Event state invalidates any armed auto-return.
        self.event.clear_completion();

        // The background must be running before the fade can raise it.
        if !self.background.is_playing() {
            self.background.set_volume(0.0);
            self.background.play();
        }

        self.scheduler.start(Transition::cross_fade(
            TrackRole::Event,
            self.event.volume(),
            self.background.volume(),
            self.clock.now_ms(),
            self.config.ambient_crossfade_ms,
            self.config.fade_curve,
        ));
    }

    /// Fade the background out, then start the event track from the
    /// top. The event track auto-returns to Ambient when it finishes,
    /// unless another `enter_event` supersedes it first.
    pub fn enter_event(&mut self) {
        if !self.activated {
            log::debug!("[Controller] enter_event ignored before activation");
            return;
        }
        self.state = PlayerState::Event;

        // Stop-and-clear must happen synchronously before the new
        // sequence starts: an event track left running with its
        // continuation armed can fire a stale state change the moment
        // playback reaches its natural end.
        self.event.stop();

        self.scheduler.start(Transition::fade_out(
            TrackRole::Background,
            self.background.volume(),
            self.clock.now_ms(),
            self.config.event_fade_out_ms,
            self.config.fade_curve,
            Some(FollowUp::StartEventPlayback),
        ));
    }

    /// Swap the background source. No-op when `uri` is already loaded.
    pub fn set_background_source(&mut self, uri: &str) {
        if self.background.set_source(uri) {
            log::debug!("[Controller] background source -> {}", uri);
        }
    }

    /// Swap the event source. No-op when `uri` is already loaded. After
    /// a real swap the controller forces a return to Ambient, so a
    /// stale event track is never left audible across the change. This
    /// is the one operation that overrides the running transition
    /// instead of deferring to it.
    pub fn set_event_source(&mut self, uri: &str) {
        if self.event.set_source(uri) {
            log::debug!("[Controller] event source -> {}", uri);
            self.enter_ambient();
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // VOLUME
    // ═══════════════════════════════════════════════════════════════════════

    /// Set the master volume, clamped to `[0, 1]`. Applied to playing
    /// tracks immediately unless a transition owns their volumes.
    pub fn set_master_volume(&mut self, setting: VolumeSetting) {
        self.policy.set_master(setting);
        if !self.scheduler.is_running() {
            self.apply_effective_volume();
        }
    }

    /// Mute or unmute. Applied immediately unless a transition owns the
    /// track volumes; a running cross-fade picks the change up on its
    /// next frame through target resampling.
    pub fn set_muted(&mut self, muted: bool) {
        self.policy.set_muted(muted);
        if !self.scheduler.is_running() {
            self.apply_effective_volume();
        }
    }

    /// Push the effective volume onto whichever long-lived track plays.
    fn apply_effective_volume(&mut self) {
        let target = self.policy.effective_volume();
        if self.background.is_playing() {
            self.background.set_volume(target);
        }
        if self.event.is_playing() {
            self.event.set_volume(target);
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // ONE-SHOT EFFECTS
    // ═══════════════════════════════════════════════════════════════════════

    /// Pre-register a reusable effect under `name`.
    pub fn register_effect(&mut self, name: &str, uri: &str) {
        let sink = self.factory.create(uri);
        self.effects.register(name, sink);
    }

    /// Fire a one-shot effect. Muted engines drop effects entirely;
    /// otherwise the effect takes the master volume at trigger time and
    /// never participates in a transition.
    pub fn play_effect(&mut self, source: EffectSource) {
        if !self.activated {
            log::debug!("[Controller] play_effect ignored before activation");
            return;
        }
        if self.policy.muted() {
            return;
        }
        let volume = self.policy.master();

        match source {
            EffectSource::ByHandle(name) => {
                if let Err(e) = self.effects.trigger(&name, volume) {
                    log::warn!("[Controller] effect '{}': {}", name, e);
                }
            }
            EffectSource::ByUri(uri) => {
                let mut sink = self.factory.create(&uri);
                sink.set_volume(volume);
                match sink.play() {
                    Ok(()) => self.effects.spawn(sink),
                    Err(e) => log::warn!("[Controller] effect '{}' blocked: {}", uri, e),
                }
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // FRAME PUMP
    // ═══════════════════════════════════════════════════════════════════════

    /// Frame entry point. Drains queued commands, polls the event track
    /// for natural completion, steps the active transition, reaps
    /// finished effects, and publishes a state snapshot.
    pub fn tick(&mut self) {
        self.drain_commands();

        // A naturally finished event track re-enters the state machine.
        if let Some(action) = self.event.poll_completion() {
            self.run_completion(action);
        }

        let now = self.clock.now_ms();
        if let Some(follow_up) =
            self.scheduler
                .step(now, &self.policy, &mut self.background, &mut self.event)
        {
            self.run_follow_up(follow_up);
        }

        self.effects.reap();
        self.publish_state(now);
    }

    fn run_completion(&mut self, action: CompletionAction) {
        match action {
            CompletionAction::ReturnToAmbient => self.enter_ambient(),
        }
    }

    fn run_follow_up(&mut self, follow_up: FollowUp) {
        match follow_up {
            FollowUp::StartEventPlayback => {
                self.event.seek_to_start();
                self.event.set_volume(self.policy.effective_volume());
                self.event.play();
                self.event.set_completion(CompletionAction::ReturnToAmbient);
            }
        }
    }

    fn drain_commands(&mut self) {
        let Some(mut rx) = self.command_rx.take() else {
            return;
        };
        while let Ok(cmd) = rx.pop() {
            self.apply_command(cmd);
        }
        self.command_rx = Some(rx);
    }

    fn apply_command(&mut self, cmd: EngineCommand) {
        match cmd {
            EngineCommand::Activate => self.activate(),
            EngineCommand::EnterAmbient => self.enter_ambient(),
            EngineCommand::EnterEvent => self.enter_event(),
            EngineCommand::SetBackgroundSource(uri) => self.set_background_source(&uri),
            EngineCommand::SetEventSource(uri) => self.set_event_source(&uri),
            EngineCommand::SetMasterVolume(setting) => self.set_master_volume(setting),
            EngineCommand::SetMuted(muted) => self.set_muted(muted),
            EngineCommand::RegisterEffect { name, uri } => self.register_effect(&name, &uri),
            EngineCommand::PlayEffect(source) => self.play_effect(source),
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // STATE
    // ═══════════════════════════════════════════════════════════════════════

    /// Current state snapshot.
    pub fn state(&self) -> EngineState {
        self.snapshot(self.clock.now_ms())
    }

    fn snapshot(&self, now_ms: f64) -> EngineState {
        EngineState {
            state: self.state,
            activated: self.activated,
            transition: self.scheduler.active_kind(),
            transition_progress: self.scheduler.progress(now_ms).unwrap_or(0.0),
            master_volume: self.policy.master(),
            muted: self.policy.muted(),
            timestamp_ms: now_ms,
        }
    }

    fn publish_state(&mut self, now_ms: f64) {
        let snapshot = self.snapshot(now_ms);
        if let Some(tx) = self.state_tx.as_mut() {
            // Lossy: when the host falls behind, it reads the latest
            // snapshot it managed to keep up with.
            let _ = tx.push(snapshot);
        }
    }
}
