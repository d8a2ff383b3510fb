//! Track Wrapper
//!
//! A named, independently controllable audio source: one sink plus a
//! single-slot completion continuation. The continuation is an explicit
//! value, not a closure; the controller polls for natural completion
//! each frame and executes the action itself.

use crate::sink::AudioSink;

/// Follow-up executed when a track finishes playing naturally.
/// Cleared the moment it fires, and cleared by [`Track::stop`] before it
/// can fire stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionAction {
    /// Cross-fade back to the background track.
    ReturnToAmbient,
}

/// Role of a long-lived track within the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackRole {
    Background,
    Event,
}

/// A controllable audio source with a completion slot.
pub struct Track {
    name: &'static str,
    source: String,
    sink: Box<dyn AudioSink>,
    on_complete: Option<CompletionAction>,
}

impl Track {
    pub fn new(name: &'static str, uri: &str, mut sink: Box<dyn AudioSink>, looping: bool) -> Self {
        sink.set_source(uri);
        sink.set_looping(looping);
        Self {
            name,
            source: uri.to_string(),
            sink,
            on_complete: None,
        }
    }

    /// Looping background track.
    pub fn background(uri: &str, sink: Box<dyn AudioSink>) -> Self {
        Self::new("background", uri, sink, true)
    }

    /// Non-looping event track.
    pub fn event(uri: &str, sink: Box<dyn AudioSink>) -> Self {
        Self::new("event", uri, sink, false)
    }

    /// Best-effort playback start. Rejection is logged and swallowed;
    /// the caller may retry on a later operation.
    pub fn play(&mut self) {
        if let Err(e) = self.sink.play() {
            log::warn!("[Track] {} play blocked: {}", self.name, e);
        }
    }

    pub fn pause(&mut self) {
        self.sink.pause();
    }

    pub fn seek_to_start(&mut self) {
        self.sink.seek_to_start();
    }

    pub fn volume(&self) -> f32 {
        self.sink.volume()
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.sink.set_volume(volume);
    }

    pub fn is_playing(&self) -> bool {
        self.sink.is_playing()
    }

    pub fn position_ms(&self) -> f64 {
        self.sink.position_ms()
    }

    /// Currently loaded source URI.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Replace the source. Returns `false` without touching the sink
    /// when `uri` is already loaded, so a redundant swap never restarts
    /// audible playback. Otherwise swaps, rewinds, and resumes playback
    /// if the track was playing.
    pub fn set_source(&mut self, uri: &str) -> bool {
        if self.source == uri {
            return false;
        }

        let was_playing = self.sink.is_playing();
        self.sink.pause();
        self.sink.set_source(uri);
        self.sink.seek_to_start();
        self.source = uri.to_string();

        if was_playing {
            self.play();
        }
        true
    }

    /// Register the completion continuation, replacing any previous one.
    pub fn set_completion(&mut self, action: CompletionAction) {
        self.on_complete = Some(action);
    }

    pub fn clear_completion(&mut self) {
        self.on_complete = None;
    }

    pub fn completion(&self) -> Option<CompletionAction> {
        self.on_complete
    }

    /// Stop the track for re-use: clear the completion slot, pause, and
    /// rewind, all in the same synchronous step. A track stopped with
    /// its continuation left armed can still fire it once playback
    /// reaches the natural end (the zombie-track hazard).
    pub fn stop(&mut self) {
        self.on_complete = None;
        self.sink.pause();
        self.sink.seek_to_start();
    }

    /// Poll natural end-of-stream. Returns the continuation (taken, so
    /// it fires at most once) if the track just finished.
    pub fn poll_completion(&mut self) -> Option<CompletionAction> {
        if self.sink.take_ended() {
            self.on_complete.take()
        } else {
            None
        }
    }
}
