//! One-Shot Effects
//!
//! Fire-and-forget SFX playback. Effects participate in no transition:
//! they take the master volume at trigger time and the engine forgets
//! them once started. Frequently used effects live in the bank under a
//! handle and are rewound and replayed; ad-hoc effects get a transient
//! sink that is reaped after its natural end.

use bgm_core::{AudioSink, BgmError, BgmResult};
use std::collections::HashMap;

/// One-shot effect argument: a pre-registered handle or a raw URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectSource {
    /// Replay an effect registered in the bank
    ByHandle(String),
    /// Mint a transient sink for this URI
    ByUri(String),
}

/// Registered one-shot effects plus in-flight transients.
#[derive(Default)]
pub struct EffectBank {
    effects: HashMap<String, Box<dyn AudioSink>>,
    transients: Vec<Box<dyn AudioSink>>,
}

impl EffectBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) an effect under `name`.
    pub fn register(&mut self, name: &str, sink: Box<dyn AudioSink>) {
        self.effects.insert(name.to_string(), sink);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.effects.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Rewind and replay a registered effect at `volume`.
    pub fn trigger(&mut self, name: &str, volume: f32) -> BgmResult<()> {
        let sink = self
            .effects
            .get_mut(name)
            .ok_or_else(|| BgmError::UnknownEffect(name.to_string()))?;

        sink.seek_to_start();
        sink.set_volume(volume);
        sink.play()?;
        Ok(())
    }

    /// Adopt a transient sink until it finishes.
    pub fn spawn(&mut self, sink: Box<dyn AudioSink>) {
        self.transients.push(sink);
    }

    pub fn transient_count(&self) -> usize {
        self.transients.len()
    }

    /// Drop transients that reached their natural end.
    pub fn reap(&mut self) {
        self.transients
            .retain_mut(|sink| !sink.take_ended() && sink.is_playing());
    }
}
