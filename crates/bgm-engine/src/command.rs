//! Engine Commands
//!
//! Lock-free channel mirror of the controller's public operations, for
//! hosts that drive the engine from a game/UI thread. Commands drain at
//! the top of every tick and apply in post order, so they observe the
//! same run-to-completion semantics as direct calls.

use crate::effects::EffectSource;
use crate::transition::TransitionKind;
use bgm_core::VolumeSetting;
use rtrb::{Consumer, Producer, RingBuffer};

/// Commands from the host thread to the engine
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCommand {
    /// Unlock audio after the first user gesture
    Activate,
    /// Cross-fade to the background track
    EnterAmbient,
    /// Fade the background out and hand off to the event track
    EnterEvent,
    SetBackgroundSource(String),
    SetEventSource(String),
    SetMasterVolume(VolumeSetting),
    SetMuted(bool),
    RegisterEffect { name: String, uri: String },
    PlayEffect(EffectSource),
}

/// High-level controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    /// Background track audible, event track parked
    Ambient,
    /// Event track audible (or fading in), background parked
    Event,
}

/// Snapshot published to the host after every tick
#[derive(Debug, Clone, PartialEq)]
pub struct EngineState {
    pub state: PlayerState,
    pub activated: bool,
    /// Kind of the in-flight transition, if any
    pub transition: Option<TransitionKind>,
    /// Progress of the in-flight transition (0.0 when idle)
    pub transition_progress: f32,
    pub master_volume: f32,
    pub muted: bool,
    /// Clock timestamp of the tick that produced this snapshot (ms)
    pub timestamp_ms: f64,
}

/// Capacity of the command ring buffer
pub const COMMAND_QUEUE_CAPACITY: usize = 256;

/// Capacity of the state ring buffer
pub const STATE_QUEUE_CAPACITY: usize = 64;

/// Create the command/state channel pairs.
///
/// Returns `(cmd_tx, state_rx, cmd_rx, state_tx)`: the first two stay
/// with the host, the last two are handed to
/// [`BgmController::attach_channels`](crate::controller::BgmController::attach_channels).
pub fn create_channels() -> (
    Producer<EngineCommand>,
    Consumer<EngineState>,
    Consumer<EngineCommand>,
    Producer<EngineState>,
) {
    let (cmd_tx, cmd_rx) = RingBuffer::new(COMMAND_QUEUE_CAPACITY);
    let (state_tx, state_rx) = RingBuffer::new(STATE_QUEUE_CAPACITY);
    (cmd_tx, state_rx, cmd_rx, state_tx)
}
