//! # BGM Core
//!
//! Primitives for the frame-driven BGM mixing and transition engine.
//!
//! ## Architecture
//!
//! - **Sinks**: the injected playback primitive behind each track
//! - **Tracks**: named audio sources with a single-slot completion continuation
//! - **Volume**: master/mute policy and coercion of host volume input
//! - **Clock**: frame-time capability (wall time or manually advanced)
//! - **Curves**: fade shaping applied to transition progress
//! - **Config**: fade timings as data, not hard-coded literals
//!
//! ## Concurrency
//!
//! Everything here is single-threaded and cooperative. The engine crate
//! pumps one tick per visual frame; no locks, no worker threads.

pub mod clock;
pub mod config;
pub mod curve;
pub mod sink;
pub mod track;
pub mod volume;

pub use clock::*;
pub use config::*;
pub use curve::*;
pub use sink::*;
pub use track::*;
pub use volume::*;

use thiserror::Error;

/// BGM engine error types
#[derive(Debug, Error)]
pub enum BgmError {
    #[error("Unknown effect: {0}")]
    UnknownEffect(String),

    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type BgmResult<T> = Result<T, BgmError>;

/// Lower bound for any track or master volume
pub const MIN_VOLUME: f32 = 0.0;

/// Upper bound for any track or master volume
pub const MAX_VOLUME: f32 = 1.0;
