//! # BGM Engine
//!
//! Frame-driven mixing and transition engine for game background music.
//!
//! ## Architecture
//!
//! - **Transitions**: snapshot-based FadeOut / CrossFade interpolation
//! - **Scheduler**: one active transition, unconditional supersession
//! - **Controller**: the Ambient/Event state machine plus one-shot effects
//! - **Commands**: lock-free channel mirror of the public operations
//!
//! ## Concurrency
//!
//! Single-threaded and cooperative. The host pumps
//! [`BgmController::tick`] once per visual frame; every entry point runs
//! to completion before the next frame step, so no caller can observe a
//! half-applied transition. The only cross-thread seam is the SPSC
//! command/state channel pair (rtrb).

pub mod command;
pub mod controller;
pub mod effects;
pub mod scheduler;
pub mod transition;

pub use command::*;
pub use controller::*;
pub use effects::*;
pub use scheduler::*;
pub use transition::*;
