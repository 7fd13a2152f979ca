// src/engine/mod.rs

//! Watch-session engine.
//!
//! This module ties together:
//! - directory discovery and registration
//! - the event filter
//! - the process supervisor
//! - the stop signal
//!
//! The pure per-event decision logic lives in [`core`]; the async/IO shell
//! that waits on notifications and drives the supervisor is [`runtime`].

use crate::types::ChangeEvent;

/// Session phase. `Shutdown` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Init,
    Running,
    Shutdown,
}

/// Whatever the loop observed first while waiting.
#[derive(Debug)]
pub enum LoopInput {
    Change(ChangeEvent),
    /// The notification primitive reported an error.
    ChannelError(String),
    /// The notification stream ended.
    ChannelClosed,
    StopRequested,
}

pub mod core;
pub mod runtime;

pub use core::{CoreStep, WatchCore};
pub use runtime::WatchLoop;
