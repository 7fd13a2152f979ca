// src/engine/core.rs

//! Pure core of the watch loop.
//!
//! [`WatchCore`] consumes one [`LoopInput`] at a time and says what the IO
//! shell should do next. It has no channels, no processes and no filesystem
//! access, so every routing rule can be unit tested directly.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::config::WatchConfig;
use crate::engine::{LoopInput, SessionPhase};
use crate::errors::{GowatchError, Result};
use crate::watch::filter::{EventFilter, Verdict};

/// Decision returned after handling a single input.
#[derive(Debug)]
pub enum CoreStep {
    /// Nothing to do; keep waiting.
    Idle,
    /// Kill, recompile and restart because `path` changed.
    Rebuild(PathBuf),
    /// Deliberate stop; shut down without error.
    Stop,
    /// Fatal condition; shut down and report it.
    Fail(GowatchError),
}

#[derive(Debug)]
pub struct WatchCore {
    filter: EventFilter,
    phase: SessionPhase,
}

impl WatchCore {
    /// Fails with `IgnorePattern` if any ignore pattern is malformed.
    pub fn new(config: &WatchConfig) -> Result<Self> {
        Ok(Self {
            filter: EventFilter::new(config)?,
            phase: SessionPhase::Init,
        })
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Init finished: directories are registered and the program runs.
    pub fn begin(&mut self) {
        if self.phase == SessionPhase::Init {
            self.phase = SessionPhase::Running;
        }
    }

    pub fn shutdown(&mut self) {
        self.phase = SessionPhase::Shutdown;
    }

    pub fn step(&mut self, input: LoopInput) -> CoreStep {
        if self.phase == SessionPhase::Shutdown {
            return CoreStep::Stop;
        }

        match input {
            LoopInput::StopRequested => {
                info!("stop requested");
                self.shutdown();
                CoreStep::Stop
            }
            LoopInput::ChannelError(msg) => {
                self.shutdown();
                CoreStep::Fail(GowatchError::NotificationChannel(msg))
            }
            LoopInput::ChannelClosed => {
                self.shutdown();
                CoreStep::Fail(GowatchError::NotificationChannel(
                    "event stream closed".to_string(),
                ))
            }
            LoopInput::Change(event) => match self.filter.classify(&event) {
                Verdict::Trigger => {
                    info!(path = ?event.path, "modified file");
                    CoreStep::Rebuild(event.path)
                }
                verdict => {
                    debug!(path = ?event.path, kind = ?event.kind, ?verdict, "no rebuild");
                    CoreStep::Idle
                }
            },
        }
    }
}
