// src/exec/supervisor.rs

//! Real process supervisor: `go build` + spawn + kill.

use std::fmt;
use std::io;
use std::sync::Arc;

use tokio::process::Child;
use tracing::{debug, info, warn};

use crate::config::WatchConfig;
use crate::errors::{GowatchError, Result};
use crate::exec::backend::{BoxFuture, Supervisor};
use crate::exec::command::{build_command, describe, run_command};
use crate::fs::FileSystem;
use crate::types::SupervisorState;

#[cfg(unix)]
const ESRCH: i32 = 3;

/// A running instance of the compiled program.
///
/// The child is spawned with `kill_on_drop`, so dropping the handle on any
/// exit path terminates the process.
pub struct ProcessHandle {
    child: Child,
    pid: u32,
}

impl fmt::Debug for ProcessHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessHandle").field("pid", &self.pid).finish()
    }
}

impl ProcessHandle {
    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Returns true if the process has exited (without blocking).
    pub fn has_exited(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(Some(_)))
    }

    /// Kill and reap the process.
    ///
    /// A process that already exited is not an error; only a failure to
    /// deliver the signal to a live process is.
    pub async fn kill(&mut self) -> Result<()> {
        match self.child.start_kill() {
            Ok(()) => {
                if let Err(err) = self.child.wait().await {
                    warn!(pid = self.pid, error = %err, "failed to reap killed process");
                }
                Ok(())
            }
            Err(err) if already_exited(&err) => {
                debug!(pid = self.pid, "process already exited; nothing to kill");
                Ok(())
            }
            Err(source) => Err(GowatchError::ProcessKillFailed {
                pid: self.pid,
                source,
            }),
        }
    }
}

fn already_exited(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::InvalidInput | io::ErrorKind::NotFound
    ) || is_no_such_process(err)
}

#[cfg(unix)]
fn is_no_such_process(err: &io::Error) -> bool {
    err.raw_os_error() == Some(ESRCH)
}

#[cfg(not(unix))]
fn is_no_such_process(_err: &io::Error) -> bool {
    false
}

/// Compiles and runs the program under watch.
///
/// Restart order is kill, then compile, then start: a failed compile leaves
/// the session without a running program until the next good build.
#[derive(Debug)]
pub struct ProcessSupervisor {
    config: Arc<WatchConfig>,
    fs: Arc<dyn FileSystem>,
    state: SupervisorState,
}

impl ProcessSupervisor {
    pub fn new(config: Arc<WatchConfig>, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            config,
            fs,
            state: SupervisorState::NotStarted,
        }
    }

    pub fn state(&self) -> SupervisorState {
        self.state
    }

    /// Delete a stale artifact so a failed build cannot leave an old binary
    /// looking like a fresh one.
    fn remove_stale_artifact(&self) -> Result<()> {
        let artifact = self.config.artifact();
        if self.fs.exists(artifact) {
            debug!(?artifact, "removing existing binary");
            self.fs.remove_file(artifact)?;
        }
        Ok(())
    }

    async fn compile_inner(&mut self) -> Result<()> {
        self.state = SupervisorState::Compiling;
        self.remove_stale_artifact()?;

        let cmdline = describe(&self.config);
        info!(cmd = %cmdline, "compiling");

        let status = match build_command(&self.config).status().await {
            Ok(status) => status,
            Err(err) => {
                self.state = SupervisorState::CompileFailed;
                return Err(GowatchError::CompileFailed(format!(
                    "could not launch `{cmdline}`: {err}"
                )));
            }
        };

        if !status.success() {
            self.state = SupervisorState::CompileFailed;
            return Err(GowatchError::CompileFailed(format!(
                "`{cmdline}` exited with {status}"
            )));
        }

        debug!("compile succeeded");
        Ok(())
    }

    fn start_inner(&mut self) -> Result<ProcessHandle> {
        let artifact = self.config.artifact().to_path_buf();
        let child = run_command(&self.config)
            .spawn()
            .map_err(|source| GowatchError::ProcessStartFailed {
                path: artifact.clone(),
                source,
            })?;
        let pid = child.id().unwrap_or_default();
        self.state = SupervisorState::Running;
        info!(pid, ?artifact, "program started");
        Ok(ProcessHandle { child, pid })
    }
}

impl Supervisor for ProcessSupervisor {
    type Handle = ProcessHandle;

    fn compile(&mut self) -> BoxFuture<'_, Result<()>> {
        Box::pin(self.compile_inner())
    }

    fn start(&mut self) -> BoxFuture<'_, Result<ProcessHandle>> {
        Box::pin(async move { self.start_inner() })
    }

    fn restart<'a>(
        &'a mut self,
        current: &'a mut ProcessHandle,
    ) -> BoxFuture<'a, Result<ProcessHandle>> {
        Box::pin(async move {
            self.state = SupervisorState::Restarting;
            debug!(pid = current.pid(), "killing current execution");
            current.kill().await?;

            debug!("recompiling");
            self.compile_inner().await?;
            self.start_inner()
        })
    }
}
