use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use gowatch::errors::{GowatchError, Result};
use gowatch::exec::{BoxFuture, Supervisor};

/// What a restart of the [`FakeSupervisor`] should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartOutcome {
    Succeed,
    CompileFails,
    StartFails,
    KillFails,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorCall {
    Compile,
    Start,
    /// Restart requested for the handle with this id.
    Restart(u32),
}

/// Stand-in for a running program; ids increase with every start.
#[derive(Debug, PartialEq, Eq)]
pub struct FakeHandle {
    pub id: u32,
}

/// A fake supervisor that:
/// - records every call
/// - never spawns a process
/// - fails in the configured way
pub struct FakeSupervisor {
    calls: Arc<Mutex<Vec<SupervisorCall>>>,
    next_id: u32,
    initial_compile_fails: bool,
    restart_outcome: RestartOutcome,
}

impl FakeSupervisor {
    pub fn new(calls: Arc<Mutex<Vec<SupervisorCall>>>) -> Self {
        Self {
            calls,
            next_id: 1,
            initial_compile_fails: false,
            restart_outcome: RestartOutcome::Succeed,
        }
    }

    pub fn with_restart_outcome(mut self, outcome: RestartOutcome) -> Self {
        self.restart_outcome = outcome;
        self
    }

    pub fn with_failing_initial_compile(mut self) -> Self {
        self.initial_compile_fails = true;
        self
    }

    fn record(&self, call: SupervisorCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn next_handle(&mut self) -> FakeHandle {
        let handle = FakeHandle { id: self.next_id };
        self.next_id += 1;
        handle
    }
}

fn fake_io_error() -> io::Error {
    io::Error::new(io::ErrorKind::PermissionDenied, "fake failure")
}

impl Supervisor for FakeSupervisor {
    type Handle = FakeHandle;

    fn compile(&mut self) -> BoxFuture<'_, Result<()>> {
        self.record(SupervisorCall::Compile);
        let fails = self.initial_compile_fails;
        Box::pin(async move {
            if fails {
                return Err(GowatchError::CompileFailed("fake compile failure".into()));
            }
            Ok(())
        })
    }

    fn start(&mut self) -> BoxFuture<'_, Result<FakeHandle>> {
        self.record(SupervisorCall::Start);
        let handle = self.next_handle();
        Box::pin(async move { Ok(handle) })
    }

    fn restart<'a>(
        &'a mut self,
        current: &'a mut FakeHandle,
    ) -> BoxFuture<'a, Result<FakeHandle>> {
        self.record(SupervisorCall::Restart(current.id));
        Box::pin(async move {
            // Yield so rebuilds are observably asynchronous.
            tokio::task::yield_now().await;
            match self.restart_outcome {
                RestartOutcome::Succeed => Ok(self.next_handle()),
                RestartOutcome::CompileFails => {
                    Err(GowatchError::CompileFailed("fake compile failure".into()))
                }
                RestartOutcome::StartFails => Err(GowatchError::ProcessStartFailed {
                    path: PathBuf::from("fake-binary"),
                    source: fake_io_error(),
                }),
                RestartOutcome::KillFails => Err(GowatchError::ProcessKillFailed {
                    pid: current.id,
                    source: fake_io_error(),
                }),
            }
        })
    }
}
