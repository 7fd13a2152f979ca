// src/engine/runtime.rs

use std::fmt;
use std::sync::Arc;

use tokio::sync::oneshot;
use tracing::{debug, info, info_span, warn, Instrument};

use crate::config::WatchConfig;
use crate::errors::Result;
use crate::exec::Supervisor;
use crate::fs::FileSystem;
use crate::watch::{DirectorySet, Notification, Subscription};

use super::core::{CoreStep, WatchCore};
use super::LoopInput;

/// Drives one watch session.
///
/// This is the IO shell around [`WatchCore`]: it owns the directory set,
/// the notification subscription, the supervisor and the stop signal. All of
/// them are touched only from this loop, so no locking is needed.
pub struct WatchLoop<S: Supervisor> {
    core: WatchCore,
    fs: Arc<dyn FileSystem>,
    directories: DirectorySet,
    subscription: Subscription,
    supervisor: S,
    stop_rx: oneshot::Receiver<()>,
}

impl<S: Supervisor> fmt::Debug for WatchLoop<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchLoop")
            .field("core", &self.core)
            .field("directories", &self.directories.len())
            .finish_non_exhaustive()
    }
}

impl<S: Supervisor> WatchLoop<S> {
    /// Fails with `IgnorePattern` before anything is started if an ignore
    /// pattern is malformed.
    pub fn new(
        config: &WatchConfig,
        fs: Arc<dyn FileSystem>,
        subscription: Subscription,
        supervisor: S,
        stop_rx: oneshot::Receiver<()>,
    ) -> Result<Self> {
        Ok(Self {
            core: WatchCore::new(config)?,
            fs,
            directories: DirectorySet::new(config.root()),
            subscription,
            supervisor,
            stop_rx,
        })
    }

    /// Run until a stop request (`Ok(())`) or a fatal error.
    ///
    /// The subscription is closed exactly once on every exit path.
    pub async fn run(mut self) -> Result<()> {
        let span = info_span!("watch", root = ?self.directories.root());
        let result = self.drive().instrument(span).await;
        self.core.shutdown();

        let closed = self.subscription.close();
        match (result, closed) {
            (Err(err), closed) => {
                if let Err(close_err) = closed {
                    warn!(error = %close_err, "failed to close file watcher");
                }
                Err(err)
            }
            (Ok(()), closed) => closed,
        }
    }

    async fn drive(&mut self) -> Result<()> {
        self.supervisor.compile().await?;
        let mut handle = self.supervisor.start().await?;

        self.register_new_directories()?;
        self.core.begin();
        info!(directories = self.directories.len(), "watching for changes");

        loop {
            self.register_new_directories()?;

            let input = self.wait().await;
            match self.core.step(input) {
                CoreStep::Idle => {}
                CoreStep::Rebuild(_path) => {
                    match self.supervisor.restart(&mut handle).await {
                        Ok(new_handle) => handle = new_handle,
                        Err(err) if err.is_recoverable() => {
                            warn!(error = %err, "rebuild failed; waiting for the next change");
                        }
                        Err(err) => return Err(err),
                    }
                }
                CoreStep::Stop => {
                    info!("stopping program");
                    drop(handle);
                    return Ok(());
                }
                CoreStep::Fail(err) => return Err(err),
            }
        }
    }

    /// Register every directory discovered since the last scan.
    fn register_new_directories(&mut self) -> Result<()> {
        for dir in self.directories.refresh(self.fs.as_ref())? {
            self.subscription.add(&dir)?;
        }
        Ok(())
    }

    /// Wait for a stop request, a watcher error or an event, in that order
    /// of preference.
    async fn wait(&mut self) -> LoopInput {
        tokio::select! {
            biased;
            stop = &mut self.stop_rx => {
                if stop.is_err() {
                    debug!("stop sender dropped; treating as stop request");
                }
                LoopInput::StopRequested
            }
            notification = self.subscription.recv() => match notification {
                Notification::Event(event) => LoopInput::Change(event),
                Notification::Error(err) => LoopInput::ChannelError(err.to_string()),
                Notification::Closed => LoopInput::ChannelClosed,
            },
        }
    }
}
