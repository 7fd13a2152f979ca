// src/watch/watcher.rs

use std::fmt;
use std::path::Path;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::errors::{GowatchError, Result};
use crate::types::{ChangeEvent, ChangeKind};

/// Registration side of the notification primitive.
///
/// Production code uses [`NotifyBackend`]; tests substitute a fake that
/// records which paths were added and how often it was closed.
pub trait WatchBackend: Send {
    /// Start watching a single directory (non-recursively).
    fn add(&mut self, path: &Path) -> Result<()>;

    /// Release every OS watch. Must be safe to call more than once.
    fn close(&mut self) -> Result<()>;
}

/// What the watch loop receives while waiting on a subscription.
#[derive(Debug)]
pub enum Notification {
    Event(ChangeEvent),
    Error(notify::Error),
    /// The event stream ended; nothing more will ever arrive.
    Closed,
}

/// A live subscription: a backend for registering directories plus the two
/// streams it feeds (change events and watcher errors).
pub struct Subscription {
    backend: Box<dyn WatchBackend>,
    events: mpsc::UnboundedReceiver<ChangeEvent>,
    errors: mpsc::UnboundedReceiver<notify::Error>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

impl Subscription {
    pub fn new(
        backend: Box<dyn WatchBackend>,
        events: mpsc::UnboundedReceiver<ChangeEvent>,
        errors: mpsc::UnboundedReceiver<notify::Error>,
    ) -> Self {
        Self {
            backend,
            events,
            errors,
        }
    }

    pub fn add(&mut self, path: &Path) -> Result<()> {
        self.backend.add(path)
    }

    pub fn close(&mut self) -> Result<()> {
        self.backend.close()
    }

    /// Wait for the next error or event, errors first.
    ///
    /// Cancel-safe: dropping the future never loses a message.
    pub async fn recv(&mut self) -> Notification {
        tokio::select! {
            biased;
            Some(err) = self.errors.recv() => Notification::Error(err),
            event = self.events.recv() => match event {
                Some(event) => Notification::Event(event),
                None => Notification::Closed,
            },
        }
    }
}

/// [`WatchBackend`] over `notify`'s platform watcher.
pub struct NotifyBackend {
    watcher: Option<RecommendedWatcher>,
}

impl fmt::Debug for NotifyBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotifyBackend")
            .field("open", &self.watcher.is_some())
            .finish()
    }
}

impl WatchBackend for NotifyBackend {
    fn add(&mut self, path: &Path) -> Result<()> {
        let watcher = self.watcher.as_mut().ok_or_else(|| GowatchError::DirectoryRegistration {
            path: path.to_path_buf(),
            source: notify::Error::generic("watcher already closed"),
        })?;
        watcher
            .watch(path, RecursiveMode::NonRecursive)
            .map_err(|source| GowatchError::DirectoryRegistration {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(?path, "watching directory");
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if self.watcher.take().is_some() {
            info!("file watcher closed");
        }
        Ok(())
    }
}

/// Create a `notify`-backed subscription with nothing registered yet.
///
/// Access events are dropped here; every other notify event becomes one
/// [`ChangeEvent`] per affected path.
pub fn subscribe() -> Result<Subscription> {
    let (event_tx, event_rx) = mpsc::unbounded_channel::<ChangeEvent>();
    let (error_tx, error_rx) = mpsc::unbounded_channel::<notify::Error>();

    // Called synchronously on notify's own thread.
    let watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if matches!(event.kind, EventKind::Access(_)) {
                    return;
                }
                let kind = ChangeKind::from(&event.kind);
                for path in event.paths {
                    if event_tx.send(ChangeEvent::new(path, kind)).is_err() {
                        // Receiver gone: the session is shutting down.
                        return;
                    }
                }
            }
            Err(err) => {
                let _ = error_tx.send(err);
            }
        },
        Config::default(),
    )
    .map_err(GowatchError::WatchInit)?;

    let backend = NotifyBackend {
        watcher: Some(watcher),
    };
    Ok(Subscription::new(Box::new(backend), event_rx, error_rx))
}
