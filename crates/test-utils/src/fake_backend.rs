use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use gowatch::errors::{GowatchError, Result};
use gowatch::types::ChangeEvent;
use gowatch::watch::{Subscription, WatchBackend};

#[derive(Debug, Default)]
struct LogInner {
    added: Vec<PathBuf>,
    closes: usize,
}

/// Shared record of what the watch loop did with its subscription.
#[derive(Debug, Clone, Default)]
pub struct BackendLog {
    inner: Arc<Mutex<LogInner>>,
}

impl BackendLog {
    pub fn added(&self) -> Vec<PathBuf> {
        self.inner.lock().unwrap().added.clone()
    }

    pub fn is_watching(&self, path: &Path) -> bool {
        self.inner.lock().unwrap().added.iter().any(|p| p == path)
    }

    pub fn close_count(&self) -> usize {
        self.inner.lock().unwrap().closes
    }
}

/// A fake notification backend that:
/// - records every registered directory
/// - counts `close` calls
/// - optionally refuses to register one specific path
pub struct FakeWatchBackend {
    log: BackendLog,
    reject: Option<PathBuf>,
    closed: bool,
}

impl WatchBackend for FakeWatchBackend {
    fn add(&mut self, path: &Path) -> Result<()> {
        if self.closed || self.reject.as_deref() == Some(path) {
            return Err(GowatchError::DirectoryRegistration {
                path: path.to_path_buf(),
                source: notify::Error::generic("fake backend refused path"),
            });
        }
        self.log.inner.lock().unwrap().added.push(path.to_path_buf());
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        self.log.inner.lock().unwrap().closes += 1;
        Ok(())
    }
}

/// Test-side handle for pushing notifications into a fake subscription.
///
/// Dropping it closes the event stream, which the watch loop treats as fatal.
#[derive(Clone)]
pub struct FakeNotifier {
    events: mpsc::UnboundedSender<ChangeEvent>,
    errors: mpsc::UnboundedSender<notify::Error>,
}

impl FakeNotifier {
    pub fn send(&self, event: ChangeEvent) {
        self.events.send(event).expect("watch loop dropped its subscription");
    }

    pub fn write(&self, path: impl Into<PathBuf>) {
        self.send(ChangeEvent::write(path));
    }

    pub fn error(&self, msg: &str) {
        self.errors
            .send(notify::Error::generic(msg))
            .expect("watch loop dropped its subscription");
    }
}

/// Build a subscription backed by [`FakeWatchBackend`].
pub fn fake_subscription() -> (Subscription, FakeNotifier, BackendLog) {
    fake_subscription_rejecting(None)
}

/// Like [`fake_subscription`], but registering `reject` fails.
pub fn fake_subscription_rejecting(
    reject: Option<PathBuf>,
) -> (Subscription, FakeNotifier, BackendLog) {
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let (error_tx, error_rx) = mpsc::unbounded_channel();
    let log = BackendLog::default();

    let backend = FakeWatchBackend {
        log: log.clone(),
        reject,
        closed: false,
    };

    let subscription = Subscription::new(Box::new(backend), event_rx, error_rx);
    let notifier = FakeNotifier {
        events: event_tx,
        errors: error_tx,
    };
    (subscription, notifier, log)
}
