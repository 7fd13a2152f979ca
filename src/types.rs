use std::fmt;
use std::path::PathBuf;

/// Kind of filesystem change reported by the notification primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// File contents were written.
    Write,
    Create,
    Remove,
    Rename,
    /// Permissions or other metadata changed.
    Chmod,
    /// The primitive reported a change it could not classify.
    Error,
}

impl From<&notify::EventKind> for ChangeKind {
    fn from(kind: &notify::EventKind) -> Self {
        use notify::event::ModifyKind;
        use notify::EventKind;

        match kind {
            EventKind::Create(_) => ChangeKind::Create,
            EventKind::Remove(_) => ChangeKind::Remove,
            EventKind::Modify(ModifyKind::Name(_)) => ChangeKind::Rename,
            EventKind::Modify(ModifyKind::Metadata(_)) => ChangeKind::Chmod,
            // `Any` is notify's unspecified change; treat it as a write.
            EventKind::Modify(_) | EventKind::Any => ChangeKind::Write,
            EventKind::Access(_) | EventKind::Other => ChangeKind::Error,
        }
    }
}

/// A single path-level change notification.
///
/// Consumed exactly once by the event filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub path: PathBuf,
    pub kind: ChangeKind,
}

impl ChangeEvent {
    pub fn new(path: impl Into<PathBuf>, kind: ChangeKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    pub fn write(path: impl Into<PathBuf>) -> Self {
        Self::new(path, ChangeKind::Write)
    }
}

/// Lifecycle of the supervised program.
///
/// `CompileFailed` is not terminal: the loop keeps watching and the next
/// trigger retries the rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SupervisorState {
    #[default]
    NotStarted,
    Compiling,
    Running,
    Restarting,
    CompileFailed,
}

impl fmt::Display for SupervisorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SupervisorState::NotStarted => "not-started",
            SupervisorState::Compiling => "compiling",
            SupervisorState::Running => "running",
            SupervisorState::Restarting => "restarting",
            SupervisorState::CompileFailed => "compile-failed",
        };
        f.write_str(s)
    }
}
