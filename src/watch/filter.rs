// src/watch/filter.rs

//! Decides whether a change notification warrants a rebuild.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::WatchConfig;
use crate::errors::Result;
use crate::types::{ChangeEvent, ChangeKind};
use crate::watch::path_utils::relative_str;
use crate::watch::patterns::IgnoreSet;

/// Suffix of files whose changes trigger a rebuild.
pub const SOURCE_SUFFIX: &str = ".go";

/// Outcome of classifying one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Not a write to a source file, or matched an ignore pattern.
    Ignore,
    /// Duplicate write swallowed by format-noise suppression.
    Noise,
    Trigger,
}

/// One-slot memory of the last accepted write.
///
/// Formatters commonly write the same file twice in a row. With suppression
/// on, the second consecutive write to a path is swallowed once; `swallowed`
/// then makes a third write go through again. This is an approximation, not
/// exact idempotence: two genuine edits in a row to one file also collapse.
#[derive(Debug, Clone, Default)]
pub struct DedupState {
    last_path: Option<PathBuf>,
    swallowed: bool,
}

impl DedupState {
    /// Record a candidate write; returns true if it should be swallowed.
    pub fn observe(&mut self, path: &Path) -> bool {
        if !self.swallowed && self.last_path.as_deref() == Some(path) {
            self.swallowed = true;
            return true;
        }
        self.swallowed = false;
        self.last_path = Some(path.to_path_buf());
        false
    }
}

/// Stateful classifier, scoped to one watch session.
#[derive(Debug, Clone)]
pub struct EventFilter {
    root: PathBuf,
    ignore: IgnoreSet,
    skip_format_noise: bool,
    dedup: DedupState,
}

impl EventFilter {
    /// Fails with `IgnorePattern` if any configured pattern is malformed.
    pub fn new(config: &WatchConfig) -> Result<Self> {
        Ok(Self {
            root: config.root().to_path_buf(),
            ignore: IgnoreSet::new(config.ignore())?,
            skip_format_noise: config.skip_format_noise(),
            dedup: DedupState::default(),
        })
    }

    pub fn classify(&mut self, event: &ChangeEvent) -> Verdict {
        if event.kind != ChangeKind::Write {
            return Verdict::Ignore;
        }

        let path_str = event.path.to_string_lossy();
        if !path_str.ends_with(SOURCE_SUFFIX) {
            return Verdict::Ignore;
        }

        if let Some(pattern) = self.ignored_by(&event.path) {
            debug!(path = ?event.path, %pattern, "change matches ignore pattern");
            return Verdict::Ignore;
        }

        if self.skip_format_noise && self.dedup.observe(&event.path) {
            debug!(path = ?event.path, "suppressing back-to-back write");
            return Verdict::Noise;
        }

        Verdict::Trigger
    }

    pub fn should_rebuild(&mut self, event: &ChangeEvent) -> bool {
        self.classify(event) == Verdict::Trigger
    }

    /// Patterns are tried against the path as delivered, then against the
    /// root-relative form when the path lies under the root.
    fn ignored_by(&self, path: &Path) -> Option<String> {
        if self.ignore.is_empty() {
            return None;
        }
        let absolute = path.to_string_lossy();
        if let Some(p) = self.ignore.first_match(&absolute) {
            return Some(p.to_string());
        }
        let relative = relative_str(&self.root, path)?;
        self.ignore.first_match(&relative).map(str::to_string)
    }
}
