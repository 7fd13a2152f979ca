// src/watch/directories.rs

//! Discovery of the directories that must be registered with the watcher.
//!
//! The notification primitive does not follow newly created subdirectories,
//! so the watch loop rescans the tree on every iteration and registers
//! whatever [`DirectorySet::refresh`] reports as new.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::{GowatchError, Result};
use crate::fs::FileSystem;

/// All directories under `root`, `root` included, in depth-first pre-order
/// with siblings sorted by name.
///
/// Symlinked directories are not followed. Any traversal error (e.g. a
/// directory that cannot be listed) aborts the whole scan.
pub fn discover(fs: &dyn FileSystem, root: &Path) -> Result<Vec<PathBuf>> {
    if !fs.is_dir(root) {
        return Err(GowatchError::ConfigError(format!(
            "watch root {:?} is not a directory",
            root
        )));
    }

    let mut directories = Vec::new();
    walk(fs, root, &mut directories)?;
    Ok(directories)
}

fn walk(fs: &dyn FileSystem, dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    out.push(dir.to_path_buf());
    for entry in fs.read_dir(dir)? {
        if fs.is_dir(&entry) && !fs.is_symlink(&entry) {
            walk(fs, &entry, out)?;
        }
    }
    Ok(())
}

/// Re-run discovery and return directories absent from `known`.
///
/// Order follows [`discover`], so registration order is deterministic. The
/// flag is true iff the returned list is non-empty.
pub fn diff(
    fs: &dyn FileSystem,
    root: &Path,
    known: &HashSet<PathBuf>,
) -> Result<(Vec<PathBuf>, bool)> {
    let fresh = unknown(discover(fs, root)?, known);
    let exists = !fresh.is_empty();
    Ok((fresh, exists))
}

fn unknown(scanned: Vec<PathBuf>, known: &HashSet<PathBuf>) -> Vec<PathBuf> {
    scanned.into_iter().filter(|dir| !known.contains(dir)).collect()
}

/// Directories currently registered for one watch session.
///
/// A directory that disappears is dropped on the next scan, since its OS
/// watch went with it; if it comes back it is reported as new again.
#[derive(Debug, Clone)]
pub struct DirectorySet {
    root: PathBuf,
    ordered: Vec<PathBuf>,
    members: HashSet<PathBuf>,
}

impl DirectorySet {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ordered: Vec::new(),
            members: HashSet::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Scan for directories not yet in the set, add them, and return them
    /// in discovery order. The first call returns the whole tree.
    pub fn refresh(&mut self, fs: &dyn FileSystem) -> Result<Vec<PathBuf>> {
        let scanned = discover(fs, &self.root)?;
        self.forget_missing(&scanned);

        let fresh = unknown(scanned, &self.members);
        if !fresh.is_empty() {
            debug!(count = fresh.len(), directories = ?fresh, "found new directories");
            for dir in &fresh {
                self.members.insert(dir.clone());
                self.ordered.push(dir.clone());
            }
        }
        Ok(fresh)
    }

    fn forget_missing(&mut self, scanned: &[PathBuf]) {
        let present: HashSet<&Path> = scanned.iter().map(PathBuf::as_path).collect();
        let before = self.ordered.len();
        self.ordered.retain(|dir| present.contains(dir.as_path()));
        if self.ordered.len() != before {
            self.members.retain(|dir| present.contains(dir.as_path()));
            debug!(count = before - self.ordered.len(), "directories removed since last scan");
        }
    }

    pub fn contains(&self, dir: &Path) -> bool {
        self.members.contains(dir)
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Members in the order they were registered.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.ordered.iter().map(PathBuf::as_path)
    }
}
