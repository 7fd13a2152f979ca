#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

pub use gowatch_test_utils::{init_tracing, wait_until, with_timeout};

/// A throwaway Go-style project:
///
/// ```text
/// <root>/main.go
/// <root>/pkg/util.go
/// ```
pub struct Project {
    _dir: TempDir,
    root: PathBuf,
}

impl Project {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create tempdir");
        // Canonicalize so paths compare equal to what the config resolves
        // (e.g. /var -> /private/var on macOS).
        let root = dir.path().canonicalize().expect("canonicalize tempdir");
        fs::write(root.join("main.go"), "package main\n\nfunc main() {}\n").unwrap();
        fs::create_dir(root.join("pkg")).unwrap();
        fs::write(root.join("pkg/util.go"), "package pkg\n").unwrap();
        Self { _dir: dir, root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    pub fn mkdir(&self, rel: &str) -> PathBuf {
        let path = self.root.join(rel);
        fs::create_dir_all(&path).unwrap();
        path
    }
}
