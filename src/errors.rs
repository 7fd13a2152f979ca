// src/errors.rs

//! Crate-wide error type.
//!
//! Only [`GowatchError::CompileFailed`] is recoverable, and only when it comes
//! out of a restart: the watch loop logs it and keeps watching. Every other
//! variant ends the session and is handed back to the caller of
//! [`crate::run_watch`].

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GowatchError {
    #[error("failed to compile program: {0}")]
    CompileFailed(String),

    #[error("failed to start program {path:?}: {source}")]
    ProcessStartFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to kill running process {pid}: {source}")]
    ProcessKillFailed {
        pid: u32,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to initialise file watcher: {0}")]
    WatchInit(#[source] notify::Error),

    #[error("failed to watch directory {path:?}: {source}")]
    DirectoryRegistration {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },

    #[error("invalid ignore pattern {pattern:?}: {source}")]
    IgnorePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("file notification channel failed: {0}")]
    NotificationChannel(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GowatchError {
    /// Whether the watch loop may log this error and keep running.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, GowatchError::CompileFailed(_))
    }
}

pub type Result<T> = std::result::Result<T, GowatchError>;
