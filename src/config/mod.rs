// src/config/mod.rs

//! Configuration loading and validation for gowatch.
//!
//! Responsibilities:
//! - Define the TOML-backed file model and the session config (`model.rs`).
//! - Load a config file and merge CLI overrides (`loader.rs`).
//! - Validate into an immutable [`WatchConfig`] (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_from_path, merge_cli, resolve};
pub use model::{ConfigFile, RawWatchConfig, WatchConfig};
