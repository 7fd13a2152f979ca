// src/watch/mod.rs

//! File watching and change detection.
//!
//! This module is responsible for:
//! - Evaluating ignore globs (`patterns`).
//! - Finding every directory under the root, including ones created while the
//!   session runs (`directories`).
//! - Wiring up the platform watcher (`notify`) behind a small trait so the
//!   loop can be driven by a fake in tests (`watcher`).
//! - Classifying change events into rebuild triggers (`filter`).
//!
//! It does **not** know about processes; it only turns filesystem changes
//! into "rebuild now" decisions.

pub mod directories;
pub mod filter;
pub mod path_utils;
pub mod patterns;
pub mod watcher;

pub use directories::{diff, discover, DirectorySet};
pub use filter::{DedupState, EventFilter, Verdict, SOURCE_SUFFIX};
pub use patterns::{is_ignored, matches, IgnoreSet};
pub use watcher::{subscribe, Notification, NotifyBackend, Subscription, WatchBackend};
