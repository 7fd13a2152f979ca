// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for building and running the watched program
//! using `tokio::process::Command`.
//!
//! - [`backend`] provides the `Supervisor` trait the watch loop drives, so
//!   tests can replace the real implementation with a fake.
//! - [`command`] builds the build-tool and program command lines.
//! - [`supervisor`] holds `ProcessSupervisor`, the production implementation,
//!   and `ProcessHandle`, its running-instance handle.

pub mod backend;
pub mod command;
pub mod supervisor;

pub use backend::{BoxFuture, Supervisor};
pub use supervisor::{ProcessHandle, ProcessSupervisor};
