// src/exec/backend.rs

//! Pluggable supervisor abstraction.
//!
//! The watch loop talks to a `Supervisor` instead of spawning processes
//! itself. This makes it easy to swap in a fake in tests while keeping the
//! production implementation in [`super::supervisor`].

use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;

/// Boxed future returned by [`Supervisor`] methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Compile / start / restart capability set for the watched program.
///
/// Production code uses [`super::ProcessSupervisor`]; tests can provide
/// their own implementation that doesn't spawn real processes.
pub trait Supervisor: Send {
    /// Handle to one running instance of the program.
    type Handle: Send;

    /// Build the program. Fails with `CompileFailed` if the build tool
    /// cannot be launched or reports failure.
    fn compile(&mut self) -> BoxFuture<'_, Result<()>>;

    /// Launch the last successfully compiled program.
    fn start(&mut self) -> BoxFuture<'_, Result<Self::Handle>>;

    /// Kill `current`, recompile, and start a fresh instance.
    ///
    /// On `CompileFailed` the caller keeps `current` as its handle; it has
    /// already been killed, so no instance runs until the next successful
    /// rebuild.
    fn restart<'a>(&'a mut self, current: &'a mut Self::Handle)
    -> BoxFuture<'a, Result<Self::Handle>>;
}
