// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod types;
pub mod watch;

use std::sync::Arc;

use tokio::sync::oneshot;
use tracing::{debug, info};

use crate::config::WatchConfig;
use crate::engine::WatchLoop;
use crate::errors::Result;
use crate::exec::ProcessSupervisor;
use crate::fs::{FileSystem, RealFileSystem};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - the resolved `WatchConfig`
/// - the real process supervisor and `notify` subscription
/// - Ctrl-C handling as the stop signal
pub async fn run(config: WatchConfig, dry_run: bool) -> Result<()> {
    if dry_run {
        print_dry_run(&config);
        return Ok(());
    }

    let (stop_tx, stop_rx) = oneshot::channel::<()>();

    // Ctrl-C -> graceful shutdown.
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("failed to listen for Ctrl+C: {e}");
            // Keep the sender alive: a dropped sender would also stop the session.
            std::future::pending::<()>().await;
        }
        let _ = stop_tx.send(());
    });

    run_watch(config, stop_rx).await
}

/// Watch `config.root()`, rebuilding and restarting the program on every
/// relevant change, until `stop` fires.
///
/// Returns `Ok(())` only for a deliberate stop; any fatal condition is
/// returned as the error that caused it.
pub async fn run_watch(config: WatchConfig, stop: oneshot::Receiver<()>) -> Result<()> {
    let config = Arc::new(config);
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);

    let supervisor = ProcessSupervisor::new(Arc::clone(&config), Arc::clone(&fs));
    let subscription = watch::subscribe()?;

    info!(root = ?config.root(), artifact = ?config.artifact(), "gowatch starting");
    let watch_loop = WatchLoop::new(&config, fs, subscription, supervisor, stop)?;
    watch_loop.run().await
}

fn print_dry_run(cfg: &WatchConfig) {
    println!("gowatch dry-run");
    println!("  dir:               {}", cfg.root().display());
    println!("  binary:            {}", cfg.artifact().display());
    println!("  build command:     {:?}", cfg.build_command());
    println!("  build flags:       {:?}", cfg.build_flags());
    println!("  run flags:         {:?}", cfg.run_flags());
    println!("  ignore:            {:?}", cfg.ignore());
    println!("  skip format noise: {}", cfg.skip_format_noise());

    debug!("dry-run complete (no execution)");
}
