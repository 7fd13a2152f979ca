// src/exec/command.rs

//! Command construction for the build tool and the compiled program.
//!
//! Both run in the watched directory with stdin/stdout/stderr inherited, so
//! the developer's terminal stays attached to whichever instance is live.

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::config::model::default_build_command;
use crate::config::WatchConfig;

/// `<build tool> <leading args...> <build flags...>`, e.g. `go build -race`.
pub fn build_command(config: &WatchConfig) -> Command {
    let args = build_args(config);
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    base_command(config.root(), build_tool(config), &args)
}

fn build_tool(config: &WatchConfig) -> &str {
    config
        .build_command()
        .first()
        .map(String::as_str)
        .unwrap_or("go")
}

/// Arguments passed to the build tool.
///
/// With the stock `go build`, `-o <artifact>` is added unless the build flags
/// already name an output, so the build writes the same file that is
/// launched afterwards.
pub fn build_args(config: &WatchConfig) -> Vec<String> {
    let mut args: Vec<String> = config.build_command().iter().skip(1).cloned().collect();
    if config.build_command() == default_build_command().as_slice()
        && !names_output(config.build_flags())
    {
        args.push("-o".to_string());
        args.push(config.artifact().to_string_lossy().into_owned());
    }
    args.extend(config.build_flags().iter().cloned());
    args
}

fn names_output(flags: &[String]) -> bool {
    flags.iter().any(|f| f == "-o" || f.starts_with("-o="))
}

/// The compiled artifact with the configured run flags.
pub fn run_command(config: &WatchConfig) -> Command {
    let args: Vec<&str> = config.run_flags().iter().map(String::as_str).collect();
    base_command(config.root(), &config.artifact().to_string_lossy(), &args)
}

fn base_command(dir: &Path, program: &str, args: &[&str]) -> Command {
    debug!(?dir, program, ?args, "command");
    let mut cmd = Command::new(program);
    cmd.args(args)
        .current_dir(dir)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .kill_on_drop(true);
    cmd
}

/// Human-readable form of a command line for error messages.
pub fn describe(config: &WatchConfig) -> String {
    std::iter::once(build_tool(config).to_string())
        .chain(build_args(config))
        .collect::<Vec<_>>()
        .join(" ")
}
