// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `gowatch`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "gowatch",
    version,
    disable_version_flag = true,
    arg(clap::Arg::new("version").long("version").action(clap::ArgAction::Version).help("Print version")),
    about = "Watch for .go file changes, rebuild and restart automatically.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML). A missing file is not an error.
    #[arg(short = 'c', long, value_name = "PATH", default_value = ".gowatch.toml")]
    pub config: String,

    /// Comma-separated flags appended to the build command.
    #[arg(long, value_name = "FLAGS")]
    pub build_flags: Option<String>,

    /// Comma-separated arguments passed to the program.
    #[arg(long, value_name = "FLAGS")]
    pub run_flags: Option<String>,

    /// Directory to watch for .go files [default: .].
    #[arg(short = 'd', long, value_name = "DIR")]
    pub dir: Option<String>,

    /// Comma-separated glob patterns of files that never trigger a rebuild.
    #[arg(short = 'i', long, value_name = "PATTERNS")]
    pub ignore: Option<String>,

    /// Collapse a formatter's back-to-back double write into one rebuild.
    #[arg(long)]
    pub skip_format_noise: bool,

    /// Verbose mode (debug logging).
    #[arg(short = 'V', long)]
    pub verbose: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// Takes precedence over `--verbose` and `GOWATCH_LOG`.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Resolve and print the effective configuration, then exit.
    #[arg(long)]
    pub dry_run: bool,

    /// Arguments passed to your program.
    #[arg(value_name = "ARGS", trailing_var_arg = true)]
    pub args: Vec<String>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

/// Split a comma-separated flag value, dropping empty items.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
