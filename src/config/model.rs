use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Default build tool invocation; `build_flags` are appended to it.
pub fn default_build_command() -> Vec<String> {
    vec!["go".to_string(), "build".to_string()]
}

/// Configuration file as read from TOML.
///
/// Mirrors the command-line flags; every key is optional:
///
/// ```toml
/// dir = "."
/// build_flags = ["-race"]
/// run_flags = ["--port", "8080"]
/// ignore = ["*_test.go", "vendor/**"]
/// skip_format_noise = true
/// verbose = false
/// # binary = "server"
/// # build_command = ["go", "build"]
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub dir: Option<String>,

    #[serde(default)]
    pub build_flags: Vec<String>,

    #[serde(default)]
    pub run_flags: Vec<String>,

    #[serde(default)]
    pub ignore: Vec<String>,

    #[serde(default)]
    pub verbose: bool,

    /// Collapse a formatter's back-to-back double write into one rebuild.
    #[serde(default)]
    pub skip_format_noise: bool,

    /// Name (relative to the watched dir) or absolute path of the compiled
    /// program. Defaults to the watched directory's base name.
    #[serde(default)]
    pub binary: Option<String>,

    /// Build tool and leading arguments, e.g. `["go", "build"]`.
    #[serde(default)]
    pub build_command: Option<Vec<String>>,
}

/// Effective settings after merging the config file with CLI overrides, but
/// before validation. Convert with `WatchConfig::try_from`.
#[derive(Debug, Clone)]
pub struct RawWatchConfig {
    pub dir: PathBuf,
    pub build_flags: Vec<String>,
    pub run_flags: Vec<String>,
    pub ignore: Vec<String>,
    pub skip_format_noise: bool,
    pub verbose: bool,
    pub binary: Option<String>,
    pub build_command: Vec<String>,
}

impl RawWatchConfig {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            build_flags: Vec::new(),
            run_flags: Vec::new(),
            ignore: Vec::new(),
            skip_format_noise: false,
            verbose: false,
            binary: None,
            build_command: default_build_command(),
        }
    }
}

/// Validated, immutable settings for one watch session.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    root: PathBuf,
    ignore: Vec<String>,
    build_flags: Vec<String>,
    run_flags: Vec<String>,
    skip_format_noise: bool,
    verbose: bool,
    artifact: PathBuf,
    build_command: Vec<String>,
}

impl WatchConfig {
    /// Construct without validation. Prefer `WatchConfig::try_from`.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new_unchecked(
        root: PathBuf,
        ignore: Vec<String>,
        build_flags: Vec<String>,
        run_flags: Vec<String>,
        skip_format_noise: bool,
        verbose: bool,
        artifact: PathBuf,
        build_command: Vec<String>,
    ) -> Self {
        Self {
            root,
            ignore,
            build_flags,
            run_flags,
            skip_format_noise,
            verbose,
            artifact,
            build_command,
        }
    }

    /// Absolute, canonical watched directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn ignore(&self) -> &[String] {
        &self.ignore
    }

    pub fn build_flags(&self) -> &[String] {
        &self.build_flags
    }

    pub fn run_flags(&self) -> &[String] {
        &self.run_flags
    }

    pub fn skip_format_noise(&self) -> bool {
        self.skip_format_noise
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Absolute path of the compiled program.
    pub fn artifact(&self) -> &Path {
        &self.artifact
    }

    /// Build tool followed by its leading arguments (never empty).
    pub fn build_command(&self) -> &[String] {
        &self.build_command
    }
}
