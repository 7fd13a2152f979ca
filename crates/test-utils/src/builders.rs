#![allow(dead_code)]

use std::path::Path;

use gowatch::config::{RawWatchConfig, WatchConfig};

/// Builder for `WatchConfig` to simplify test setup.
///
/// The root must exist on disk; `build` runs the normal validation.
pub struct WatchConfigBuilder {
    raw: RawWatchConfig,
}

impl WatchConfigBuilder {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            raw: RawWatchConfig::new(root.as_ref()),
        }
    }

    pub fn ignore(mut self, pattern: &str) -> Self {
        self.raw.ignore.push(pattern.to_string());
        self
    }

    pub fn build_flag(mut self, flag: &str) -> Self {
        self.raw.build_flags.push(flag.to_string());
        self
    }

    pub fn run_flag(mut self, flag: &str) -> Self {
        self.raw.run_flags.push(flag.to_string());
        self
    }

    pub fn skip_format_noise(mut self, val: bool) -> Self {
        self.raw.skip_format_noise = val;
        self
    }

    pub fn binary(mut self, name: &str) -> Self {
        self.raw.binary = Some(name.to_string());
        self
    }

    pub fn build_command(mut self, cmd: &[&str]) -> Self {
        self.raw.build_command = cmd.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Use `sh -c <script>` as the build tool.
    pub fn shell_build(self, script: &str) -> Self {
        self.build_command(&["sh", "-c", script])
    }

    pub fn raw(self) -> RawWatchConfig {
        self.raw
    }

    pub fn build(self) -> WatchConfig {
        WatchConfig::try_from(self.raw).expect("Failed to build valid config from builder")
    }
}
