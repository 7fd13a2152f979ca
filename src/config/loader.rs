// src/config/loader.rs

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::{split_list, CliArgs};
use crate::config::model::{default_build_command, ConfigFile, RawWatchConfig, WatchConfig};
use crate::errors::Result;

/// Load a configuration file.
///
/// A file that does not exist yields the defaults; a file that exists but
/// cannot be read or parsed is an error.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(?path, "no config file; using defaults");
            return Ok(ConfigFile::default());
        }
        Err(err) => return Err(err.into()),
    };

    let config: ConfigFile = toml::from_str(&contents)?;
    Ok(config)
}

/// Apply command-line overrides on top of the config file.
///
/// - Positional program args replace `run_flags`; `--run-flags` replaces both.
/// - `--build-flags` and `--ignore` replace the file values.
/// - `--dir` wins over the file's `dir`; `.` or empty means the current
///   working directory.
/// - `--verbose` and `--skip-format-noise` can only switch things on.
pub fn merge_cli(file: ConfigFile, args: &CliArgs) -> Result<RawWatchConfig> {
    let mut run_flags = file.run_flags;
    if !args.args.is_empty() {
        run_flags = args.args.clone();
    }
    if let Some(flags) = &args.run_flags {
        run_flags = split_list(flags);
    }

    let build_flags = match &args.build_flags {
        Some(flags) => split_list(flags),
        None => file.build_flags,
    };

    let ignore = match &args.ignore {
        Some(patterns) => split_list(patterns),
        None => file.ignore,
    };

    Ok(RawWatchConfig {
        dir: resolve_dir(args.dir.as_deref().or(file.dir.as_deref()).unwrap_or("."))?,
        build_flags,
        run_flags,
        ignore,
        skip_format_noise: file.skip_format_noise || args.skip_format_noise,
        verbose: file.verbose || args.verbose,
        binary: file.binary,
        build_command: file.build_command.unwrap_or_else(default_build_command),
    })
}

fn resolve_dir(dir: &str) -> Result<PathBuf> {
    if dir.is_empty() || dir == "." {
        return Ok(std::env::current_dir()?);
    }
    Ok(PathBuf::from(dir))
}

/// Load the config file named by `args`, merge CLI overrides, validate.
///
/// This is the recommended entry point for the binary.
pub fn resolve(args: &CliArgs) -> Result<WatchConfig> {
    let file = load_from_path(&args.config)?;
    let raw = merge_cli(file, args)?;
    WatchConfig::try_from(raw)
}
