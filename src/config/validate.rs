use std::path::{Path, PathBuf};

use crate::config::model::{RawWatchConfig, WatchConfig};
use crate::errors::{GowatchError, Result};
use crate::watch::path_utils::dir_base_name;
use crate::watch::patterns::IgnoreSet;

impl TryFrom<RawWatchConfig> for WatchConfig {
    type Error = crate::errors::GowatchError;

    fn try_from(raw: RawWatchConfig) -> std::result::Result<Self, Self::Error> {
        let root = validate_root(&raw.dir)?;
        validate_ignore(&raw.ignore)?;
        validate_build_command(&raw.build_command)?;
        let artifact = resolve_artifact(&root, raw.binary.as_deref())?;

        Ok(WatchConfig::new_unchecked(
            root,
            raw.ignore,
            raw.build_flags,
            raw.run_flags,
            raw.skip_format_noise,
            raw.verbose,
            artifact,
            raw.build_command,
        ))
    }
}

fn validate_root(dir: &Path) -> Result<PathBuf> {
    let root = dir.canonicalize().map_err(|e| {
        GowatchError::ConfigError(format!("cannot resolve watch dir {:?}: {e}", dir))
    })?;
    if !root.is_dir() {
        return Err(GowatchError::ConfigError(format!(
            "watch dir {:?} is not a directory",
            root
        )));
    }
    Ok(root)
}

fn validate_ignore(patterns: &[String]) -> Result<()> {
    IgnoreSet::new(patterns).map(|_| ())
}

fn validate_build_command(cmd: &[String]) -> Result<()> {
    match cmd.first() {
        Some(tool) if !tool.trim().is_empty() => Ok(()),
        _ => Err(GowatchError::ConfigError(
            "build_command must name a build tool".to_string(),
        )),
    }
}

/// Relative binary names live in the watched dir; absolute ones are kept.
fn resolve_artifact(root: &Path, binary: Option<&str>) -> Result<PathBuf> {
    let name = match binary {
        Some(name) if !name.trim().is_empty() => name.to_string(),
        _ => dir_base_name(root).ok_or_else(|| {
            GowatchError::ConfigError(format!(
                "cannot derive a binary name from {:?}; set `binary`",
                root
            ))
        })?,
    };

    let path = PathBuf::from(name);
    if path.is_absolute() {
        Ok(path)
    } else {
        Ok(root.join(path))
    }
}
