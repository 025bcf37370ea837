//! Path resolution for the configured bundle file.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::ConfigError;

/// Resolves a bundle path to an absolute path.
///
/// - `~` and `~/...` expand to the home directory
/// - Relative paths resolve against `config_dir`
/// - Existing files are canonicalized; missing files are returned as joined, so that
///   validation can report them
pub fn resolve_bundle_path(path: &str, config_dir: &Path) -> Result<PathBuf, ConfigError> {
    let expanded = expand_tilde(path)?;

    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        config_dir.join(&expanded)
    };

    if !absolute.exists() {
        return Ok(absolute);
    }

    absolute
        .canonicalize()
        .map_err(|source| ConfigError::PathResolution {
            path: absolute.clone(),
            source,
        })
}

/// Expands a leading tilde to the home directory.
fn expand_tilde(path: &str) -> Result<PathBuf, ConfigError> {
    if path == "~" {
        return home_dir();
    }

    if let Some(rest) = path.strip_prefix("~/") {
        return Ok(home_dir()?.join(rest));
    }

    Ok(PathBuf::from(path))
}

fn home_dir() -> Result<PathBuf, ConfigError> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or(ConfigError::NoHomeDirectory)
}
