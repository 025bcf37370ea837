//! Shared context for running CLI commands.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
};

use folio_config::{Config, ConfigError};
use folio_model::{BuildOptions, Model};
use tracing::debug;

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (may be default if no config files found).
    pub config: Config,
    /// Bundle given on the command line, if any.
    bundle_override: Option<PathBuf>,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load(bundle_override: Option<PathBuf>) -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        Ok(Self {
            cwd,
            config,
            bundle_override,
        })
    }

    /// Loads only the current directory, skipping configuration parsing.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            config: Config::default(),
            bundle_override: None,
        })
    }

    /// Model construction options from `[bundle]`.
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            root_id: self.config.bundle.root_id.clone(),
        }
    }

    /// Returns the bundle file to load.
    pub fn bundle_path(&self) -> Result<PathBuf, ExitCode> {
        let override_path = self.bundle_override.as_ref().map(|p| self.cwd.join(p));
        self.config
            .bundle_path(override_path.as_deref())
            .map_err(|e| {
                eprintln!("error: {e}");
                if matches!(e, ConfigError::NoBundleConfigured) {
                    eprintln!("Run 'folio init' to create a configuration file.");
                }
                ExitCode::FAILURE
            })
    }

    /// Loads the bundle and builds the page model.
    pub fn model(&self) -> Result<Model, ExitCode> {
        let path = self.bundle_path()?;
        debug!(path = %path.display(), "loading bundle");
        Model::load(&path, &self.build_options()).map_err(|e| {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        })
    }
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}
