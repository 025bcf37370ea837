//! Configuration system for folio.
//!
//! folio uses TOML configuration files named `.folio.toml`. Configuration is resolved by
//! walking up the directory tree from the current working directory, collecting any
//! `.folio.toml` files found, then loading `~/.folio.toml` as the global config with lowest
//! precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod resolve;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawBundleSettings, RawConfig, RawGraphSettings, RawSearchSettings, parse_config_file,
    parse_config_str,
};
pub use resolve::resolve_bundle_path;
use serde::Serialize;
pub use templates::{global_template, local_template};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Top-level merged configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Bundle location and root selection.
    pub bundle: BundleSettings,
    /// Search weights and limits.
    pub search: SearchSettings,
    /// Graph thresholds.
    pub graph: GraphSettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.folio.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from config file paths given in precedence order, highest first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        if files.is_empty() {
            return Ok(Self::default());
        }

        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        merge_configs(&parsed)
    }

    /// Returns the bundle file to load.
    ///
    /// `override_path` (from the command line) takes precedence over `[bundle] path`. The file
    /// must exist.
    pub fn bundle_path(&self, override_path: Option<&Path>) -> Result<PathBuf, ConfigError> {
        let path = match override_path {
            Some(path) => path.to_path_buf(),
            None => self
                .bundle
                .path
                .clone()
                .ok_or(ConfigError::NoBundleConfigured)?,
        };
        if !path.is_file() {
            return Err(ConfigError::BundleNotFound { path });
        }
        Ok(path)
    }

    /// Validates the configuration and returns any warnings.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings in `.folio.toml` format.
    pub fn settings_to_toml(&self) -> Result<String, ConfigError> {
        let serializable = SerializableSettings {
            bundle: &self.bundle,
            search: &self.search,
            graph: &self.graph,
        };
        Ok(toml::to_string_pretty(&serializable)?)
    }
}

/// The `[bundle]` section.
#[derive(Debug, Clone, Serialize)]
pub struct BundleSettings {
    /// Resolved bundle file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Reserved id of the root page.
    pub root_id: String,
}

impl Default for BundleSettings {
    fn default() -> Self {
        Self {
            path: None,
            root_id: String::from("home"),
        }
    }
}

/// The `[search]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchSettings {
    /// Whole-word match in a title.
    pub title_weight: u32,
    /// Whole-word match in a tag.
    pub tag_weight: u32,
    /// Whole-word match in a page body.
    pub body_weight: u32,
    /// Phrase found in a title.
    pub title_phrase_bonus: u32,
    /// Phrase found in a page body.
    pub body_phrase_bonus: u32,
    /// Whole-word match in a section heading.
    pub heading_weight: u32,
    /// Whole-word match in a section body.
    pub section_body_weight: u32,
    /// Phrase found in a section heading.
    pub heading_phrase_bonus: u32,
    /// Phrase found in a section body.
    pub section_body_phrase_bonus: u32,
    /// Cap on the boost from matching sections.
    pub section_boost_cap: u32,
    /// Minimum query token length.
    pub min_token_len: usize,
    /// Maximum results shown by the CLI.
    pub limit: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            title_weight: 10,
            tag_weight: 6,
            body_weight: 2,
            title_phrase_bonus: 15,
            body_phrase_bonus: 5,
            heading_weight: 4,
            section_body_weight: 1,
            heading_phrase_bonus: 6,
            section_body_phrase_bonus: 2,
            section_boost_cap: 3,
            min_token_len: 2,
            limit: 20,
        }
    }
}

/// The `[graph]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphSettings {
    /// Descendant count for the medium tier.
    pub medium_tier_at: usize,
    /// Descendant count for the large tier.
    pub large_tier_at: usize,
    /// Descendant count for the huge tier.
    pub huge_tier_at: usize,
    /// Maximum tag edge strength.
    pub tag_strength_cap: usize,
}

impl Default for GraphSettings {
    fn default() -> Self {
        Self {
            medium_tier_at: 3,
            large_tier_at: 10,
            huge_tier_at: 30,
            tag_strength_cap: 3,
        }
    }
}

#[derive(Serialize)]
struct SerializableSettings<'a> {
    bundle: &'a BundleSettings,
    search: &'a SearchSettings,
    graph: &'a GraphSettings,
}
