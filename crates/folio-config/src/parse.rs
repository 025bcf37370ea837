//! Configuration file parsing.
//!
//! Parses individual `.folio.toml` files into `RawConfig` structures whose fields are all
//! optional, so partial files can be merged.

use std::{fs, path::Path};

use serde::Deserialize;
#[cfg(test)]
use toml::de::Error as TomlError;

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawConfig {
    /// When true, stop discovery here and ignore parent and global configs.
    pub root: Option<bool>,
    /// Bundle section.
    pub bundle: Option<RawBundleSettings>,
    /// Search section.
    pub search: Option<RawSearchSettings>,
    /// Graph section.
    pub graph: Option<RawGraphSettings>,
}

/// Raw `[bundle]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawBundleSettings {
    /// Bundle file, relative to the config file's directory.
    pub path: Option<String>,
    /// Reserved id of the root page.
    pub root_id: Option<String>,
}

/// Raw `[search]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawSearchSettings {
    /// Whole-word match in a title.
    pub title_weight: Option<u32>,
    /// Whole-word match in a tag.
    pub tag_weight: Option<u32>,
    /// Whole-word match in a page body.
    pub body_weight: Option<u32>,
    /// Phrase found in a title.
    pub title_phrase_bonus: Option<u32>,
    /// Phrase found in a page body.
    pub body_phrase_bonus: Option<u32>,
    /// Whole-word match in a section heading.
    pub heading_weight: Option<u32>,
    /// Whole-word match in a section body.
    pub section_body_weight: Option<u32>,
    /// Phrase found in a section heading.
    pub heading_phrase_bonus: Option<u32>,
    /// Phrase found in a section body.
    pub section_body_phrase_bonus: Option<u32>,
    /// Cap on the boost from matching sections.
    pub section_boost_cap: Option<u32>,
    /// Minimum query token length.
    pub min_token_len: Option<usize>,
    /// Maximum results shown by the CLI.
    pub limit: Option<usize>,
}

/// Raw `[graph]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawGraphSettings {
    /// Descendant count for the medium tier.
    pub medium_tier_at: Option<usize>,
    /// Descendant count for the large tier.
    pub large_tier_at: Option<usize>,
    /// Descendant count for the huge tier.
    pub huge_tier_at: Option<usize>,
    /// Maximum tag edge strength.
    pub tag_strength_cap: Option<usize>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string. `path` is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses configuration from a TOML string without path context.
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, TomlError> {
    toml::from_str(contents)
}

/// Checks if a config file has `root = true` set. Unreadable files are not roots.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}
