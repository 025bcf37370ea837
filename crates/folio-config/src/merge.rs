//! Configuration merging.
//!
//! Merges parsed `RawConfig` files into a single `Config`. Files come in precedence order,
//! highest first; for every scalar the first file that defines it wins.

use std::path::PathBuf;

use crate::{
    BundleSettings, Config, ConfigError, GraphSettings, SearchSettings,
    parse::{RawBundleSettings, RawConfig, RawGraphSettings, RawSearchSettings},
    resolve::resolve_bundle_path,
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges configuration files, highest precedence first.
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    if configs.is_empty() {
        return Ok(Config::default());
    }

    let bundle = merge_bundle_settings(configs)?;

    let mut search = SearchSettings::default();
    let mut graph = GraphSettings::default();
    // Lowest precedence first so higher precedence overwrites.
    for parsed in configs.iter().rev() {
        if let Some(raw) = &parsed.config.search {
            apply_raw_search(&mut search, raw);
        }
        if let Some(raw) = &parsed.config.graph {
            apply_raw_graph(&mut graph, raw);
        }
    }

    let config_root = configs
        .first()
        .and_then(|c| c.path.parent())
        .map(|dir| dir.to_path_buf());

    Ok(Config {
        bundle,
        search,
        graph,
        config_root,
    })
}

/// The bundle path is resolved relative to the file that defines it.
fn merge_bundle_settings(configs: &[ParsedConfig]) -> Result<BundleSettings, ConfigError> {
    let mut result = BundleSettings::default();
    let sections = configs
        .iter()
        .filter_map(|parsed| parsed.config.bundle.as_ref().map(|raw| (parsed, raw)));

    let mut root_id = None;
    let mut path = None;
    for (parsed, RawBundleSettings { path: raw_path, root_id: raw_root }) in sections {
        if root_id.is_none() {
            root_id.clone_from(raw_root);
        }
        if path.is_none()
            && let Some(raw_path) = raw_path
        {
            let config_dir = parsed.path.parent().unwrap_or(parsed.path.as_path());
            path = Some(resolve_bundle_path(raw_path, config_dir)?);
        }
    }

    if let Some(root_id) = root_id {
        result.root_id = root_id;
    }
    result.path = path;
    Ok(result)
}

fn apply_raw_search(result: &mut SearchSettings, raw: &RawSearchSettings) {
    let fields = [
        (&mut result.title_weight, raw.title_weight),
        (&mut result.tag_weight, raw.tag_weight),
        (&mut result.body_weight, raw.body_weight),
        (&mut result.title_phrase_bonus, raw.title_phrase_bonus),
        (&mut result.body_phrase_bonus, raw.body_phrase_bonus),
        (&mut result.heading_weight, raw.heading_weight),
        (&mut result.section_body_weight, raw.section_body_weight),
        (&mut result.heading_phrase_bonus, raw.heading_phrase_bonus),
        (
            &mut result.section_body_phrase_bonus,
            raw.section_body_phrase_bonus,
        ),
        (&mut result.section_boost_cap, raw.section_boost_cap),
    ];
    for (slot, value) in fields {
        if let Some(v) = value {
            *slot = v;
        }
    }
    if let Some(v) = raw.min_token_len {
        result.min_token_len = v;
    }
    if let Some(v) = raw.limit {
        result.limit = v;
    }
}

fn apply_raw_graph(result: &mut GraphSettings, raw: &RawGraphSettings) {
    if let Some(v) = raw.medium_tier_at {
        result.medium_tier_at = v;
    }
    if let Some(v) = raw.large_tier_at {
        result.large_tier_at = v;
    }
    if let Some(v) = raw.huge_tier_at {
        result.huge_tier_at = v;
    }
    if let Some(v) = raw.tag_strength_cap {
        result.tag_strength_cap = v;
    }
}
