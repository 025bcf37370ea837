//! Configuration validation.
//!
//! Reports settings that load fine but will produce surprising results.

use std::fmt;

use crate::Config;

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// A field weight does not exceed the weight it should outrank.
    WeightOrder {
        /// The field expected to be heavier.
        higher: &'static str,
        /// The field expected to be lighter.
        lower: &'static str,
    },
    /// The title phrase bonus is smaller than a single title match.
    TitlePhraseBonusTooSmall,
    /// The body phrase bonus is not smaller than the title phrase bonus.
    BodyPhraseBonusTooLarge,
    /// Tier thresholds are not strictly increasing.
    TierThresholdsNotIncreasing,
    /// `section_boost_cap` is zero, so sections never influence page rank.
    SectionBoostDisabled,
    /// The configured bundle file does not exist.
    BundleMissing {
        /// The path that does not exist.
        path: String,
    },
    /// No bundle is configured.
    NoBundleConfigured,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WeightOrder { higher, lower } => {
                write!(f, "search.{higher} should be greater than search.{lower}")
            }
            Self::TitlePhraseBonusTooSmall => {
                write!(f, "search.title_phrase_bonus is smaller than search.title_weight")
            }
            Self::BodyPhraseBonusTooLarge => write!(
                f,
                "search.body_phrase_bonus should be smaller than search.title_phrase_bonus"
            ),
            Self::TierThresholdsNotIncreasing => write!(
                f,
                "graph tier thresholds should increase: medium_tier_at < large_tier_at < huge_tier_at"
            ),
            Self::SectionBoostDisabled => {
                write!(f, "search.section_boost_cap is 0; sections will not affect ranking")
            }
            Self::BundleMissing { path } => write!(f, "bundle file does not exist: {path}"),
            Self::NoBundleConfigured => write!(f, "no bundle path is configured"),
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();
    let search = &config.search;

    let orderings = [
        ("title_weight", search.title_weight, "tag_weight", search.tag_weight),
        ("tag_weight", search.tag_weight, "body_weight", search.body_weight),
        (
            "heading_weight",
            search.heading_weight,
            "section_body_weight",
            search.section_body_weight,
        ),
    ];
    for (higher, high, lower, low) in orderings {
        if high <= low {
            warnings.push(ConfigWarning::WeightOrder { higher, lower });
        }
    }

    if search.title_phrase_bonus < search.title_weight {
        warnings.push(ConfigWarning::TitlePhraseBonusTooSmall);
    }
    if search.body_phrase_bonus >= search.title_phrase_bonus {
        warnings.push(ConfigWarning::BodyPhraseBonusTooLarge);
    }
    if search.section_boost_cap == 0 {
        warnings.push(ConfigWarning::SectionBoostDisabled);
    }

    let graph = &config.graph;
    if !(graph.medium_tier_at < graph.large_tier_at && graph.large_tier_at < graph.huge_tier_at) {
        warnings.push(ConfigWarning::TierThresholdsNotIncreasing);
    }

    match &config.bundle.path {
        Some(path) if !path.is_file() => warnings.push(ConfigWarning::BundleMissing {
            path: path.display().to_string(),
        }),
        Some(_) => {}
        None => warnings.push(ConfigWarning::NoBundleConfigured),
    }

    warnings
}
