//! Graph output types.

use std::collections::{BTreeMap, BTreeSet};

use folio_config::GraphSettings;
use folio_model::PageIndex;
use serde::Serialize;

/// Default descendant count at which a hierarchy edge becomes [`Tier::Medium`].
pub const DEFAULT_MEDIUM_TIER_AT: usize = 3;
/// Default descendant count at which a hierarchy edge becomes [`Tier::Large`].
pub const DEFAULT_LARGE_TIER_AT: usize = 10;
/// Default descendant count at which a hierarchy edge becomes [`Tier::Huge`].
pub const DEFAULT_HUGE_TIER_AT: usize = 30;
/// Default cap on tag edge strength.
pub const DEFAULT_TAG_STRENGTH_CAP: usize = 3;

/// Thresholds used when building graph data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphOptions {
    /// Minimum child descendant count for a medium tier edge.
    pub medium_tier_at: usize,
    /// Minimum child descendant count for a large tier edge.
    pub large_tier_at: usize,
    /// Minimum child descendant count for a huge tier edge.
    pub huge_tier_at: usize,
    /// Maximum tag edge strength.
    pub tag_strength_cap: usize,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            medium_tier_at: DEFAULT_MEDIUM_TIER_AT,
            large_tier_at: DEFAULT_LARGE_TIER_AT,
            huge_tier_at: DEFAULT_HUGE_TIER_AT,
            tag_strength_cap: DEFAULT_TAG_STRENGTH_CAP,
        }
    }
}

impl From<&GraphSettings> for GraphOptions {
    fn from(settings: &GraphSettings) -> Self {
        Self {
            medium_tier_at: settings.medium_tier_at,
            large_tier_at: settings.large_tier_at,
            huge_tier_at: settings.huge_tier_at,
            tag_strength_cap: settings.tag_strength_cap,
        }
    }
}

/// Visual weight of a hierarchy edge, from the size of the child's subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Below the medium threshold.
    Small,
    /// At least the medium threshold.
    Medium,
    /// At least the large threshold.
    Large,
    /// At least the huge threshold.
    Huge,
}

impl Tier {
    /// Classifies a descendant count.
    pub fn from_descendants(count: usize, options: &GraphOptions) -> Self {
        if count >= options.huge_tier_at {
            Self::Huge
        } else if count >= options.large_tier_at {
            Self::Large
        } else if count >= options.medium_tier_at {
            Self::Medium
        } else {
            Self::Small
        }
    }
}

/// One node per page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    /// Stable node index; equal to the page's bundle position.
    pub index: usize,
    /// Page id.
    pub id: String,
    /// Display label (the page title).
    pub label: String,
    /// The page this node stands for.
    pub page: PageIndex,
}

/// A parent to child edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HierarchyEdge {
    /// Parent node index.
    pub source: usize,
    /// Child node index.
    pub target: usize,
    /// Weight class from the child's descendant count.
    pub tier: Tier,
}

/// An edge between two pages that share tags. `source < target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagEdge {
    /// Lower node index.
    pub source: usize,
    /// Higher node index.
    pub target: usize,
    /// Number of tags the two pages share.
    pub shared: usize,
    /// `shared`, capped for styling.
    pub strength: usize,
}

/// Nodes, both edge kinds and the derived adjacency map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphData {
    /// Nodes in bundle order.
    pub nodes: Vec<GraphNode>,
    /// Hierarchy edges in bundle order of the child.
    pub hierarchy: Vec<HierarchyEdge>,
    /// Tag edges ordered by `(source, target)`.
    pub tags: Vec<TagEdge>,
    /// Neighbors of every node over both edge kinds. Every node has an entry.
    pub adjacency: BTreeMap<usize, BTreeSet<usize>>,
}

impl GraphData {
    /// Returns the neighbors of a node.
    pub fn neighbors(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.adjacency.get(&index).into_iter().flatten().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_match_option_defaults() {
        assert_eq!(
            GraphOptions::from(&GraphSettings::default()),
            GraphOptions::default()
        );
    }
}
