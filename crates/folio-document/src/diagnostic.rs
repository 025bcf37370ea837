//! Non-fatal findings recorded while building a model.
//!
//! The parser and the hierarchy passes absorb irregular input instead of failing. Each
//! irregularity is recorded here so that callers can surface it (`folio check`) or test it.

use std::fmt;

use serde::Serialize;

use crate::PageIndex;

/// A degraded-but-tolerated condition found in a bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A metadata block had no `id` key; the page received a synthesized id.
    MissingId {
        /// The page that received the synthesized id.
        page: PageIndex,
        /// The synthesized id.
        id: String,
    },
    /// Two pages share an id. The later page wins in the id lookup table.
    DuplicateId {
        /// The duplicated id.
        id: String,
        /// The page the lookup table now points to.
        kept: PageIndex,
        /// The earlier page that is no longer reachable by id.
        shadowed: PageIndex,
    },
    /// A page names a parent id that no page has; the page became an orphan.
    UnresolvedParent {
        /// The orphaned page.
        page: PageIndex,
        /// The parent id that did not resolve.
        parent_id: String,
    },
    /// Linking a page to its parent would have closed a cycle; the link was refused.
    ParentCycle {
        /// The page left without a parent.
        page: PageIndex,
        /// The parent id that led back to the page.
        parent_id: String,
    },
    /// A disconnected cluster was attached to the root through this page.
    Promoted {
        /// The promoted representative.
        page: PageIndex,
        /// Sequential cluster identifier, in discovery order.
        cluster_id: usize,
    },
}

impl Diagnostic {
    /// Returns the page this diagnostic is about.
    pub fn page(&self) -> PageIndex {
        match self {
            Self::MissingId { page, .. }
            | Self::UnresolvedParent { page, .. }
            | Self::ParentCycle { page, .. }
            | Self::Promoted { page, .. } => *page,
            Self::DuplicateId { shadowed, .. } => *shadowed,
        }
    }

    /// Short machine-friendly name of the diagnostic kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingId { .. } => "missing_id",
            Self::DuplicateId { .. } => "duplicate_id",
            Self::UnresolvedParent { .. } => "unresolved_parent",
            Self::ParentCycle { .. } => "parent_cycle",
            Self::Promoted { .. } => "promoted",
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingId { page, id } => {
                write!(f, "page {page} has no id, using '{id}'")
            }
            Self::DuplicateId { id, kept, shadowed } => {
                write!(f, "id '{id}' on page {shadowed} is shadowed by page {kept}")
            }
            Self::UnresolvedParent { page, parent_id } => {
                write!(f, "page {page} names unknown parent '{parent_id}'")
            }
            Self::ParentCycle { page, parent_id } => {
                write!(f, "page {page} parent '{parent_id}' would form a cycle")
            }
            Self::Promoted { page, cluster_id } => {
                write!(f, "page {page} promoted onto the root as cluster {cluster_id}")
            }
        }
    }
}
