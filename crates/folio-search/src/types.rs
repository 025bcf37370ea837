//! Data structures returned by search.

use folio_document::PageIndex;
use serde::Serialize;

/// A section that matched the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionHit {
    /// Section local id within its page.
    pub local_id: String,
    /// Heading text.
    pub heading: String,
    /// Section score.
    pub score: u32,
}

/// A page that matched the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageHit {
    /// Index of the page in the model.
    pub page: PageIndex,
    /// Page id.
    pub id: String,
    /// Page title.
    pub title: String,
    /// Canonical page path.
    pub path: Vec<String>,
    /// Total score: field score plus the capped section boost.
    pub score: u32,
    /// Matching sections, best first.
    pub sections: Vec<SectionHit>,
}

/// The outcome of running a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "hits", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// The query was empty; callers should show their default view.
    Inactive,
    /// Ranked hits, possibly none.
    Results(Vec<PageHit>),
}

impl SearchOutcome {
    /// Returns the hits, or an empty slice for an inactive search.
    pub fn hits(&self) -> &[PageHit] {
        match self {
            Self::Inactive => &[],
            Self::Results(hits) => hits,
        }
    }

    /// Returns true if the query was empty.
    pub fn is_inactive(&self) -> bool {
        matches!(self, Self::Inactive)
    }
}
