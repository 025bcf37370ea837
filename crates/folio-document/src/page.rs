//! Page records.
//!
//! A [`Page`] is created by the bundle parser with its metadata, content and sections filled
//! in. The structural fields (`parent`, `children`, `path`, `cluster_id`) start empty and are
//! assigned later by the hierarchy passes in `folio-model`.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};

use serde::Serialize;

use crate::section::{Section, index_sections};

/// Position of a page in the owning collection (bundle order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PageIndex(pub usize);

impl PageIndex {
    /// Returns the raw collection offset.
    pub fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for PageIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One document in the bundle.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    /// Position in bundle order.
    pub index: PageIndex,
    /// Identifier from the `id` metadata key.
    pub id: String,
    /// Title from the `title` metadata key, falling back to the id.
    pub title: String,
    /// Raw parent id from the `parent` metadata key, before linking.
    pub parent_id: Option<String>,
    /// Raw comma-separated tag string from the `tags` metadata key.
    pub tags: String,
    /// Metadata keys other than `id`, `title`, `parent` and `tags`.
    pub attributes: BTreeMap<String, String>,
    /// Trimmed body text.
    pub content: String,
    /// Normalized tags.
    pub tag_set: BTreeSet<String>,
    /// Lowercased title, tags and content, used as a cheap search prefilter.
    #[serde(skip)]
    pub search_text: String,
    /// Heading sections in document order.
    pub sections: Vec<Section>,

    /// Linked parent page, `None` for the root and for orphans.
    pub parent: Option<PageIndex>,
    /// Linked children in bundle order.
    pub children: Vec<PageIndex>,
    /// Canonical id sequence from (excluding) the root down to this page.
    pub path: Vec<String>,
    /// Cluster id, set only when this page was promoted onto the root.
    pub cluster_id: Option<usize>,
}

impl Page {
    /// Creates a page from parsed metadata and body text.
    ///
    /// Derived text fields (tag set, search text, sections) are computed here; structural
    /// fields are left empty.
    pub fn new(index: PageIndex, meta: PageMeta, body: &str) -> Self {
        let content = body.trim().to_string();
        let tag_set = parse_tags(&meta.tags);
        let search_text = format!("{} {} {}", meta.title, meta.tags, content).to_lowercase();
        let sections = index_sections(&content);

        Self {
            index,
            id: meta.id,
            title: meta.title,
            parent_id: meta.parent_id,
            tags: meta.tags,
            attributes: meta.attributes,
            content,
            tag_set,
            search_text,
            sections,
            parent: None,
            children: Vec::new(),
            path: Vec::new(),
            cluster_id: None,
        }
    }

    /// Returns true if this page was reparented onto the root by the orphan promoter.
    pub fn is_promoted(&self) -> bool {
        self.cluster_id.is_some()
    }

    /// Looks up a section by its local id.
    pub fn section(&self, local_id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.local_id == local_id)
    }
}

/// Metadata fields extracted from one metadata block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMeta {
    /// Page id.
    pub id: String,
    /// Page title.
    pub title: String,
    /// Raw parent id, `None` when absent or blank.
    pub parent_id: Option<String>,
    /// Raw tag string.
    pub tags: String,
    /// Any other keys.
    pub attributes: BTreeMap<String, String>,
}

/// Splits a raw tag string into a set of normalized tags.
///
/// Tags are separated by commas, trimmed and lowercased; empty entries are dropped and
/// duplicates collapse.
pub fn parse_tags(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}
