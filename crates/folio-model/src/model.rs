//! The navigable page model.
//!
//! A [`Model`] is built in one pass from bundle text and is immutable afterwards:
//!
//! 1. Parse pages and sections ([`folio_document::parse_bundle`])
//! 2. Build the id lookup table (last duplicate wins)
//! 3. Choose the root (reserved id, else first page)
//! 4. Link parents, refusing unresolved and cycle-closing links
//! 5. Promote one representative per disconnected cluster onto the root
//! 6. Assign canonical paths and the reading order
//!
//! Re-parsing builds a new model; there is no in-place update.

use std::{collections::HashMap, path::Path};

use folio_document::{
    Address, BundleError, Diagnostic, Page, PageIndex, ParsedBundle, Section, parse_bundle,
    parse_bundle_file,
};
use tracing::info;

use crate::{
    hierarchy::{build_lookup, choose_root, descendant_counts, link_parents},
    paths::{assign_paths, resolve_segments},
    promote::promote_orphans,
};

/// The id that marks the root page when present.
pub const DEFAULT_ROOT_ID: &str = "home";

/// Options that influence model construction.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Reserved id of the root page.
    pub root_id: String,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            root_id: DEFAULT_ROOT_ID.to_string(),
        }
    }
}

/// The result of resolving an address.
#[derive(Debug, Clone, Copy)]
pub struct Resolved<'a> {
    /// The deepest page matched.
    pub page: &'a Page,
    /// The requested section, if the address named one that exists on `page`.
    pub section: Option<&'a Section>,
    /// True if every path segment matched.
    pub exact: bool,
}

/// An immutable tree of pages with lookup, addressing and navigation.
#[derive(Debug)]
pub struct Model {
    /// Pages in bundle order; `PageIndex` values index this vector.
    pages: Vec<Page>,
    /// Id to page; on duplicate ids the last page parsed wins.
    lookup: HashMap<String, PageIndex>,
    /// The root page.
    root: PageIndex,
    /// Pages in pre-order from the root.
    reading_order: Vec<PageIndex>,
    /// Position of each page in `reading_order`, indexed by page.
    reading_position: Vec<usize>,
    /// Number of transitive children, indexed by page.
    descendants: Vec<usize>,
    /// Findings recorded during construction.
    diagnostics: Vec<Diagnostic>,
}

impl Model {
    /// Parses bundle text and builds a model.
    ///
    /// Fails only if the bundle has no pages.
    pub fn build(text: &str, options: &BuildOptions) -> Result<Self, BundleError> {
        Self::from_parsed(parse_bundle(text)?, options)
    }

    /// Reads a bundle file and builds a model.
    pub fn load(path: &Path, options: &BuildOptions) -> Result<Self, BundleError> {
        Self::from_parsed(parse_bundle_file(path)?, options)
    }

    /// Builds a model from already parsed pages.
    ///
    /// `parsed.pages` must be indexed in order, as [`parse_bundle`] guarantees. Fails with
    /// [`BundleError::NoPages`] if there are none.
    pub fn from_parsed(parsed: ParsedBundle, options: &BuildOptions) -> Result<Self, BundleError> {
        let ParsedBundle {
            mut pages,
            mut diagnostics,
        } = parsed;
        if pages.is_empty() {
            return Err(BundleError::NoPages);
        }

        let lookup = build_lookup(&pages, &mut diagnostics);
        let root = choose_root(&lookup, &options.root_id);
        link_parents(&mut pages, &lookup, root, &mut diagnostics);
        let clusters = promote_orphans(&mut pages, root, &mut diagnostics);
        let reading_order = assign_paths(&mut pages, root);
        let descendants = descendant_counts(&pages);

        let mut reading_position = vec![0; pages.len()];
        for (position, index) in reading_order.iter().enumerate() {
            reading_position[index.0] = position;
        }

        info!(
            pages = pages.len(),
            root = %pages[root.0].id,
            clusters,
            diagnostics = diagnostics.len(),
            "built page model"
        );

        Ok(Self {
            pages,
            lookup,
            root,
            reading_order,
            reading_position,
            descendants,
            diagnostics,
        })
    }

    /// Returns all pages in bundle order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Returns the number of pages.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Returns true if the model has no pages. Built models always have at least one.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Returns the page at `index`.
    ///
    /// # Panics
    /// If `index` did not come from this model.
    pub fn page(&self, index: PageIndex) -> &Page {
        &self.pages[index.0]
    }

    /// Returns the page at `index`, if it exists.
    pub fn get(&self, index: PageIndex) -> Option<&Page> {
        self.pages.get(index.0)
    }

    /// Looks up a page by id. With duplicate ids, this is the last page parsed.
    pub fn by_id(&self, id: &str) -> Option<&Page> {
        self.lookup.get(id).map(|&index| self.page(index))
    }

    /// Returns the root page.
    pub fn root(&self) -> &Page {
        self.page(self.root)
    }

    /// Returns the root page index.
    pub fn root_index(&self) -> PageIndex {
        self.root
    }

    /// Returns a page's parent, `None` for the root.
    pub fn parent(&self, index: PageIndex) -> Option<&Page> {
        self.page(index).parent.map(|p| self.page(p))
    }

    /// Returns a page's children in order.
    pub fn children(&self, index: PageIndex) -> impl Iterator<Item = &Page> {
        self.page(index).children.iter().map(|&c| self.page(c))
    }

    /// Returns the total number of transitive children of a page.
    pub fn descendants(&self, index: PageIndex) -> usize {
        self.descendants[index.0]
    }

    /// Returns pages promoted onto the root, in cluster order.
    pub fn promoted(&self) -> impl Iterator<Item = &Page> {
        let mut promoted: Vec<&Page> = self.pages.iter().filter(|p| p.is_promoted()).collect();
        promoted.sort_by_key(|p| p.cluster_id);
        promoted.into_iter()
    }

    /// Returns the findings recorded while building.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Iterates pages in reading order (pre-order from the root).
    pub fn iter_preorder(&self) -> impl Iterator<Item = &Page> {
        self.reading_order.iter().map(|&index| self.page(index))
    }

    /// Resolves a path of ids to a page.
    ///
    /// Never fails: resolution stops at the first segment that matches no child and returns
    /// the deepest page matched so far. The empty path is the root.
    pub fn resolve<S: AsRef<str>>(&self, segments: &[S]) -> &Page {
        let (index, _) = resolve_segments(&self.pages, self.root, segments);
        self.page(index)
    }

    /// Resolves an address to a page and, when present on that page, a section.
    pub fn resolve_address(&self, address: &Address) -> Resolved<'_> {
        let (index, matched) = resolve_segments(&self.pages, self.root, &address.segments);
        let page = self.page(index);
        let section = address.section.as_deref().and_then(|id| page.section(id));
        Resolved {
            page,
            section,
            exact: matched == address.segments.len(),
        }
    }

    /// Returns the canonical address of a page.
    pub fn address_of(&self, index: PageIndex) -> Address {
        Address::new(&self.page(index).path, None)
    }

    /// Returns the chain of pages from the root down to `index`, both included.
    pub fn breadcrumbs(&self, index: PageIndex) -> Vec<&Page> {
        let mut chain = vec![self.page(index)];
        let mut current = index;
        while let Some(parent) = self.page(current).parent {
            if chain.len() > self.len() {
                break;
            }
            chain.push(self.page(parent));
            current = parent;
        }
        chain.reverse();
        chain
    }

    /// Returns the page before `index` in reading order.
    pub fn previous(&self, index: PageIndex) -> Option<&Page> {
        self.reading_position[index.0]
            .checked_sub(1)
            .and_then(|position| self.at_reading_position(position))
    }

    /// Returns the page after `index` in reading order.
    pub fn next(&self, index: PageIndex) -> Option<&Page> {
        self.at_reading_position(self.reading_position[index.0] + 1)
    }

    /// Returns up to `limit` other pages sharing at least one tag with `index`.
    ///
    /// Ordered by number of shared tags (descending), then bundle order.
    pub fn related(&self, index: PageIndex, limit: usize) -> Vec<(&Page, usize)> {
        let page = self.page(index);
        if page.tag_set.is_empty() {
            return Vec::new();
        }

        let mut related: Vec<(&Page, usize)> = self
            .pages()
            .iter()
            .filter(|other| other.index != index)
            .filter_map(|other| {
                let shared = page.tag_set.intersection(&other.tag_set).count();
                (shared > 0).then_some((other, shared))
            })
            .collect();

        related.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.index.cmp(&b.0.index)));
        related.truncate(limit);
        related
    }

    /// Looks up a section on a page by local id.
    pub fn section(&self, index: PageIndex, local_id: &str) -> Option<&Section> {
        self.page(index).section(local_id)
    }

    /// Page at a reading order position.
    fn at_reading_position(&self, position: usize) -> Option<&Page> {
        self.reading_order.get(position).map(|&i| self.page(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = r#"<!-- id:"home" title:"Home" -->
Welcome.
<!-- id:"alpha" title:"Alpha" parent:"home" -->
# Intro
Alpha text.
<!-- id:"beta" title:"Beta" parent:"home" -->
Beta text.
<!-- id:"gamma" title:"Gamma" parent:"missing" -->
Gamma text.
"#;

    fn model() -> Model {
        Model::build(EXAMPLE, &BuildOptions::default()).unwrap()
    }

    #[test]
    fn builds_example_bundle() {
        let model = model();
        assert_eq!(model.len(), 4);
        assert_eq!(model.root().id, "home");

        let gamma = model.by_id("gamma").unwrap();
        assert_eq!(gamma.cluster_id, Some(0));
        assert_eq!(gamma.parent, Some(model.root_index()));
        assert_eq!(model.by_id("beta").unwrap().path, vec!["beta"]);
        assert_eq!(model.resolve(&["home"]).id, "home");
    }

    #[test]
    fn empty_bundle_fails() {
        assert!(matches!(
            Model::build("no metadata here", &BuildOptions::default()),
            Err(BundleError::NoPages)
        ));
    }

    #[test]
    fn parsed_bundle_without_pages_fails() {
        let parsed = ParsedBundle {
            pages: Vec::new(),
            diagnostics: Vec::new(),
        };
        assert!(matches!(
            Model::from_parsed(parsed, &BuildOptions::default()),
            Err(BundleError::NoPages)
        ));
    }

    #[test]
    fn every_path_resolves_to_its_page() {
        let model = model();
        for page in model.pages() {
            assert_eq!(model.resolve(&page.path).index, page.index);
        }
    }

    #[test]
    fn descendants_count_promoted_clusters() {
        let model = model();
        let root = model.root_index();
        assert_eq!(model.descendants(root), 3);
        assert_eq!(model.descendants(model.by_id("alpha").unwrap().index), 0);
    }

    #[test]
    fn resolve_address_with_section() {
        let model = model();
        let resolved = model.resolve_address(&Address::parse("alpha#1").unwrap());
        assert!(resolved.exact);
        assert_eq!(resolved.page.id, "alpha");
        assert_eq!(resolved.section.map(|s| s.heading.as_str()), Some("Intro"));

        let fallback = model.resolve_address(&Address::parse("alpha/nope#1").unwrap());
        assert!(!fallback.exact);
        assert_eq!(fallback.page.id, "alpha");

        let missing_section = model.resolve_address(&Address::parse("beta#9").unwrap());
        assert!(missing_section.section.is_none());
    }

    #[test]
    fn custom_root_id() {
        let options = BuildOptions {
            root_id: "beta".into(),
        };
        let model = Model::build(EXAMPLE, &options).unwrap();
        assert_eq!(model.root().id, "beta");
        // home, alpha (under home) and gamma are disconnected from beta
        assert_eq!(model.promoted().count(), 2);
        assert_eq!(model.by_id("alpha").unwrap().path, vec!["home", "alpha"]);
    }

    #[test]
    fn address_of_page() {
        let model = model();
        let gamma = model.by_id("gamma").unwrap();
        assert_eq!(model.address_of(gamma.index).to_string(), "gamma");
    }

    mod navigation {
        use super::*;

        const BUNDLE: &str = r#"<!-- id:"home" title:"Home" -->
<!-- id:"a" parent:"home" tags:"rust, cli" -->
## Usage
<!-- id:"a1" parent:"a" tags:"rust" -->
<!-- id:"b" parent:"home" tags:"rust, cli, web" -->
<!-- id:"c" parent:"home" tags:"web" -->
"#;

        fn model() -> Model {
            Model::build(BUNDLE, &BuildOptions::default()).unwrap()
        }

        fn ids<'a>(pages: impl IntoIterator<Item = &'a Page>) -> Vec<&'a str> {
            pages.into_iter().map(|p| p.id.as_str()).collect()
        }

        #[test]
        fn breadcrumbs_run_from_root() {
            let model = model();
            let a1 = model.by_id("a1").unwrap().index;
            assert_eq!(ids(model.breadcrumbs(a1)), vec!["home", "a", "a1"]);
            assert_eq!(ids(model.breadcrumbs(model.root_index())), vec!["home"]);
        }

        #[test]
        fn previous_and_next_follow_preorder() {
            let model = model();
            assert_eq!(ids(model.iter_preorder()), vec!["home", "a", "a1", "b", "c"]);

            let a1 = model.by_id("a1").unwrap().index;
            assert_eq!(model.previous(a1).map(|p| p.id.as_str()), Some("a"));
            assert_eq!(model.next(a1).map(|p| p.id.as_str()), Some("b"));
            assert!(model.previous(model.root_index()).is_none());
            assert!(model.next(model.by_id("c").unwrap().index).is_none());
        }

        #[test]
        fn related_ranks_by_shared_tags() {
            let model = model();
            let a = model.by_id("a").unwrap().index;
            let related: Vec<(&str, usize)> = model
                .related(a, 10)
                .into_iter()
                .map(|(p, n)| (p.id.as_str(), n))
                .collect();
            assert_eq!(related, vec![("b", 2), ("a1", 1)]);

            assert_eq!(model.related(a, 1).len(), 1);
            assert!(model.related(model.root_index(), 10).is_empty());
        }

        #[test]
        fn section_lookup() {
            let model = model();
            let a = model.by_id("a").unwrap().index;
            assert_eq!(model.section(a, "1").unwrap().heading, "Usage");
            assert!(model.section(a, "2").is_none());
        }
    }
}
