//! Parent/child wiring.
//!
//! Pages name their parent by id. Linking resolves those ids through the lookup table in
//! bundle order, so every `children` list ends up in bundle order too. Unresolvable parents
//! and links that would close a cycle are refused; the page is left parentless and becomes
//! the top of its own cluster for the promoter to pick up.

use std::collections::HashMap;

use folio_document::{Diagnostic, Page, PageIndex};
use tracing::warn;

/// Builds the id lookup table. When ids repeat, the last page parsed wins.
pub(crate) fn build_lookup(
    pages: &[Page],
    diagnostics: &mut Vec<Diagnostic>,
) -> HashMap<String, PageIndex> {
    let mut lookup = HashMap::with_capacity(pages.len());
    for page in pages {
        if let Some(shadowed) = lookup.insert(page.id.clone(), page.index) {
            warn!(id = %page.id, kept = %page.index, %shadowed, "duplicate page id");
            diagnostics.push(Diagnostic::DuplicateId {
                id: page.id.clone(),
                kept: page.index,
                shadowed,
            });
        }
    }
    lookup
}

/// Picks the root: the page holding the reserved id, otherwise the first page.
pub(crate) fn choose_root(lookup: &HashMap<String, PageIndex>, root_id: &str) -> PageIndex {
    lookup.get(root_id).copied().unwrap_or(PageIndex(0))
}

/// Resolves every non-root page's parent id and wires `parent`/`children`.
///
/// Links are judged in bundle order: a link that would close a cycle with the links accepted
/// before it is refused. Within any parent cycle that is the member latest in the bundle.
pub(crate) fn link_parents(
    pages: &mut [Page],
    lookup: &HashMap<String, PageIndex>,
    root: PageIndex,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let declared: Vec<Option<PageIndex>> = pages
        .iter()
        .map(|page| {
            if page.index == root {
                return None;
            }
            page.parent_id
                .as_ref()
                .and_then(|parent_id| lookup.get(parent_id).copied())
        })
        .collect();
    let closers = cycle_closers(&declared);

    for idx in 0..pages.len() {
        let index = PageIndex(idx);
        if index == root {
            continue;
        }
        let Some(parent_id) = pages[idx].parent_id.clone() else {
            continue;
        };

        let Some(parent) = declared[idx] else {
            warn!(page = %pages[idx].id, %parent_id, "parent does not resolve");
            diagnostics.push(Diagnostic::UnresolvedParent {
                page: index,
                parent_id,
            });
            continue;
        };

        if closers[idx] {
            warn!(page = %pages[idx].id, %parent_id, "parent link would form a cycle");
            diagnostics.push(Diagnostic::ParentCycle {
                page: index,
                parent_id,
            });
            continue;
        }

        pages[idx].parent = Some(parent);
        pages[parent.0].children.push(index);
    }
}

/// Walk state of a page while searching for cycles.
#[derive(Clone, Copy)]
enum Visit {
    /// Not reached yet.
    New,
    /// On the walk currently in progress, at this position.
    OnWalk(usize),
    /// Fully explored.
    Done,
}

/// Marks, for each parent cycle, the member with the highest bundle index.
///
/// Each page has at most one parent, so following parent links from every unvisited page
/// and stopping at anything already explored visits each page once.
fn cycle_closers(parents: &[Option<PageIndex>]) -> Vec<bool> {
    let mut closers = vec![false; parents.len()];
    let mut state = vec![Visit::New; parents.len()];
    let mut walk: Vec<PageIndex> = Vec::new();

    for start in 0..parents.len() {
        walk.clear();
        let mut current = Some(PageIndex(start));
        while let Some(index) = current {
            match state[index.0] {
                Visit::New => {
                    state[index.0] = Visit::OnWalk(walk.len());
                    walk.push(index);
                    current = parents[index.0];
                }
                Visit::OnWalk(position) => {
                    if let Some(&closer) = walk[position..].iter().max() {
                        closers[closer.0] = true;
                    }
                    break;
                }
                Visit::Done => break,
            }
        }
        for index in &walk {
            state[index.0] = Visit::Done;
        }
    }
    closers
}

/// Counts all transitive children of every page.
///
/// Parent links must be acyclic. The walk is iterative, so chain depth is not limited by
/// the call stack.
pub(crate) fn descendant_counts(pages: &[Page]) -> Vec<usize> {
    let mut counts = vec![0; pages.len()];
    let mut stack: Vec<(PageIndex, bool)> = pages
        .iter()
        .filter(|page| page.parent.is_none())
        .map(|page| (page.index, false))
        .collect();

    while let Some((index, expanded)) = stack.pop() {
        let children = &pages[index.0].children;
        if expanded {
            let total: usize = children.iter().map(|child| 1 + counts[child.0]).sum();
            counts[index.0] = total;
        } else {
            stack.push((index, true));
            stack.extend(children.iter().map(|&child| (child, false)));
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use folio_document::parse_bundle;

    use super::*;

    fn linked(bundle: &str) -> (Vec<Page>, PageIndex, Vec<Diagnostic>) {
        let parsed = parse_bundle(bundle).unwrap();
        let mut pages = parsed.pages;
        let mut diagnostics = parsed.diagnostics;
        let lookup = build_lookup(&pages, &mut diagnostics);
        let root = choose_root(&lookup, "home");
        link_parents(&mut pages, &lookup, root, &mut diagnostics);
        (pages, root, diagnostics)
    }

    #[test]
    fn links_children_in_bundle_order() {
        let (pages, root, diagnostics) = linked(
            r#"<!-- id:"home" --><!-- id:"b" parent:"home" --><!-- id:"a" parent:"home" -->"#,
        );
        assert_eq!(root, PageIndex(0));
        assert_eq!(pages[0].children, vec![PageIndex(1), PageIndex(2)]);
        assert_eq!(pages[2].parent, Some(PageIndex(0)));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn root_falls_back_to_first_page() {
        let (pages, root, _) = linked(r#"<!-- id:"start" --><!-- id:"x" parent:"start" -->"#);
        assert_eq!(root, PageIndex(0));
        assert_eq!(pages[1].parent, Some(root));
    }

    #[test]
    fn reserved_root_id_wins_over_first_page() {
        let (pages, root, _) =
            linked(r#"<!-- id:"first" parent:"home" --><!-- id:"home" parent:"first" -->"#);
        assert_eq!(root, PageIndex(1));
        assert!(pages[1].parent.is_none(), "root never gets a parent");
        assert_eq!(pages[0].parent, Some(PageIndex(1)));
    }

    #[test]
    fn unresolved_parent_leaves_orphan() {
        let (pages, _, diagnostics) =
            linked(r#"<!-- id:"home" --><!-- id:"gamma" parent:"missing" -->"#);
        assert!(pages[1].parent.is_none());
        assert_eq!(
            diagnostics,
            vec![Diagnostic::UnresolvedParent {
                page: PageIndex(1),
                parent_id: "missing".into()
            }]
        );
    }

    #[test]
    fn cycles_are_broken() {
        let (pages, _, diagnostics) = linked(
            r#"<!-- id:"home" --><!-- id:"a" parent:"b" --><!-- id:"b" parent:"a" --><!-- id:"s" parent:"s" -->"#,
        );
        assert_eq!(pages[1].parent, Some(PageIndex(2)));
        assert!(pages[2].parent.is_none());
        assert!(pages[3].parent.is_none());
        let kinds: Vec<&str> = diagnostics.iter().map(Diagnostic::kind).collect();
        assert_eq!(kinds, vec!["parent_cycle", "parent_cycle"]);
    }

    #[test]
    fn duplicate_ids_last_wins() {
        let mut diagnostics = Vec::new();
        let parsed = parse_bundle(r#"<!-- id:"a" -->1<!-- id:"a" -->2"#).unwrap();
        let lookup = build_lookup(&parsed.pages, &mut diagnostics);
        assert_eq!(lookup["a"], PageIndex(1));
        assert_eq!(
            diagnostics,
            vec![Diagnostic::DuplicateId {
                id: "a".into(),
                kept: PageIndex(1),
                shadowed: PageIndex(0)
            }]
        );
    }

    #[test]
    fn counts_descendants() {
        let (pages, root, _) = linked(
            r#"<!-- id:"home" --><!-- id:"a" parent:"home" --><!-- id:"b" parent:"a" --><!-- id:"c" parent:"a" -->"#,
        );
        let counts = descendant_counts(&pages);
        assert_eq!(counts[root.0], 3);
        assert_eq!(counts[1], 2);
        assert_eq!(counts[3], 0);
    }
}
