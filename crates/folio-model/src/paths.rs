//! Canonical page paths.
//!
//! A page's path is the sequence of ids from the root (excluded) down to the page itself.
//! Paths are assigned once, after promotion, in a pre-order walk that also yields the
//! reading order used for previous/next navigation.

use std::collections::HashSet;

use folio_document::{Page, PageIndex};

/// Assigns `path` to every page reachable from the root.
///
/// Returns the pages in pre-order (reading order), root first.
pub(crate) fn assign_paths(pages: &mut [Page], root: PageIndex) -> Vec<PageIndex> {
    let mut order = Vec::with_capacity(pages.len());
    let mut visited = HashSet::new();
    let mut stack = vec![root];
    pages[root.0].path.clear();

    while let Some(index) = stack.pop() {
        if !visited.insert(index) {
            continue;
        }
        order.push(index);

        for slot in 0..pages[index.0].children.len() {
            let child = pages[index.0].children[slot];
            let parent_path = &pages[index.0].path;
            let mut path = Vec::with_capacity(parent_path.len() + 1);
            path.extend_from_slice(parent_path);
            path.push(pages[child.0].id.clone());
            pages[child.0].path = path;
        }
        // Push in reverse so the first child is visited next.
        stack.extend(pages[index.0].children.iter().rev().copied());
    }

    order
}

/// Walks from the root matching one child id per segment.
///
/// Stops at the first segment with no matching child and returns the deepest page reached,
/// along with how many segments matched.
pub(crate) fn resolve_segments<S: AsRef<str>>(
    pages: &[Page],
    root: PageIndex,
    segments: &[S],
) -> (PageIndex, usize) {
    let mut current = root;
    let mut matched = 0;

    for segment in segments {
        let next = pages[current.0]
            .children
            .iter()
            .copied()
            .find(|&child| pages[child.0].id == segment.as_ref());
        match next {
            Some(child) => {
                current = child;
                matched += 1;
            }
            None => break,
        }
    }

    (current, matched)
}
