//! Orphan promotion ("secondary homes").
//!
//! After linking, some pages may not reach the root: their chain of parents ends at a page
//! with no parent. Every such chain end defines a cluster. One representative per cluster,
//! the member with the most descendants (first in bundle order on ties), is attached to the
//! root and tagged with a sequential cluster id. Other members keep their structure.

use std::collections::HashMap;

use folio_document::{Diagnostic, Page, PageIndex};
use tracing::info;

use crate::hierarchy::descendant_counts;

/// Attaches one representative of each disconnected cluster to the root.
///
/// Returns the number of clusters promoted.
pub(crate) fn promote_orphans(
    pages: &mut [Page],
    root: PageIndex,
    diagnostics: &mut Vec<Diagnostic>,
) -> usize {
    let clusters = find_clusters(pages, root);
    let counts = descendant_counts(pages);

    let representatives: Vec<PageIndex> = clusters
        .iter()
        .filter_map(|members| select_representative(&counts, members))
        .collect();

    for (cluster_id, &representative) in representatives.iter().enumerate() {
        if let Some(old_parent) = pages[representative.0].parent {
            pages[old_parent.0].children.retain(|&c| c != representative);
        }
        pages[representative.0].parent = Some(root);
        pages[representative.0].cluster_id = Some(cluster_id);
        pages[root.0].children.push(representative);

        info!(
            page = %pages[representative.0].id,
            cluster_id,
            "promoted disconnected cluster onto root"
        );
        diagnostics.push(Diagnostic::Promoted {
            page: representative,
            cluster_id,
        });
    }

    representatives.len()
}

/// Picks the member with the strictly largest descendant count; earlier members win ties.
fn select_representative(counts: &[usize], members: &[PageIndex]) -> Option<PageIndex> {
    let mut best: Option<(PageIndex, usize)> = None;
    for &candidate in members {
        let count = counts[candidate.0];
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((candidate, count));
        }
    }
    best.map(|(representative, _)| representative)
}

/// Buckets every page that does not reach the root by its topmost ancestor.
///
/// Buckets come back in the order their first member appears in the bundle; members within a
/// bucket are in bundle order.
fn find_clusters(pages: &[Page], root: PageIndex) -> Vec<Vec<PageIndex>> {
    let tops = chain_tops(pages);
    let mut clusters: Vec<Vec<PageIndex>> = Vec::new();
    let mut bucket_of: HashMap<PageIndex, usize> = HashMap::new();

    for page in pages {
        let top = tops[page.index.0];
        if top == root {
            continue;
        }
        let slot = *bucket_of.entry(top).or_insert_with(|| {
            clusters.push(Vec::new());
            clusters.len() - 1
        });
        clusters[slot].push(page.index);
    }

    clusters
}

/// The end of each page's chain of parents, found by walking down from every parentless page.
fn chain_tops(pages: &[Page]) -> Vec<PageIndex> {
    let mut tops: Vec<PageIndex> = pages.iter().map(|page| page.index).collect();
    let mut stack: Vec<PageIndex> = pages
        .iter()
        .filter(|page| page.parent.is_none())
        .map(|page| page.index)
        .collect();

    while let Some(index) = stack.pop() {
        let top = tops[index.0];
        for &child in &pages[index.0].children {
            tops[child.0] = top;
            stack.push(child);
        }
    }
    tops
}
