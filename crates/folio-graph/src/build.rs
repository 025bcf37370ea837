//! Graph construction.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use folio_model::Model;
use tracing::debug;

use crate::types::{GraphData, GraphNode, GraphOptions, HierarchyEdge, TagEdge, Tier};

/// Builds graph data from a model. The model is only read.
pub fn build_graph(model: &Model, options: &GraphOptions) -> GraphData {
    let nodes: Vec<GraphNode> = model
        .pages()
        .iter()
        .map(|page| GraphNode {
            index: page.index.get(),
            id: page.id.clone(),
            label: page.title.clone(),
            page: page.index,
        })
        .collect();

    let hierarchy = hierarchy_edges(model, options);
    let linked: HashSet<(usize, usize)> = hierarchy
        .iter()
        .map(|e| ordered(e.source, e.target))
        .collect();
    let tags = tag_edges(model, &linked, options.tag_strength_cap);

    let mut adjacency: BTreeMap<usize, BTreeSet<usize>> =
        nodes.iter().map(|n| (n.index, BTreeSet::new())).collect();
    let pairs = hierarchy
        .iter()
        .map(|e| (e.source, e.target))
        .chain(tags.iter().map(|e| (e.source, e.target)));
    for (a, b) in pairs {
        adjacency.entry(a).or_default().insert(b);
        adjacency.entry(b).or_default().insert(a);
    }

    debug!(
        nodes = nodes.len(),
        hierarchy_edges = hierarchy.len(),
        tag_edges = tags.len(),
        "built graph data"
    );

    GraphData {
        nodes,
        hierarchy,
        tags,
        adjacency,
    }
}

/// One edge per linked page, except promoted pages hanging directly off the root.
fn hierarchy_edges(model: &Model, options: &GraphOptions) -> Vec<HierarchyEdge> {
    let root = model.root_index();
    model
        .pages()
        .iter()
        .filter_map(|page| {
            let parent = page.parent?;
            if page.is_promoted() && parent == root {
                return None;
            }
            Some(HierarchyEdge {
                source: parent.get(),
                target: page.index.get(),
                tier: Tier::from_descendants(model.descendants(page.index), options),
            })
        })
        .collect()
}

/// Counts shared tags per page pair through an inverted tag index.
fn tag_edges(model: &Model, linked: &HashSet<(usize, usize)>, cap: usize) -> Vec<TagEdge> {
    let mut by_tag: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for page in model.pages() {
        for tag in &page.tag_set {
            by_tag.entry(tag).or_default().push(page.index.get());
        }
    }

    let mut shared: BTreeMap<(usize, usize), usize> = BTreeMap::new();
    for members in by_tag.values() {
        for (i, &a) in members.iter().enumerate() {
            for &b in &members[i + 1..] {
                *shared.entry(ordered(a, b)).or_default() += 1;
            }
        }
    }

    shared
        .into_iter()
        .filter(|pair| !linked.contains(&pair.0))
        .map(|((source, target), shared)| TagEdge {
            source,
            target,
            shared,
            strength: shared.min(cap),
        })
        .collect()
}

fn ordered(a: usize, b: usize) -> (usize, usize) {
    if a <= b { (a, b) } else { (b, a) }
}

#[cfg(test)]
mod tests {
    use folio_model::BuildOptions;

    use super::*;
    use crate::types::DEFAULT_TAG_STRENGTH_CAP;

    fn graph(text: &str) -> GraphData {
        let model = Model::build(text, &BuildOptions::default()).unwrap();
        build_graph(&model, &GraphOptions::default())
    }

    #[test]
    fn nodes_follow_bundle_order() {
        let g = graph(r#"<!-- id:"home" title:"Home" --><!-- id:"a" title:"A" parent:"home" -->"#);
        assert_eq!(g.nodes.len(), 2);
        assert_eq!(g.nodes[1].label, "A");
        assert_eq!(g.nodes[1].page.get(), 1);
    }

    #[test]
    fn promoted_edge_to_root_is_suppressed() {
        let g = graph(
            r#"<!-- id:"home" --><!-- id:"a" parent:"home" --><!-- id:"orphan" parent:"gone" --><!-- id:"kid" parent:"orphan" -->"#,
        );
        let edges: Vec<(usize, usize)> = g.hierarchy.iter().map(|e| (e.source, e.target)).collect();
        assert_eq!(edges, vec![(0, 1), (2, 3)]);
    }

    #[test]
    fn tag_edges_skip_hierarchy_pairs() {
        let g = graph(
            r#"<!-- id:"home" tags:"x" --><!-- id:"a" parent:"home" tags:"x, y" --><!-- id:"b" parent:"home" tags:"x, y, z" --><!-- id:"c" parent:"home" tags:"q" -->"#,
        );
        assert_eq!(
            g.tags,
            vec![TagEdge {
                source: 1,
                target: 2,
                shared: 2,
                strength: 2
            }]
        );
    }

    #[test]
    fn strength_is_capped() {
        let g = graph(
            r#"<!-- id:"home" --><!-- id:"a" parent:"home" tags:"p, q, r, s" --><!-- id:"b" parent:"home" tags:"p, q, r, s" -->"#,
        );
        assert_eq!(g.tags[0].shared, 4);
        assert_eq!(g.tags[0].strength, DEFAULT_TAG_STRENGTH_CAP);
    }

    #[test]
    fn adjacency_covers_both_edge_kinds() {
        let g = graph(
            r#"<!-- id:"home" --><!-- id:"a" parent:"home" tags:"t" --><!-- id:"b" parent:"home" tags:"t" --><!-- id:"lone" parent:"gone" -->"#,
        );
        assert_eq!(g.neighbors(1).collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(g.neighbors(0).collect::<Vec<_>>(), vec![1, 2]);
        assert!(g.adjacency[&3].is_empty());
        assert_eq!(g.adjacency.len(), 4);
    }

    #[test]
    fn tiers_follow_descendant_counts() {
        let options = GraphOptions::default();
        assert_eq!(Tier::from_descendants(0, &options), Tier::Small);
        assert_eq!(Tier::from_descendants(3, &options), Tier::Medium);
        assert_eq!(Tier::from_descendants(10, &options), Tier::Large);
        assert_eq!(Tier::from_descendants(99, &options), Tier::Huge);

        let g = graph(
            r#"<!-- id:"home" --><!-- id:"hub" parent:"home" --><!-- id:"x" parent:"hub" --><!-- id:"y" parent:"hub" --><!-- id:"z" parent:"hub" -->"#,
        );
        assert_eq!(g.hierarchy[0].tier, Tier::Medium);
        assert_eq!(g.hierarchy[1].tier, Tier::Small);
    }

    #[test]
    fn serializes_to_json() {
        let g = graph(r#"<!-- id:"home" --><!-- id:"a" parent:"home" -->"#);
        let json = serde_json::to_value(&g).unwrap();
        assert_eq!(json["hierarchy"][0]["tier"], "small");
        assert_eq!(json["adjacency"]["0"][0], 1);
    }
}
