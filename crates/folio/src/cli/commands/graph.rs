//! Implementation of `folio graph`.

use std::{collections::BTreeMap, process::ExitCode};

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use folio_graph::{GraphData, GraphOptions, Tier, build_graph};

use crate::cli::{
    args::GraphCommand,
    context::CommandContext,
    output::{dim, print_json, subheader},
};

/// Tag edges listed in the text summary.
const STRONGEST_SHOWN: usize = 10;

/// Prints graph data as JSON, or a text summary.
pub fn run(ctx: &CommandContext, cmd: &GraphCommand) -> ExitCode {
    let model = match ctx.model() {
        Ok(model) => model,
        Err(code) => return code,
    };
    let graph = build_graph(&model, &GraphOptions::from(&ctx.config.graph));

    if cmd.json {
        return print_json(&graph);
    }

    print_summary(&graph);
    ExitCode::SUCCESS
}

/// Counts hierarchy edges per tier.
fn tier_counts(graph: &GraphData) -> BTreeMap<Tier, usize> {
    let mut counts = BTreeMap::new();
    for edge in &graph.hierarchy {
        *counts.entry(edge.tier).or_insert(0) += 1;
    }
    counts
}

/// Prints node and edge counts plus the strongest tag connections.
fn print_summary(graph: &GraphData) {
    println!("{}", subheader("Graph:"));
    println!("  nodes:           {}", graph.nodes.len());
    println!("  hierarchy edges: {}", graph.hierarchy.len());
    for (tier, count) in tier_counts(graph) {
        println!("    {}", dim(&format!("{tier:?}: {count}").to_lowercase()));
    }
    println!("  tag edges:       {}", graph.tags.len());

    let isolated = graph.adjacency.values().filter(|n| n.is_empty()).count();
    if isolated > 0 {
        println!("  isolated nodes:  {isolated}");
    }

    if graph.tags.is_empty() {
        return;
    }

    let mut strongest: Vec<_> = graph.tags.iter().collect();
    strongest.sort_by(|a, b| {
        b.shared
            .cmp(&a.shared)
            .then_with(|| (a.source, a.target).cmp(&(b.source, b.target)))
    });

    println!();
    println!("{}", subheader("Strongest tag links:"));
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Source", "Target", "Shared", "Strength"]);
    for edge in strongest.into_iter().take(STRONGEST_SHOWN) {
        table.add_row(vec![
            Cell::new(&graph.nodes[edge.source].label),
            Cell::new(&graph.nodes[edge.target].label),
            Cell::new(edge.shared.to_string()),
            Cell::new(edge.strength.to_string()),
        ]);
    }
    println!("{table}");
}

#[cfg(test)]
mod tests {
    use folio_model::{BuildOptions, Model};

    use super::*;

    #[test]
    fn tiers_are_counted() {
        let bundle = r#"<!-- id:"home" -->
<!-- id:"a" parent:"home" -->
<!-- id:"a1" parent:"a" -->
<!-- id:"a2" parent:"a" -->
<!-- id:"a3" parent:"a" -->
<!-- id:"b" parent:"home" -->
"#;
        let model = Model::build(bundle, &BuildOptions::default()).unwrap();
        let graph = build_graph(&model, &GraphOptions::default());
        let counts = tier_counts(&graph);
        assert_eq!(counts.get(&Tier::Medium), Some(&1));
        assert_eq!(counts.get(&Tier::Small), Some(&4));
        assert_eq!(counts.get(&Tier::Large), None);
    }
}
