//! Implementation of `folio search`.

use std::process::ExitCode;

use folio_document::Address;
use folio_search::{PageHit, Query, SearchOutcome, SearchWeights, search};

use crate::cli::{
    args::SearchCommand,
    context::CommandContext,
    output::{dim, display_path, header, print_json},
};

/// Matching sections listed under each hit.
const SECTIONS_SHOWN: usize = 3;

/// Runs a query against the bundle and prints ranked hits.
pub fn run(ctx: &CommandContext, cmd: &SearchCommand) -> ExitCode {
    let input = cmd.queries.join(" ");
    let weights = SearchWeights::from(&ctx.config.search);

    if Query::parse(&input, weights.min_token_len).is_none() {
        if cmd.json {
            return print_json(&SearchOutcome::Inactive);
        }
        println!("no query");
        return ExitCode::SUCCESS;
    }

    let model = match ctx.model() {
        Ok(model) => model,
        Err(code) => return code,
    };

    let limit = cmd.limit.unwrap_or(ctx.config.search.limit);
    let hits: Vec<PageHit> = search(model.pages(), &input, &weights)
        .hits()
        .iter()
        .take(limit)
        .cloned()
        .collect();

    if cmd.json {
        return print_json(&SearchOutcome::Results(hits));
    }

    if hits.is_empty() {
        println!("{}", dim("no results"));
        return ExitCode::SUCCESS;
    }
    for (rank, hit) in hits.iter().enumerate() {
        print_hit(rank + 1, hit);
    }
    ExitCode::SUCCESS
}

/// Prints one hit with its best sections.
fn print_hit(rank: usize, hit: &PageHit) {
    println!(
        "{} {} {} {}",
        dim(&format!("{rank:>3}.")),
        header(&hit.title),
        dim(&display_path(&hit.path)),
        dim(&format!("(score {})", hit.score))
    );
    for section in hit.sections.iter().take(SECTIONS_SHOWN) {
        println!(
            "       {} {}",
            section.heading,
            dim(&format!(
                "{} ({})",
                Address::new(&hit.path, Some(&section.local_id)),
                section.score
            ))
        );
    }
    let hidden = hit.sections.len().saturating_sub(SECTIONS_SHOWN);
    if hidden > 0 {
        println!("       {}", dim(&format!("... {hidden} more sections")));
    }
}
