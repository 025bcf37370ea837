//! Query execution and ranking.

use std::cmp::Reverse;

use folio_document::Page;
use tracing::debug;

use crate::{
    params::SearchWeights,
    scoring::{score_page, score_section},
    tokenize::Query,
    types::{PageHit, SearchOutcome, SectionHit},
};

/// Runs a query against a page collection.
///
/// Pages qualify when every token occurs as a substring of their search text. Qualifying
/// pages are ranked by total score, then case-insensitive title, then bundle order. The
/// pages are only read.
pub fn search(pages: &[Page], input: &str, weights: &SearchWeights) -> SearchOutcome {
    let Some(query) = Query::parse(input, weights.min_token_len) else {
        return SearchOutcome::Inactive;
    };
    if query.tokens.is_empty() {
        debug!(query = input, "no usable tokens");
        return SearchOutcome::Results(Vec::new());
    }

    let mut ranked: Vec<(String, PageHit)> = pages
        .iter()
        .filter(|page| query.prefilter(&page.search_text))
        .map(|page| (page.title.to_lowercase(), score_hit(page, &query, weights)))
        .collect();

    ranked.sort_by(|(a_title, a), (b_title, b)| {
        b.score
            .cmp(&a.score)
            .then_with(|| a_title.cmp(b_title))
            .then_with(|| a.page.cmp(&b.page))
    });

    debug!(tokens = ?query.tokens, hits = ranked.len(), "search complete");
    SearchOutcome::Results(ranked.into_iter().map(|(_, hit)| hit).collect())
}

fn score_hit(page: &Page, query: &Query, weights: &SearchWeights) -> PageHit {
    let mut sections: Vec<(usize, SectionHit)> = page
        .sections
        .iter()
        .enumerate()
        .filter(|(_, section)| query.prefilter(&section.search_text))
        .map(|(position, section)| {
            let hit = SectionHit {
                local_id: section.local_id.clone(),
                heading: section.heading.clone(),
                score: score_section(section, query, weights),
            };
            (position, hit)
        })
        .collect();
    sections.sort_by_key(|(position, hit)| (Reverse(hit.score), *position));

    let matched = u32::try_from(sections.len()).unwrap_or(u32::MAX);
    let score =
        score_page(page, query, weights).saturating_add(matched.min(weights.section_boost_cap));

    PageHit {
        page: page.index,
        id: page.id.clone(),
        title: page.title.clone(),
        path: page.path.clone(),
        score,
        sections: sections.into_iter().map(|(_, hit)| hit).collect(),
    }
}
