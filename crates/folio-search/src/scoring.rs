//! Field scoring for pages and sections.
//!
//! Each query token earns a fixed weight per field it matches as a whole word. A multi-token
//! query also earns one phrase bonus: the primary field's if the phrase occurs there verbatim,
//! otherwise the body's. Lowercased copies are made locally and never stored on the page.

use folio_document::{Page, Section};

use crate::{
    params::SearchWeights,
    tokenize::{Query, contains_word},
};

/// Scores a page's title, tags and body.
pub(crate) fn score_page(page: &Page, query: &Query, weights: &SearchWeights) -> u32 {
    let title = page.title.to_lowercase();
    let body = page.content.to_lowercase();

    let mut score: u32 = 0;
    for token in &query.tokens {
        if contains_word(&title, token) {
            score = score.saturating_add(weights.title);
        }
        if page.tag_set.iter().any(|tag| contains_word(tag, token)) {
            score = score.saturating_add(weights.tag);
        }
        if contains_word(&body, token) {
            score = score.saturating_add(weights.body);
        }
    }

    score.saturating_add(phrase_bonus(
        query,
        &title,
        &body,
        weights.title_phrase,
        weights.body_phrase,
    ))
}

/// Scores a section's heading and body.
pub(crate) fn score_section(section: &Section, query: &Query, weights: &SearchWeights) -> u32 {
    let heading = section.heading.to_lowercase();
    let body = section.body.to_lowercase();

    let mut score: u32 = 0;
    for token in &query.tokens {
        if contains_word(&heading, token) {
            score = score.saturating_add(weights.heading);
        }
        if contains_word(&body, token) {
            score = score.saturating_add(weights.section_body);
        }
    }

    score.saturating_add(phrase_bonus(
        query,
        &heading,
        &body,
        weights.heading_phrase,
        weights.section_body_phrase,
    ))
}

fn phrase_bonus(query: &Query, primary: &str, body: &str, primary_bonus: u32, body_bonus: u32) -> u32 {
    match &query.phrase {
        Some(phrase) if primary.contains(phrase.as_str()) => primary_bonus,
        Some(phrase) if body.contains(phrase.as_str()) => body_bonus,
        _ => 0,
    }
}
