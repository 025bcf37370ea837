//! Ranked full-text search over folio pages.
//!
//! Search is a pure function of a query and a page collection:
//! - Queries are lowercased and split on whitespace; short words are dropped
//! - A cheap substring prefilter against each page's search text selects candidates
//! - Candidates are scored by whole-word matches in title, tags and body, plus a phrase
//!   bonus for multi-word queries
//! - Sections are scored the same way against heading and body, and add a capped boost to
//!   their page

#![warn(missing_docs)]

mod engine;
mod params;
mod scoring;
mod tokenize;
mod types;

pub use engine::search;
pub use params::*;
pub use tokenize::{Query, contains_word};
pub use types::{PageHit, SearchOutcome, SectionHit};
