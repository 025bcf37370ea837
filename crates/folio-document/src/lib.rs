//! Bundle parsing and section indexing for folio.
//!
//! This crate turns one concatenated text bundle into an ordered collection of pages:
//! - Metadata blocks (`<!-- key:"value" ... -->`) delimit pages and carry id, title,
//!   parent, tags and arbitrary attributes
//! - Each page body is scanned for headings, producing sections with counter-based,
//!   fence-aware local ids
//! - Textual addresses (`seg/seg#section`) name pages and sections
//!
//! Linking pages into a tree happens in `folio-model`.

#![warn(missing_docs)]

mod address;
mod bundle;
mod diagnostic;
mod error;
mod page;
mod section;

pub use address::{Address, AddressError};
pub use bundle::{ParsedBundle, parse_bundle, parse_bundle_file, parse_metadata};
pub use diagnostic::Diagnostic;
pub use error::BundleError;
pub use page::{Page, PageIndex, PageMeta, parse_tags};
pub use section::{LOCAL_ID_SEPARATOR, MAX_DEPTH, Section, index_sections};
