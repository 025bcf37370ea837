//! Navigable page model for folio.
//!
//! Turns parsed bundle pages into a single rooted tree:
//! - Parent links resolved by id, with unresolvable or cyclic links refused
//! - Disconnected clusters promoted onto the root ("secondary homes")
//! - Canonical id paths and tolerant path resolution
//! - Breadcrumbs, reading order and tag-related pages
//! - Atomic whole-model replacement through [`Library`]

#![warn(missing_docs)]

mod hierarchy;
mod library;
mod model;
mod paths;
mod promote;

pub use folio_document::{Address, BundleError, Diagnostic, Page, PageIndex, Section};
pub use library::Library;
pub use model::{BuildOptions, DEFAULT_ROOT_ID, Model, Resolved};
