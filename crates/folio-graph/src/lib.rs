//! Graph data for visualizing a folio model.
//!
//! Produces one node per page plus two kinds of edges:
//! - Hierarchy edges from parent to child, weighted by a tier derived from the child's
//!   subtree size. Edges from the root to promoted pages are left out.
//! - Tag edges between pages that share tags and are not already parent and child.
//!
//! An adjacency map over both edge kinds is derived for neighborhood highlighting.

#![warn(missing_docs)]

mod build;
mod types;

pub use build::build_graph;
pub use types::*;
