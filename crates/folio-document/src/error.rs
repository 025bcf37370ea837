//! Error types for bundle parsing.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that make a bundle unusable.
///
/// Everything else the parser encounters (missing ids, odd metadata) is recorded as a
/// [`Diagnostic`](crate::Diagnostic) instead.
#[derive(Debug, Error)]
pub enum BundleError {
    /// Failed to read a bundle file.
    #[error("failed to read bundle {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The bundle contained no metadata blocks at all.
    #[error("bundle contains no pages (no metadata blocks found)")]
    NoPages,
}
