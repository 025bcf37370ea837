//! folio: a navigable, searchable knowledge base built from a single text bundle.
//!
//! A bundle is one text file holding many pages, each introduced by an HTML comment carrying
//! its metadata. folio links the pages into a tree rooted at a reserved page, attaches
//! disconnected clusters to the root, gives every page and heading a stable address, and
//! exposes keyword search and graph data over the result. This crate is the command-line
//! front end over those libraries.

#![warn(missing_docs)]

pub mod cli;
