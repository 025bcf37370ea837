//! Textual page addresses.
//!
//! An address is a page path, optionally followed by a section local id:
//! `guides/install` or `guides/install#1_2`. The empty address (or `/`) names the root.
//! Leading and trailing slashes are ignored, so `#/guides/install` style URL fragments work
//! once the leading `#` is stripped by the caller.

use std::{fmt, str::FromStr};

use serde::Serialize;
use thiserror::Error;

/// Errors that can occur when parsing an address.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// The input contained an empty segment (`a//b`) or a malformed section.
    #[error("invalid address format: {0}")]
    InvalidFormat(String),
}

/// A page path plus an optional section id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Address {
    /// Page ids from (excluding) the root down to the target page.
    pub segments: Vec<String>,
    /// Section local id within the target page.
    pub section: Option<String>,
}

impl Address {
    /// Builds an address from a page path.
    pub fn new(path: &[String], section: Option<&str>) -> Self {
        Self {
            segments: path.to_vec(),
            section: section.map(str::to_string),
        }
    }

    /// Parses an address from `seg/seg#section` form.
    pub fn parse(input: &str) -> Result<Self, AddressError> {
        let input = input.trim();
        let (path, section) = match input.split_once('#') {
            Some((path, section)) => (path, Some(section)),
            None => (input, None),
        };

        if section.is_some_and(|s| s.contains('/') || s.contains('#')) {
            return Err(AddressError::InvalidFormat(input.to_string()));
        }

        let path = path.trim_matches('/');
        let segments = if path.is_empty() {
            Vec::new()
        } else {
            path.split('/').map(str::to_string).collect::<Vec<_>>()
        };

        if segments.iter().any(|s| s.trim().is_empty()) {
            return Err(AddressError::InvalidFormat(input.to_string()));
        }

        Ok(Self {
            segments,
            section: section.filter(|s| !s.is_empty()).map(str::to_string),
        })
    }

    /// Returns true if the address names the root page.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))?;
        if let Some(section) = &self.section {
            write!(f, "#{section}")?;
        }
        Ok(())
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
