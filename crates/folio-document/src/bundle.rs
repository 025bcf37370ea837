//! Bundle parsing.
//!
//! A bundle is one text containing every page. Each page starts with a metadata block, an
//! HTML comment holding only `key:"value"` pairs:
//!
//! ```text
//! <!-- id:"install" title:"Installation" parent:"home" tags:"setup, cli" -->
//! # Installing
//!
//! Page body runs until the next metadata block.
//! ```
//!
//! Keys are single words; values may not contain a quote. `id`, `title`, `parent` and `tags`
//! are interpreted, any other key is kept as an opaque attribute. Comments that contain
//! anything other than pairs are ordinary body text. Text before the first metadata block is
//! ignored.

use std::{collections::BTreeMap, fs, path::Path, sync::LazyLock};

use regex::Regex;
use tracing::{debug, warn};

use crate::{
    BundleError, Diagnostic,
    page::{Page, PageIndex, PageMeta},
};

/// Matches a whole metadata block, capturing the run of pairs.
static METADATA_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<!--((?:\s*\w+:"[^"]*")+)\s*-->"#).expect("metadata block pattern is valid")
});

/// Matches a single `key:"value"` pair.
static METADATA_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(\w+):"([^"]*)""#).expect("metadata pair pattern is valid")
});

/// Pages parsed from a bundle, with any findings recorded along the way.
#[derive(Debug, Clone)]
pub struct ParsedBundle {
    /// Pages in bundle order.
    pub pages: Vec<Page>,
    /// Non-fatal findings.
    pub diagnostics: Vec<Diagnostic>,
}

/// Parses bundle text into pages.
///
/// Fails only when the text holds no metadata block at all.
pub fn parse_bundle(text: &str) -> Result<ParsedBundle, BundleError> {
    let blocks: Vec<(usize, usize, &str)> = METADATA_BLOCK
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let pairs = caps.get(1)?;
            Some((whole.start(), whole.end(), pairs.as_str()))
        })
        .collect();

    let Some(&(first_start, _, _)) = blocks.first() else {
        return Err(BundleError::NoPages);
    };

    if !text[..first_start].trim().is_empty() {
        debug!(bytes = first_start, "ignoring text before first metadata block");
    }

    let mut pages = Vec::with_capacity(blocks.len());
    let mut diagnostics = Vec::new();

    for (ordinal, &(_, body_start, pairs)) in blocks.iter().enumerate() {
        let body_end = blocks
            .get(ordinal + 1)
            .map_or(text.len(), |&(next_start, _, _)| next_start);
        let index = PageIndex(ordinal);

        let mut meta = parse_metadata(pairs);
        if meta.id.is_empty() {
            meta.id = format!("page-{ordinal}");
            warn!(page = ordinal, id = %meta.id, "metadata block has no id");
            diagnostics.push(Diagnostic::MissingId {
                page: index,
                id: meta.id.clone(),
            });
        }
        if meta.title.is_empty() {
            meta.title = meta.id.clone();
        }

        let page = Page::new(index, meta, &text[body_start..body_end]);
        debug!(
            id = %page.id,
            sections = page.sections.len(),
            tags = page.tag_set.len(),
            "parsed page"
        );
        pages.push(page);
    }

    Ok(ParsedBundle { pages, diagnostics })
}

/// Reads and parses a bundle file from disk.
pub fn parse_bundle_file(path: &Path) -> Result<ParsedBundle, BundleError> {
    let text = fs::read_to_string(path).map_err(|source| BundleError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    parse_bundle(&text)
}

/// Interprets the pairs of one metadata block.
///
/// A repeated key keeps its last value. Values are trimmed; a blank `parent` means none.
pub fn parse_metadata(pairs: &str) -> PageMeta {
    let mut meta = PageMeta::default();
    let mut attributes = BTreeMap::new();

    for caps in METADATA_PAIR.captures_iter(pairs) {
        let value = caps[2].trim().to_string();
        match &caps[1] {
            "id" => meta.id = value,
            "title" => meta.title = value,
            "parent" => meta.parent_id = Some(value).filter(|v| !v.is_empty()),
            "tags" => meta.tags = value,
            key => {
                attributes.insert(key.to_string(), value);
            }
        }
    }

    meta.attributes = attributes;
    meta
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUNDLE: &str = r#"<!-- id:"home" title:"Home" -->
Welcome.

<!-- id:"alpha" title:"Alpha" parent:"home" tags:"x, y" author:"ann" -->
# Alpha intro

Text with a <!-- plain comment --> inside.
"#;

    #[test]
    fn parses_pages_in_order() {
        let bundle = parse_bundle(BUNDLE).unwrap();
        assert_eq!(bundle.pages.len(), 2);
        assert!(bundle.diagnostics.is_empty());

        let home = &bundle.pages[0];
        assert_eq!(home.id, "home");
        assert_eq!(home.content, "Welcome.");
        assert_eq!(home.parent_id, None);

        let alpha = &bundle.pages[1];
        assert_eq!(alpha.index, PageIndex(1));
        assert_eq!(alpha.parent_id.as_deref(), Some("home"));
        assert_eq!(alpha.tags, "x, y");
        assert_eq!(alpha.attributes.get("author").map(String::as_str), Some("ann"));
        assert!(alpha.content.contains("<!-- plain comment -->"));
        assert_eq!(alpha.sections.len(), 1);
    }

    #[test]
    fn no_metadata_blocks_is_fatal() {
        let err = parse_bundle("# Just markdown\n\n<!-- note -->").unwrap_err();
        assert!(matches!(err, BundleError::NoPages));
        assert!(matches!(parse_bundle(""), Err(BundleError::NoPages)));
    }

    #[test]
    fn preamble_is_ignored() {
        let bundle = parse_bundle("stray text\n<!-- id:\"a\" -->body").unwrap();
        assert_eq!(bundle.pages.len(), 1);
        assert_eq!(bundle.pages[0].content, "body");
    }

    #[test]
    fn missing_id_is_synthesized() {
        let bundle = parse_bundle(r#"<!-- title:"Untitled" -->x<!-- id:"b" -->y"#).unwrap();
        assert_eq!(bundle.pages[0].id, "page-0");
        assert_eq!(bundle.pages[1].title, "b");
        assert_eq!(
            bundle.diagnostics,
            vec![Diagnostic::MissingId {
                page: PageIndex(0),
                id: "page-0".into()
            }]
        );
    }

    #[test]
    fn metadata_last_value_wins_and_blank_parent_is_none() {
        let meta = parse_metadata(r#" id:"a" id:"b" parent:"  " weight:"3""#);
        assert_eq!(meta.id, "b");
        assert!(meta.parent_id.is_none());
        assert_eq!(meta.attributes.len(), 1);
    }

    #[test]
    fn adjacent_blocks_give_empty_bodies() {
        let bundle = parse_bundle(r#"<!-- id:"a" --><!-- id:"b" -->"#).unwrap();
        assert_eq!(bundle.pages.len(), 2);
        assert!(bundle.pages[0].content.is_empty());
        assert!(bundle.pages[1].sections.is_empty());
    }

    #[test]
    fn reads_bundle_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bundle.md");
        fs::write(&path, BUNDLE).unwrap();
        assert_eq!(parse_bundle_file(&path).unwrap().pages.len(), 2);

        let missing = parse_bundle_file(&dir.path().join("nope.md")).unwrap_err();
        assert!(matches!(missing, BundleError::ReadFile { .. }));
    }
}
