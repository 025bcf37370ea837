//! Heading section indexing.
//!
//! Sections are found with a line-oriented scan rather than a full markdown parse, so that
//! any renderer that re-numbers headings with the same scan produces identical local ids:
//!
//! - A line starting with a fence marker (```` ``` ```` or `~~~`) opens a fenced block; the
//!   next line starting with the same marker closes it. Nothing inside a fence is a heading.
//! - Outside fences, a line of 1-6 `#` characters followed by whitespace and text is a
//!   heading. The marker count minus one is its depth (0-5).
//! - A six-slot counter array numbers the headings: the counter at the heading's depth is
//!   incremented and every deeper counter is reset. The local id joins the non-zero
//!   counters from slot 0 through the heading's depth with `_`.
//!
//! For example `# A`, `## B`, `## C`, `# D` produce `1`, `1_1`, `1_2`, `2`, and a document
//! that starts at `##` numbers its first heading `1`.

use std::sync::LazyLock;

use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use regex::Regex;
use serde::Serialize;

/// Number of heading levels tracked by the counter array.
pub const MAX_DEPTH: usize = 6;

/// Separator between counters in a local id.
pub const LOCAL_ID_SEPARATOR: &str = "_";

/// Matches an ATX heading line, capturing the marker run and the raw text.
static HEADING_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").expect("heading pattern is valid"));

/// One heading and the text below it, up to the next heading at any level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Counter-based identifier, unique within the page (e.g. `1_2`).
    pub local_id: String,
    /// Zero-based heading depth (`#` is 0, `######` is 5).
    pub depth: u8,
    /// Heading text with inline markup removed.
    pub heading: String,
    /// Trimmed text between this heading line and the next heading line.
    pub body: String,
    /// Lowercased heading and body.
    #[serde(skip)]
    pub search_text: String,
}

/// A heading found by the line scan, before its body is known.
#[derive(Debug)]
struct HeadingLine {
    /// Line number of the heading.
    line: usize,
    /// Zero-based depth.
    depth: u8,
    /// Counter-based local id.
    local_id: String,
    /// Plain heading text.
    text: String,
}

/// Tracks whether the scanner is inside a fenced code block.
#[derive(Debug, Default)]
struct FenceState {
    /// The marker that opened the current fence, if any.
    open: Option<&'static str>,
}

impl FenceState {
    /// Feeds one line to the state machine. Returns true if the line is a fence toggle.
    fn toggle(&mut self, line: &str) -> bool {
        let trimmed = line.trim_start();
        match self.open {
            Some(marker) if trimmed.starts_with(marker) => {
                self.open = None;
                true
            }
            Some(_) => false,
            None => {
                let marker = ["```", "~~~"]
                    .into_iter()
                    .find(|m| trimmed.starts_with(m));
                self.open = marker;
                marker.is_some()
            }
        }
    }

    /// Returns true while inside a fenced block.
    fn inside(&self) -> bool {
        self.open.is_some()
    }
}

/// Extracts heading sections from page content.
pub fn index_sections(content: &str) -> Vec<Section> {
    let lines: Vec<&str> = content.lines().collect();
    let headings = scan_headings(&lines);

    headings
        .iter()
        .enumerate()
        .map(|(i, heading)| {
            let end = headings.get(i + 1).map_or(lines.len(), |next| next.line);
            let body = lines[heading.line + 1..end].join("\n").trim().to_string();
            let search_text = format!("{} {}", heading.text, body).to_lowercase();
            Section {
                local_id: heading.local_id.clone(),
                depth: heading.depth,
                heading: heading.text.clone(),
                body,
                search_text,
            }
        })
        .collect()
}

/// Scans lines for headings outside fenced blocks and numbers them.
fn scan_headings(lines: &[&str]) -> Vec<HeadingLine> {
    let mut counters = [0usize; MAX_DEPTH];
    let mut fence = FenceState::default();
    let mut headings = Vec::new();

    for (line_no, line) in lines.iter().enumerate() {
        if fence.toggle(line) || fence.inside() {
            continue;
        }
        let Some(caps) = HEADING_LINE.captures(line) else {
            continue;
        };

        let depth = caps[1].len() - 1;
        counters[depth] += 1;
        for counter in &mut counters[depth + 1..] {
            *counter = 0;
        }

        headings.push(HeadingLine {
            line: line_no,
            depth: depth as u8,
            local_id: local_id(&counters[..=depth]),
            text: heading_text(line, &caps[2]),
        });
    }

    headings
}

/// Joins the non-zero counters into a local id.
fn local_id(counters: &[usize]) -> String {
    counters
        .iter()
        .filter(|c| **c > 0)
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(LOCAL_ID_SEPARATOR)
}

/// Renders a heading line to plain text, dropping inline markup and closing `#` runs.
///
/// Falls back to the raw captured text when markdown parsing yields nothing.
fn heading_text(line: &str, raw: &str) -> String {
    let mut text = String::new();
    let mut in_heading = false;

    for event in Parser::new(line) {
        match event {
            Event::Start(Tag::Heading { .. }) => in_heading = true,
            Event::End(TagEnd::Heading(_)) => in_heading = false,
            Event::Text(t) | Event::Code(t) if in_heading => text.push_str(&t),
            _ => {}
        }
    }

    let text = text.trim();
    if text.is_empty() {
        raw.trim().to_string()
    } else {
        text.to_string()
    }
}
