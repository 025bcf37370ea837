//! Terminal styling for folio.
//!
//! Page content and configuration are syntax highlighted with syntect; everything else (tree
//! lines, breadcrumbs, status messages) goes through the small styling helpers below. All
//! styling can be switched off globally, which the CLI does when stdout is not a terminal.

#![warn(missing_docs)]

use std::sync::atomic::{AtomicBool, Ordering};

use syntect::{
    easy::HighlightLines,
    highlighting::Style,
    parsing::SyntaxSet,
    util::{LinesWithEndings, as_24_bit_terminal_escaped},
};
use two_face::{
    syntax::extra_newlines as extra_syntaxes,
    theme::{EmbeddedLazyThemeSet, EmbeddedThemeName, extra as extra_themes},
};

static COLOR: AtomicBool = AtomicBool::new(true);

/// Enables or disables all styling.
pub fn set_color(enabled: bool) {
    COLOR.store(enabled, Ordering::Relaxed);
}

/// Returns true if styling is enabled.
pub fn color_enabled() -> bool {
    COLOR.load(Ordering::Relaxed)
}

/// Highlights markdown and TOML for terminal output.
pub struct Highlighter {
    /// Language definitions, including TOML from the two-face extras.
    syntax_set: SyntaxSet,
    /// Lazily loaded themes.
    theme_set: EmbeddedLazyThemeSet,
    /// Active theme.
    theme: EmbeddedThemeName,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    /// Creates a highlighter with the Dracula theme.
    pub fn new() -> Self {
        Self {
            syntax_set: extra_syntaxes(),
            theme_set: extra_themes(),
            theme: EmbeddedThemeName::Dracula,
        }
    }

    /// Highlights page content.
    pub fn markdown(&self, content: &str) -> String {
        self.highlight(content, "md")
    }

    /// Highlights configuration.
    pub fn toml(&self, content: &str) -> String {
        self.highlight(content, "toml")
    }

    /// Highlights `content` using the syntax for `extension`.
    ///
    /// Returns the content unchanged when styling is off; unknown syntaxes fall back to
    /// plain text.
    pub fn highlight(&self, content: &str, extension: &str) -> String {
        if !color_enabled() {
            return content.to_string();
        }

        let syntax = self
            .syntax_set
            .find_syntax_by_extension(extension)
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());
        let mut lines = HighlightLines::new(syntax, self.theme_set.get(self.theme));

        let mut output = String::with_capacity(content.len() * 2);
        for line in LinesWithEndings::from(content) {
            let ranges: Vec<(Style, &str)> = lines
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_else(|_| vec![(Style::default(), line)]);
            output.push_str(&as_24_bit_terminal_escaped(&ranges, false));
        }
        output.push_str(codes::RESET);
        output
    }
}

/// ANSI escape codes.
pub mod codes {
    /// Bold text.
    pub const BOLD: &str = "\x1b[1m";
    /// Cyan text.
    pub const CYAN: &str = "\x1b[36m";
    /// Green text.
    pub const GREEN: &str = "\x1b[32m";
    /// Yellow text.
    pub const YELLOW: &str = "\x1b[33m";
    /// Magenta text.
    pub const MAGENTA: &str = "\x1b[35m";
    /// Dim text.
    pub const DIM: &str = "\x1b[2m";
    /// Reset all formatting.
    pub const RESET: &str = "\x1b[0m";
}

fn paint(style: &str, text: &str) -> String {
    if color_enabled() {
        format!("{style}{text}{}", codes::RESET)
    } else {
        text.to_string()
    }
}

/// Page titles and section headers: bold cyan.
pub fn header(text: &str) -> String {
    paint(&format!("{}{}", codes::BOLD, codes::CYAN), text)
}

/// Bold text.
pub fn subheader(text: &str) -> String {
    paint(codes::BOLD, text)
}

/// Secondary information.
pub fn dim(text: &str) -> String {
    paint(codes::DIM, text)
}

/// Green.
pub fn success(text: &str) -> String {
    paint(codes::GREEN, text)
}

/// Yellow.
pub fn warning(text: &str) -> String {
    paint(codes::YELLOW, text)
}

/// Marker for a page promoted onto the root, e.g. `[cluster 0]`.
pub fn cluster_badge(cluster_id: usize) -> String {
    paint(codes::MAGENTA, &format!("[cluster {cluster_id}]"))
}

/// Joins breadcrumb titles with dimmed separators; the last crumb is bold.
pub fn breadcrumbs<S: AsRef<str>>(titles: &[S]) -> String {
    let separator = dim(" › ");
    let last = titles.len().saturating_sub(1);
    titles
        .iter()
        .enumerate()
        .map(|(i, title)| {
            if i == last {
                subheader(title.as_ref())
            } else {
                title.as_ref().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(&separator)
}

/// A dimmed horizontal rule.
pub fn rule(width: usize) -> String {
    dim(&"─".repeat(width))
}
