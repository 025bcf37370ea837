//! Shared rendering helpers and JSON serialization for CLI output.

use std::process::ExitCode;

use folio_document::Page;
pub use folio_highlight::{
    breadcrumbs, cluster_badge, dim, header, rule, subheader, success, warning,
};
use serde::Serialize;

/// Serializes a value as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Textual address of a page path; the root is shown as `/`.
pub fn display_path(path: &[String]) -> String {
    if path.is_empty() {
        String::from("/")
    } else {
        path.join("/")
    }
}

/// One-line page label: title, dimmed path and a cluster badge for promoted pages.
pub fn page_label(page: &Page) -> String {
    let mut label = format!("{} {}", page.title, dim(&display_path(&page.path)));
    if let Some(cluster_id) = page.cluster_id {
        label.push(' ');
        label.push_str(&cluster_badge(cluster_id));
    }
    label
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_path_displays_as_slash() {
        assert_eq!(display_path(&[]), "/");
        assert_eq!(
            display_path(&["guides".to_string(), "install".to_string()]),
            "guides/install"
        );
    }
}
