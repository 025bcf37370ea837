//! Configuration templates for `folio init`.
//!
//! Templates are stored as valid TOML files. The local template is written as-is so the
//! project is usable immediately; the global template is written commented out.

/// Local configuration template (valid TOML).
const LOCAL_TEMPLATE: &str = include_str!("../templates/config.toml");

/// Global configuration template (valid TOML).
const GLOBAL_TEMPLATE: &str = include_str!("../templates/config-global.toml");

/// Returns the local configuration template.
pub fn local_template() -> &'static str {
    LOCAL_TEMPLATE
}

/// Returns the global configuration template as a commented-out example.
pub fn global_template() -> String {
    comment_template(GLOBAL_TEMPLATE)
}

/// Prefixes every non-empty, non-comment line with `# `.
fn comment_template(template: &str) -> String {
    let mut result = String::with_capacity(template.len() + template.lines().count() * 2);
    for line in template.lines() {
        if !line.is_empty() && !line.starts_with('#') {
            result.push_str("# ");
        }
        result.push_str(line);
        result.push('\n');
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_config;

    #[test]
    fn templates_parse_as_valid_config() {
        let local = parse_config(LOCAL_TEMPLATE).unwrap();
        assert_eq!(local.root, Some(true));
        assert!(parse_config(GLOBAL_TEMPLATE).is_ok());
    }

    #[test]
    fn local_template_matches_defaults() {
        let raw = parse_config(LOCAL_TEMPLATE).unwrap();
        let search = raw.search.unwrap();
        let defaults = crate::SearchSettings::default();
        assert_eq!(search.title_weight, Some(defaults.title_weight));
        assert_eq!(search.section_boost_cap, Some(defaults.section_boost_cap));
        assert_eq!(raw.graph.unwrap().huge_tier_at, Some(crate::GraphSettings::default().huge_tier_at));
    }

    #[test]
    fn global_template_is_fully_commented() {
        let commented = global_template();
        let parsed = parse_config(&commented).unwrap();
        assert!(parsed.search.is_none());
        assert!(commented.contains("# [search]"));
    }

    #[test]
    fn comment_template_keeps_comments_and_blank_lines() {
        let input = "# note\nkey = \"a\"\n\n[section]\n";
        assert_eq!(comment_template(input), "# note\n# key = \"a\"\n\n# [section]\n");
    }
}
