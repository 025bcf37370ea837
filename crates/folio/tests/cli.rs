//! CLI integration tests for folio commands.
//!
//! These tests focus on exit codes and basic behavioral verification,
//! not specific output formatting which may change.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;

const BUNDLE: &str = r#"<!-- id:"home" title:"Home" -->
Welcome to the handbook.

<!-- id:"guides" title:"Guides" parent:"home" tags:"docs, setup" -->
# Getting started
Install the tool first.
## Prerequisites
A shell.

<!-- id:"install" title:"Install" parent:"guides" tags:"setup" -->
Run the installer.

<!-- id:"faq" title:"FAQ" parent:"home" tags:"docs" -->
Common questions about installing.

<!-- id:"legacy" title:"Legacy" parent:"archive" -->
Old material.
"#;

/// Helper to create a temp directory for tests.
fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().unwrap()
}

/// Helper to get a folio command.
fn folio() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("folio").unwrap()
}

/// Helper to run `folio` with HOME isolated to the provided directory.
fn folio_with_home(home: &Path) -> Command {
    let mut cmd = folio();
    cmd.env("HOME", home);
    cmd.env_remove("FOLIO_LOG");
    cmd
}

/// Creates a project directory holding the sample bundle and a local config pointing at it.
fn project() -> tempfile::TempDir {
    let dir = temp_dir();
    fs::write(dir.path().join("bundle.md"), BUNDLE).unwrap();
    fs::write(
        dir.path().join(".folio.toml"),
        "root = true\n[bundle]\npath = \"bundle.md\"\n",
    )
    .unwrap();
    dir
}

/// Runs folio inside `dir` and returns stdout.
fn stdout_of(dir: &Path, args: &[&str]) -> String {
    let output = folio_with_home(dir)
        .current_dir(dir)
        .args(args)
        .output()
        .unwrap();
    assert!(output.status.success(), "{args:?} failed: {output:?}");
    String::from_utf8(output.stdout).unwrap()
}

mod init {
    use super::*;

    #[test]
    fn creates_config_file() {
        let dir = temp_dir();

        folio_with_home(dir.path())
            .current_dir(dir.path())
            .arg("init")
            .assert()
            .success()
            .stdout(predicate::str::contains("Created"));

        let contents = fs::read_to_string(dir.path().join(".folio.toml")).unwrap();
        assert!(contents.contains("root = true"));
        assert!(contents.contains("[search]"));
    }

    #[test]
    fn fails_if_config_exists() {
        let dir = temp_dir();
        fs::write(dir.path().join(".folio.toml"), "existing").unwrap();

        folio_with_home(dir.path())
            .current_dir(dir.path())
            .arg("init")
            .assert()
            .failure()
            .stderr(predicate::str::contains("--force"));
    }

    #[test]
    fn force_overwrites_even_invalid_config() {
        let dir = temp_dir();
        fs::write(dir.path().join(".folio.toml"), "not [valid").unwrap();

        folio_with_home(dir.path())
            .current_dir(dir.path())
            .args(["init", "--force"])
            .assert()
            .success();

        let contents = fs::read_to_string(dir.path().join(".folio.toml")).unwrap();
        assert!(contents.contains("[bundle]"));
    }

    #[test]
    fn global_writes_commented_template_to_home() {
        let home = temp_dir();
        let work = temp_dir();

        folio_with_home(home.path())
            .current_dir(work.path())
            .args(["init", "--global"])
            .assert()
            .success();

        let contents = fs::read_to_string(home.path().join(".folio.toml")).unwrap();
        assert!(contents.contains("# [search]"));
        assert!(!work.path().join(".folio.toml").exists());
    }
}

mod bundle {
    use super::*;

    #[test]
    fn missing_bundle_config_fails() {
        let dir = temp_dir();

        folio_with_home(dir.path())
            .current_dir(dir.path())
            .arg("tree")
            .assert()
            .failure()
            .stderr(predicate::str::contains("no bundle configured"));
    }

    #[test]
    fn bundle_flag_loads_file_without_config() {
        let dir = temp_dir();
        fs::write(dir.path().join("other.md"), "<!-- id:\"home\" title:\"Other Home\" -->\n")
            .unwrap();

        let out = stdout_of(dir.path(), &["tree", "--bundle", "other.md"]);
        assert!(out.contains("Other Home"));
    }

    #[test]
    fn bundle_without_pages_fails() {
        let dir = temp_dir();
        fs::write(dir.path().join("empty.md"), "just prose, no metadata\n").unwrap();

        folio_with_home(dir.path())
            .current_dir(dir.path())
            .args(["tree", "--bundle", "empty.md"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("no pages"));
    }
}

mod tree {
    use super::*;

    #[test]
    fn prints_hierarchy_with_cluster_marker() {
        let dir = project();
        let out = stdout_of(dir.path(), &["tree"]);

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Home");
        assert_eq!(lines[1], "  Guides guides");
        assert_eq!(lines[2], "    Install guides/install");
        assert!(out.contains("Legacy legacy [cluster 0]"));
    }

    #[test]
    fn long_shows_descendants() {
        let dir = project();
        let out = stdout_of(dir.path(), &["tree", "--long"]);
        assert!(out.contains("Guides guides (1 below) [docs, setup]"));
    }
}

mod get {
    use super::*;

    #[test]
    fn shows_page_with_contents() {
        let dir = project();
        let out = stdout_of(dir.path(), &["get", "guides", "--raw"]);
        assert!(out.contains("Home › Guides"));
        assert!(out.contains("Getting started #1"));
        assert!(out.contains("Prerequisites #1_1"));
        assert!(out.contains("Install the tool first."));
    }

    #[test]
    fn json_includes_section_and_navigation() {
        let dir = project();
        let out = stdout_of(dir.path(), &["get", "guides#1_1", "--json"]);
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(json["exact"], true);
        assert_eq!(json["address"], "guides#1_1");
        assert_eq!(json["section"]["heading"], "Prerequisites");
        assert_eq!(json["previous"]["id"], "home");
        assert_eq!(json["next"]["id"], "install");
    }

    #[test]
    fn unknown_segment_falls_back_with_warning() {
        let dir = project();

        folio_with_home(dir.path())
            .current_dir(dir.path())
            .args(["get", "guides/nope", "--json"])
            .assert()
            .success()
            .stderr(predicate::str::contains("no exact match"))
            .stdout(predicate::str::contains("\"exact\": false"));
    }

    #[test]
    fn malformed_address_fails() {
        let dir = project();

        folio_with_home(dir.path())
            .current_dir(dir.path())
            .args(["get", "a//b"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid address"));
    }
}

mod search {
    use super::*;

    #[test]
    fn empty_query_succeeds() {
        let dir = temp_dir();

        folio_with_home(dir.path())
            .current_dir(dir.path())
            .arg("search")
            .assert()
            .success()
            .stdout(predicate::str::contains("no query"));
    }

    #[test]
    fn json_hits_are_ranked() {
        let dir = project();
        let out = stdout_of(dir.path(), &["search", "install", "--json"]);
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(json["status"], "results");
        let hits = json["hits"].as_array().unwrap();
        assert_eq!(hits[0]["id"], "install");
        let ids: Vec<&str> = hits.iter().map(|h| h["id"].as_str().unwrap()).collect();
        assert!(ids.contains(&"guides"));
        assert!(ids.contains(&"faq"));
    }

    #[test]
    fn limit_truncates() {
        let dir = project();
        let out = stdout_of(dir.path(), &["search", "install", "-n", "1", "--json"]);
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["hits"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn no_match_reports_no_results() {
        let dir = project();
        let out = stdout_of(dir.path(), &["search", "zeppelin"]);
        assert!(out.contains("no results"));
    }
}

mod graph {
    use super::*;

    #[test]
    fn json_has_nodes_edges_and_adjacency() {
        let dir = project();
        let out = stdout_of(dir.path(), &["graph", "--json"]);
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(json["nodes"].as_array().unwrap().len(), 5);
        // home->guides, guides->install, home->faq; home->legacy is promoted
        assert_eq!(json["hierarchy"].as_array().unwrap().len(), 3);
        assert_eq!(json["adjacency"].as_object().unwrap().len(), 5);
    }

    #[test]
    fn summary_counts_nodes() {
        let dir = project();
        let out = stdout_of(dir.path(), &["graph"]);
        assert!(out.contains("nodes:           5"));
    }
}

mod check {
    use super::*;

    #[test]
    fn lists_diagnostics() {
        let dir = project();
        let out = stdout_of(dir.path(), &["check"]);
        assert!(out.contains("5 pages, 1 promoted clusters, root 'home'"));
        assert!(out.contains("unresolved_parent"));
        assert!(out.contains("archive"));
    }

    #[test]
    fn fails_when_bundle_has_no_pages() {
        let dir = temp_dir();
        fs::write(dir.path().join("bundle.md"), "nothing here\n").unwrap();
        fs::write(
            dir.path().join(".folio.toml"),
            "root = true\n[bundle]\npath = \"bundle.md\"\n",
        )
        .unwrap();

        folio_with_home(dir.path())
            .current_dir(dir.path())
            .arg("check")
            .assert()
            .failure();
    }
}

mod config {
    use super::*;

    #[test]
    fn prints_effective_settings() {
        let dir = temp_dir();
        fs::write(
            dir.path().join(".folio.toml"),
            "root = true\n[search]\nlimit = 7\n",
        )
        .unwrap();

        let out = stdout_of(dir.path(), &["config"]);
        assert!(out.contains("limit = 7"));
        assert!(out.contains("title_weight = 10"));
        assert!(out.contains("[graph]"));
    }

    #[test]
    fn invalid_config_fails() {
        let dir = temp_dir();
        fs::write(dir.path().join(".folio.toml"), "root = true\n[search\n").unwrap();

        folio_with_home(dir.path())
            .current_dir(dir.path())
            .arg("config")
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to load configuration"));
    }
}
