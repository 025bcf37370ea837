//! Clap argument definitions for the `folio` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Navigate and search a knowledge base kept in a single bundle file")]
pub struct Cli {
    /// Bundle file to load (overrides [bundle] path from .folio.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub bundle: Option<PathBuf>,

    /// Verbosity level (-v for info logs, -vv for debug logs)
    #[arg(short = 'v', long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments for `folio tree`.
#[derive(Args, Debug, Clone, Default)]
pub struct TreeCommand {
    /// Show descendant counts and tags
    #[arg(short, long)]
    pub long: bool,
}

/// Arguments for `folio get`.
#[derive(Args, Debug, Clone)]
pub struct GetCommand {
    /// Page address, e.g. guides/install or guides/install#1_2 (empty for the root)
    #[arg(default_value = "")]
    pub address: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// Print content without highlighting
    #[arg(long)]
    pub raw: bool,
}

/// Arguments for `folio search`.
#[derive(Args, Debug, Clone)]
pub struct SearchCommand {
    /// Query words; all of them must appear in a matching page
    pub queries: Vec<String>,

    /// Maximum results to show [default: [search] limit]
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `folio graph`.
#[derive(Args, Debug, Clone, Default)]
pub struct GraphCommand {
    /// Output nodes, edges and adjacency as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `folio init`.
#[derive(Args, Debug, Clone, Default)]
pub struct InitCommand {
    /// Create global ~/.folio.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `folio` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Print the page hierarchy
    Tree(TreeCommand),

    /// Show a page or section by address
    Get(GetCommand),

    /// Search pages and sections by keyword
    #[command(after_help = "\
MATCHING:
  Every word must appear in the page (title, tags or body).
  Words shorter than [search] min_token_len are ignored.
  Whole-word matches in titles outrank tags, tags outrank body text.
  Multi-word queries found verbatim earn a phrase bonus.

EXAMPLES:
  folio search install
  folio search getting started
  folio search -n 5 --json config")]
    Search(SearchCommand),

    /// Print graph data (nodes, hierarchy and tag edges)
    Graph(GraphCommand),

    /// Report bundle diagnostics and configuration warnings
    Check,

    /// Show effective configuration settings
    Config,

    /// Initialize folio configuration in current directory
    Init(InitCommand),
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["folio", "tree", "--bundle", "b.md", "-vv"]).unwrap();
        assert_eq!(cli.bundle, Some(PathBuf::from("b.md")));
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Tree(TreeCommand { long: false })));
    }

    #[test]
    fn get_defaults_to_root() {
        let cli = Cli::try_parse_from(["folio", "get"]).unwrap();
        let Commands::Get(cmd) = cli.command else {
            panic!("expected get");
        };
        assert!(cmd.address.is_empty());
    }

    #[test]
    fn search_accepts_empty_query() {
        let cli = Cli::try_parse_from(["folio", "search"]).unwrap();
        let Commands::Search(cmd) = cli.command else {
            panic!("expected search");
        };
        assert!(cmd.queries.is_empty());
        assert_eq!(cmd.limit, None);
    }
}
