//! Command implementations and dispatch.

pub mod check;
pub mod config;
pub mod get;
pub mod graph;
pub mod init;
pub mod search;
pub mod tree;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: Commands, ctx: &CommandContext) -> ExitCode {
    match command {
        Commands::Tree(cmd) => tree::run(ctx, &cmd),
        Commands::Get(cmd) => get::run(ctx, &cmd),
        Commands::Search(cmd) => search::run(ctx, &cmd),
        Commands::Graph(cmd) => graph::run(ctx, &cmd),
        Commands::Check => check::run(ctx),
        Commands::Config => config::run(ctx),
        Commands::Init(cmd) => init::run(ctx, &cmd),
    }
}
