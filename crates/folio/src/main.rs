//! Command-line interface for the `folio` knowledge base tool.

use std::{
    io::{self, IsTerminal},
    process::ExitCode,
};

use clap::Parser;
use folio::cli::{
    CommandContext,
    args::{Cli, Commands},
    commands, logging,
};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    folio_highlight::set_color(io::stdout().is_terminal());

    // init must work even when an existing config file is invalid
    let ctx = if matches!(cli.command, Commands::Init(_)) {
        CommandContext::load_cwd_only()
    } else {
        CommandContext::load(cli.bundle)
    };
    match ctx {
        Ok(ctx) => commands::run(cli.command, &ctx),
        Err(code) => code,
    }
}
