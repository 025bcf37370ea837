//! Implementation of `folio check`.

use std::process::ExitCode;

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use folio_config::{ConfigWarning, discover_config_files};
use folio_model::Model;

use crate::cli::{
    context::CommandContext,
    output::{dim, subheader, success, warning},
};

/// Reports configuration warnings and bundle diagnostics.
///
/// Diagnostics are informational; the command only fails when the bundle cannot be loaded.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config_files = discover_config_files(&ctx.cwd);
    println!("{}", subheader("Config files:"));
    if config_files.is_empty() {
        println!("   {}", dim("(none, using defaults)"));
    }
    for path in &config_files {
        println!("   {}", path.display());
    }
    println!();

    let warnings: Vec<ConfigWarning> = ctx
        .config
        .validate()
        .into_iter()
        // the bundle itself is checked below
        .filter(|w| {
            !matches!(
                w,
                ConfigWarning::BundleMissing { .. } | ConfigWarning::NoBundleConfigured
            )
        })
        .collect();
    if !warnings.is_empty() {
        println!("{}", subheader("Configuration warnings:"));
        for w in &warnings {
            println!("   {}", warning(&w.to_string()));
        }
        println!();
    }

    let model = match ctx.model() {
        Ok(model) => model,
        Err(code) => return code,
    };

    println!("{}", subheader("Bundle:"));
    println!(
        "   {} pages, {} promoted clusters, root '{}'",
        model.len(),
        model.promoted().count(),
        model.root().id
    );
    println!();

    if model.diagnostics().is_empty() {
        println!("{}", success("No diagnostics."));
    } else {
        println!("{}", subheader("Diagnostics:"));
        println!("{}", diagnostics_table(&model));
    }

    ExitCode::SUCCESS
}

/// Tabulates diagnostics in discovery order.
fn diagnostics_table(model: &Model) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Kind", "Page", "Detail"]);
    for diagnostic in model.diagnostics() {
        let page = model.page(diagnostic.page());
        table.add_row(vec![
            Cell::new(diagnostic.kind()),
            Cell::new(&page.id),
            Cell::new(diagnostic.to_string()),
        ]);
    }
    table
}
