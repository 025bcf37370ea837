//! Implementation of `folio get`.

use std::process::ExitCode;

use folio_document::{Page, Section};
use folio_highlight::Highlighter;
use folio_model::{Address, Model, Resolved};
use serde::Serialize;

use crate::cli::{
    args::GetCommand,
    context::CommandContext,
    output::{
        breadcrumbs, dim, display_path, header, page_label, print_json, rule, subheader, warning,
    },
};

/// Related pages listed under a page.
const RELATED_LIMIT: usize = 5;

/// Neighbors of a page in reading order and by shared tags.
#[derive(Serialize)]
struct JsonNeighbor<'a> {
    /// Page id.
    id: &'a str,
    /// Page title.
    title: &'a str,
    /// Textual address.
    address: String,
    /// Shared tag count, for related pages.
    #[serde(skip_serializing_if = "Option::is_none")]
    shared_tags: Option<usize>,
}

impl<'a> JsonNeighbor<'a> {
    /// Builds a neighbor entry for a page.
    fn new(page: &'a Page, shared_tags: Option<usize>) -> Self {
        Self {
            id: &page.id,
            title: &page.title,
            address: display_path(&page.path),
            shared_tags,
        }
    }
}

/// JSON output for `folio get`.
#[derive(Serialize)]
struct JsonPage<'a> {
    /// The address as requested.
    requested: String,
    /// Whether every path segment matched.
    exact: bool,
    /// Canonical address of the page (and section) shown.
    address: String,
    /// The page.
    page: &'a Page,
    /// The requested section, when it exists on the page.
    #[serde(skip_serializing_if = "Option::is_none")]
    section: Option<&'a Section>,
    /// Pages from the root down to this page.
    breadcrumbs: Vec<JsonNeighbor<'a>>,
    /// Previous page in reading order.
    previous: Option<JsonNeighbor<'a>>,
    /// Next page in reading order.
    next: Option<JsonNeighbor<'a>>,
    /// Pages sharing tags.
    related: Vec<JsonNeighbor<'a>>,
}

/// Resolves an address and prints the page it lands on.
///
/// Resolution is tolerant: unknown segments stop the walk at the deepest matched page, which
/// is shown with a warning on stderr.
pub fn run(ctx: &CommandContext, cmd: &GetCommand) -> ExitCode {
    let address = match Address::parse(&cmd.address) {
        Ok(address) => address,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let model = match ctx.model() {
        Ok(model) => model,
        Err(code) => return code,
    };

    let resolved = model.resolve_address(&address);
    if !resolved.exact {
        eprintln!(
            "{}",
            warning(&format!(
                "warning: no exact match for '{}', showing '{}'",
                cmd.address,
                display_path(&resolved.page.path)
            ))
        );
    }

    if cmd.json {
        return print_json(&json_page(&model, &resolved, &cmd.address));
    }

    print_page(&model, &resolved, cmd.raw);
    ExitCode::SUCCESS
}

/// Assembles the JSON view of a resolved address.
fn json_page<'a>(
    model: &'a Model,
    resolved: &Resolved<'a>,
    requested: &str,
) -> JsonPage<'a> {
    let index = resolved.page.index;
    JsonPage {
        requested: requested.to_string(),
        exact: resolved.exact,
        address: Address::new(&resolved.page.path, resolved.section.map(|s| s.local_id.as_str()))
            .to_string(),
        page: resolved.page,
        section: resolved.section,
        breadcrumbs: model
            .breadcrumbs(index)
            .into_iter()
            .map(|page| JsonNeighbor::new(page, None))
            .collect(),
        previous: model.previous(index).map(|page| JsonNeighbor::new(page, None)),
        next: model.next(index).map(|page| JsonNeighbor::new(page, None)),
        related: model
            .related(index, RELATED_LIMIT)
            .into_iter()
            .map(|(page, shared)| JsonNeighbor::new(page, Some(shared)))
            .collect(),
    }
}

/// Prints breadcrumbs, contents, body and navigation for a page.
fn print_page(model: &Model, resolved: &Resolved<'_>, raw: bool) {
    let page = resolved.page;
    let index = page.index;

    let trail: Vec<&str> = model
        .breadcrumbs(index)
        .into_iter()
        .map(|p| p.title.as_str())
        .collect();
    println!("{}", breadcrumbs(&trail));
    println!("{} {}", header(&page.title), dim(&display_path(&page.path)));
    if !page.tag_set.is_empty() {
        let tags: Vec<&str> = page.tag_set.iter().map(String::as_str).collect();
        println!("{}", dim(&format!("tags: {}", tags.join(", "))));
    }
    println!("{}", rule(60));

    if !page.sections.is_empty() && resolved.section.is_none() {
        println!("{}", subheader("Contents:"));
        for section in &page.sections {
            let indent = "  ".repeat(usize::from(section.depth));
            println!("{indent}{} {}", section.heading, dim(&format!("#{}", section.local_id)));
        }
        println!();
    }

    let body = match resolved.section {
        Some(section) => {
            println!("{}", subheader(&section.heading));
            section.body.as_str()
        }
        None => page.content.as_str(),
    };
    if raw {
        println!("{body}");
    } else {
        println!("{}", Highlighter::new().markdown(body));
    }

    let children: Vec<&Page> = model.children(index).collect();
    if !children.is_empty() {
        println!();
        println!("{}", subheader("Pages:"));
        for child in children {
            println!("  {}", page_label(child));
        }
    }

    println!("{}", rule(60));
    if let Some(previous) = model.previous(index) {
        println!("{} {}", dim("previous:"), page_label(previous));
    }
    if let Some(next) = model.next(index) {
        println!("{} {}", dim("next:"), page_label(next));
    }

    let related = model.related(index, RELATED_LIMIT);
    if !related.is_empty() {
        println!("{}", subheader("Related:"));
        for (other, shared) in related {
            println!("  {} {}", page_label(other), dim(&format!("({shared} shared tags)")));
        }
    }
}
