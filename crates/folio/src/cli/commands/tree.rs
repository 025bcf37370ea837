//! Implementation of `folio tree`.

use std::process::ExitCode;

use folio_model::{Model, PageIndex};

use crate::cli::{
    args::TreeCommand,
    context::CommandContext,
    output::{dim, header, page_label},
};

/// Prints the page hierarchy, root first, children in bundle order.
pub fn run(ctx: &CommandContext, cmd: &TreeCommand) -> ExitCode {
    let model = match ctx.model() {
        Ok(model) => model,
        Err(code) => return code,
    };

    for line in render(&model, cmd.long) {
        println!("{line}");
    }
    ExitCode::SUCCESS
}

/// Renders one indented line per page in pre-order.
fn render(model: &Model, long: bool) -> Vec<String> {
    let mut lines = Vec::with_capacity(model.len());
    let mut stack: Vec<(PageIndex, usize)> = vec![(model.root_index(), 0)];

    while let Some((index, depth)) = stack.pop() {
        let page = model.page(index);
        let mut line = if depth == 0 {
            header(&page.title)
        } else {
            format!("{}{}", "  ".repeat(depth), page_label(page))
        };
        if long {
            line.push_str(&dim(&format!(" ({} below)", model.descendants(index))));
            if !page.tag_set.is_empty() {
                let tags: Vec<&str> = page.tag_set.iter().map(String::as_str).collect();
                line.push_str(&dim(&format!(" [{}]", tags.join(", "))));
            }
        }
        lines.push(line);

        stack.extend(page.children.iter().rev().map(|&child| (child, depth + 1)));
    }
    lines
}
