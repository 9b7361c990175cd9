//! Plain-text rendering for terminal output

use std::fmt::Write;

use skillz_core::loadout::{format_token_count, total_tokens};
use skillz_core::{CatalogSession, LoadoutItem};

const INDENT: &str = "  ";

/// Indented outline of the catalog, one node per line, with tooltips
pub fn render_outline(session: &CatalogSession) -> String {
    let catalog = session.catalog();
    let mut out = String::new();

    let mut stack = vec![(catalog.root().as_ref(), 0usize)];
    while let Some((node, depth)) = stack.pop() {
        let _ = write!(out, "{}{} [{}]", INDENT.repeat(depth), node.label, node.id);
        if let Some(description) = session.describe(&node.id) {
            let _ = write!(out, ": {}", description);
        }
        out.push('\n');

        for child in node.children.iter().rev() {
            stack.push((child.as_ref(), depth + 1));
        }
    }

    out
}

/// One line per item plus a total, e.g. `docs / pdf  1.2k`
pub fn render_items(items: &[LoadoutItem]) -> String {
    let mut out = String::new();
    for item in items {
        let name = if item.breadcrumb.is_empty() {
            item.name.clone()
        } else {
            format!("{} / {}", item.breadcrumb, item.name)
        };
        let _ = writeln!(out, "{}  {}", name, format_token_count(item.tokens));
    }
    let _ = writeln!(
        out,
        "{} skills, ~{} tokens",
        items.len(),
        format_token_count(total_tokens(items))
    );
    out
}
