//! Loadout stitching and token estimates
//!
//! Items and export parts follow catalog pre-order, so the same selection
//! always stitches to the same text.

use serde::Serialize;

use crate::catalog::{NodeIndex, ParentIndex};
use crate::constants::loadout::{APPROX_TOKENS_PER_CHAR, PART_SEPARATOR};
use crate::content::ContentMap;
use crate::selection::{breadcrumb_of, Selection};

/// One content-bearing selected node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadoutItem {
    pub id: String,
    pub name: String,
    pub breadcrumb: String,
    pub content: String,
    /// Estimate, see [`estimate_tokens`]
    pub tokens: usize,
}

/// Selected content-bearing nodes as (id, document path), in catalog order
fn selected_documents<'a>(
    selection: &'a Selection,
    nodes: &'a NodeIndex,
) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
    nodes.iter().filter_map(move |node| {
        if !selection.contains(&node.id) {
            return None;
        }
        node.document_path().map(|path| (node.id.as_str(), path))
    })
}

/// Line items for every selected node that carries a document.
/// Pure categories are skipped; missing content is an empty string.
pub fn list_items(
    selection: &Selection,
    nodes: &NodeIndex,
    parents: &ParentIndex,
    contents: &ContentMap,
) -> Vec<LoadoutItem> {
    selected_documents(selection, nodes)
        .map(|(id, path)| {
            let content = contents.text_or_empty(path).to_string();
            LoadoutItem {
                id: id.to_string(),
                name: nodes.label(id).unwrap_or(id).to_string(),
                breadcrumb: breadcrumb_of(id, parents, nodes),
                tokens: estimate_tokens(&content),
                content,
            }
        })
        .collect()
}

/// Concatenate the overview (when given and loaded) and every selected
/// document, separated by a blank line.
pub fn build_export(
    selection: &Selection,
    nodes: &NodeIndex,
    contents: &ContentMap,
    supplementary: Option<&str>,
) -> String {
    let overview = supplementary.and_then(|path| contents.get(path));

    overview
        .into_iter()
        .chain(selected_documents(selection, nodes).map(|(_, path)| contents.text_or_empty(path)))
        .collect::<Vec<_>>()
        .join(PART_SEPARATOR)
}

/// Rough token count: a quarter of the text length (UTF-16 units), rounded.
/// An approximation only, not a tokenizer.
pub fn estimate_tokens(text: &str) -> usize {
    if text.is_empty() {
        return 0;
    }
    (text.encode_utf16().count() as f64 * APPROX_TOKENS_PER_CHAR).round() as usize
}

/// `1500` -> `1.5k`, `500` -> `500`
pub fn format_token_count(n: usize) -> String {
    if n >= 1000 {
        // tenths of a thousand, halves rounded up
        let tenths = (n + 50) / 100;
        format!("{}.{}k", tenths / 10, tenths % 10)
    } else {
        n.to_string()
    }
}

pub fn total_tokens(items: &[LoadoutItem]) -> usize {
    items.iter().map(|item| item.tokens).sum()
}
