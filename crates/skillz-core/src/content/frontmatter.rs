//! Best-effort YAML frontmatter reading for node descriptions

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use super::ContentMap;
use crate::catalog::{CatalogNode, NodeTag};
use crate::constants::content::DESCRIPTION_MAX_CHARS;

static FRONTMATTER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\A---\s*\n((?s).*?)\n---").expect("frontmatter pattern"));

static DESCRIPTION_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"description:\s*([^\n]+(?:\n\s+[^\n]+)*)").expect("description pattern")
});

static LINE_BREAK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*").expect("line break pattern"));

#[derive(Debug, Default, Deserialize)]
struct FrontmatterMeta {
    #[serde(default)]
    description: Option<String>,
}

/// Raw text between the leading `---` fences, if any
pub fn frontmatter_block(markdown: &str) -> Option<&str> {
    FRONTMATTER_RE
        .captures(markdown)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// `description` from the frontmatter, folded to one line and capped at
/// 250 characters. `None` when there is no frontmatter or no description.
///
/// Frontmatter that is not valid YAML still gets a line-based scan.
pub fn extract_description(markdown: &str) -> Option<String> {
    let block = frontmatter_block(markdown)?;

    let raw = match serde_yaml::from_str::<FrontmatterMeta>(block) {
        Ok(meta) => meta.description,
        Err(_) => DESCRIPTION_LINE_RE
            .captures(block)
            .map(|caps| caps[1].to_string()),
    }?;

    let folded = LINE_BREAK_RE.replace_all(raw.trim(), " ");
    let description: String = folded.chars().take(DESCRIPTION_MAX_CHARS).collect();
    (!description.is_empty()).then_some(description)
}

/// Tooltip text for a node.
///
/// Content-bearing nodes describe themselves through their document;
/// plain categories report how many children a click selects.
pub fn describe_node(node: &CatalogNode, contents: &ContentMap) -> Option<String> {
    if let Some(path) = node.document_path() {
        return extract_description(contents.text_or_empty(path));
    }
    match node.tag {
        NodeTag::Category => Some(format!(
            "click to select all {} skills",
            node.children.len()
        )),
        _ => None,
    }
}
