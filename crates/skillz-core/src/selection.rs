//! Selection closure
//!
//! A click selects a node together with its whole subtree, or deselects it
//! when the subtree is already fully selected. Partially selected subtrees
//! always resolve to "select the rest".

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogNode, NodeIndex, ParentIndex};
use crate::constants::catalog::BREADCRUMB_SEPARATOR;
use crate::layout::edge_id;

/// Ids currently in the loadout
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    ids: BTreeSet<String>,
}

/// What a subtree toggle did, with the number of ids it touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Selected(usize),
    Deselected(usize),
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        self.ids.insert(id.into())
    }

    /// Drop a single id (no subtree closure)
    pub fn remove(&mut self, id: &str) -> bool {
        self.ids.remove(id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Keep only ids accepted by `keep`
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.ids.retain(|id| keep(id));
    }

    /// All-or-nothing toggle of `node` and every descendant
    pub fn toggle_subtree(&mut self, node: &CatalogNode) -> Toggle {
        let ids = node.subtree_ids();

        if ids.iter().all(|id| self.ids.contains(*id)) {
            for id in &ids {
                self.ids.remove(*id);
            }
            Toggle::Deselected(ids.len())
        } else {
            for id in &ids {
                self.ids.insert((*id).to_string());
            }
            Toggle::Selected(ids.len())
        }
    }
}

impl<S: Into<String>> FromIterator<S> for Selection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Pure form of [`Selection::toggle_subtree`]
pub fn toggle_subtree(node: &CatalogNode, selection: &Selection) -> Selection {
    let mut next = selection.clone();
    next.toggle_subtree(node);
    next
}

/// Parent chain of `id`, nearest first, ending at the root.
///
/// Empty for the root and for ids without a parent entry. The walk is
/// bounded by the index size so a malformed parent chain cannot loop.
pub fn ancestors_of(id: &str, parents: &ParentIndex) -> Vec<String> {
    let mut ancestors = Vec::new();
    let mut current = parents.parent_of(id);

    while let Some(parent) = current {
        if ancestors.len() > parents.len() {
            break;
        }
        ancestors.push(parent.to_string());
        current = parents.parent_of(parent);
    }

    ancestors
}

/// Ancestor labels from just below the root down to the direct parent,
/// joined with ` / `. Empty for the root and its direct children.
pub fn breadcrumb_of(id: &str, parents: &ParentIndex, nodes: &NodeIndex) -> String {
    let mut ancestors = ancestors_of(id, parents);
    // the last entry is the root, whose label never appears
    ancestors.pop();

    ancestors
        .iter()
        .rev()
        .map(|ancestor| nodes.label(ancestor).unwrap_or(ancestor.as_str()))
        .collect::<Vec<_>>()
        .join(BREADCRUMB_SEPARATOR)
}

/// Ancestors of selected nodes that are not selected themselves
pub fn highlighted_ancestors(selection: &Selection, parents: &ParentIndex) -> BTreeSet<String> {
    selection
        .iter()
        .flat_map(|id| ancestors_of(id, parents))
        .filter(|ancestor| !selection.contains(ancestor))
        .collect()
}

/// Edge ids on every selected node's path up to the root
pub fn highlighted_edges(selection: &Selection, parents: &ParentIndex) -> BTreeSet<String> {
    let mut edges = BTreeSet::new();
    for id in selection.iter() {
        let mut child = id.to_string();
        for parent in ancestors_of(id, parents) {
            edges.insert(edge_id(&parent, &child));
            child = parent;
        }
    }
    edges
}
