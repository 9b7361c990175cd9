//! Id and parent lookup tables built from one tree walk

use std::collections::HashMap;
use std::sync::Arc;

use super::node::CatalogNode;

/// Node id -> shared node handle, plus the pre-order id sequence
#[derive(Debug, Clone, Default)]
pub struct NodeIndex {
    by_id: HashMap<String, Arc<CatalogNode>>,
    order: Vec<String>,
}

impl NodeIndex {
    pub fn get(&self, id: &str) -> Option<&Arc<CatalogNode>> {
        self.by_id.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn label(&self, id: &str) -> Option<&str> {
        self.by_id.get(id).map(|n| n.label.as_str())
    }

    /// Ids in tree pre-order (first occurrence wins for the position)
    pub fn order(&self) -> &[String] {
        &self.order
    }

    /// Nodes in tree pre-order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<CatalogNode>> {
        self.order.iter().filter_map(|id| self.by_id.get(id))
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Node id -> id of its direct parent. The root has no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParentIndex {
    by_child: HashMap<String, String>,
}

impl ParentIndex {
    pub fn parent_of(&self, id: &str) -> Option<&str> {
        self.by_child.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_child.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_child.is_empty()
    }
}

impl FromIterator<(String, String)> for ParentIndex {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            by_child: iter.into_iter().collect(),
        }
    }
}

/// Walk the tree once (pre-order) and build both indexes.
///
/// Duplicate ids are not rejected: the later node replaces the earlier one.
pub fn build_indexes(root: &Arc<CatalogNode>) -> (NodeIndex, ParentIndex) {
    let mut nodes = NodeIndex::default();
    let mut parents = ParentIndex::default();

    let mut stack: Vec<(&Arc<CatalogNode>, Option<&str>)> = vec![(root, None)];

    while let Some((node, parent)) = stack.pop() {
        if nodes
            .by_id
            .insert(node.id.clone(), Arc::clone(node))
            .is_none()
        {
            nodes.order.push(node.id.clone());
        }
        if let Some(parent) = parent {
            parents
                .by_child
                .insert(node.id.clone(), parent.to_string());
        }
        for child in node.children.iter().rev() {
            stack.push((child, Some(node.id.as_str())));
        }
    }

    (nodes, parents)
}
