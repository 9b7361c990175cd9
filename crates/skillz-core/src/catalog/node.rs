//! Catalog tree nodes
//!
//! `RawNode` mirrors the manifest JSON. It is normalized once into
//! `CatalogNode`, where content-bearing nodes are an explicit variant
//! instead of an optional field checked everywhere.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Node exactly as it appears in `skills.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNode {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_path: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RawNode>,
    /// Fields this crate does not interpret, kept so manifests round-trip
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Structural tag of a node
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeTag {
    Root,
    Category,
    Skill,
    /// Any other tag, passed through untouched (empty when absent)
    Other(String),
}

impl NodeTag {
    pub fn parse(tag: Option<&str>) -> Self {
        match tag {
            Some("root") => Self::Root,
            Some("category") => Self::Category,
            Some("skill") => Self::Skill,
            Some(other) => Self::Other(other.to_string()),
            None => Self::Other(String::new()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Root => "root",
            Self::Category => "category",
            Self::Skill => "skill",
            Self::Other(tag) => tag,
        }
    }
}

impl From<String> for NodeTag {
    fn from(tag: String) -> Self {
        Self::parse(Some(&tag))
    }
}

impl From<NodeTag> for String {
    fn from(tag: NodeTag) -> Self {
        tag.as_str().to_string()
    }
}

/// What a node carries besides its children
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum NodeContent {
    /// Grouping only, nothing to fetch
    Structural,
    /// Backed by one fetchable document
    Document { path: String },
}

/// Normalized, immutable catalog node
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogNode {
    pub id: String,
    pub label: String,
    pub tag: NodeTag,
    pub content: NodeContent,
    pub children: Vec<Arc<CatalogNode>>,
}

impl CatalogNode {
    /// Normalize a raw node and its subtree.
    ///
    /// Nodes without a label use their id. Depth is bounded by the JSON
    /// parser's recursion limit, so plain recursion is fine here.
    pub fn from_raw(raw: &RawNode) -> Self {
        let content = match raw.skill_path.as_deref() {
            Some(path) if !path.is_empty() => NodeContent::Document {
                path: path.to_string(),
            },
            _ => NodeContent::Structural,
        };

        Self {
            id: raw.id.clone(),
            label: raw.label.clone().unwrap_or_else(|| raw.id.clone()),
            tag: NodeTag::parse(raw.node_type.as_deref()),
            content,
            children: raw
                .children
                .iter()
                .map(|child| Arc::new(Self::from_raw(child)))
                .collect(),
        }
    }

    /// Document path when the node is content-bearing
    pub fn document_path(&self) -> Option<&str> {
        match &self.content {
            NodeContent::Document { path } => Some(path),
            NodeContent::Structural => None,
        }
    }

    pub fn is_content_bearing(&self) -> bool {
        matches!(self.content, NodeContent::Document { .. })
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// All descendants in pre-order, excluding the node itself
    pub fn descendants(&self) -> Vec<&CatalogNode> {
        let mut result = Vec::new();
        let mut stack: Vec<&CatalogNode> =
            self.children.iter().rev().map(|c| c.as_ref()).collect();

        while let Some(node) = stack.pop() {
            result.push(node);
            stack.extend(node.children.iter().rev().map(|c| c.as_ref()));
        }

        result
    }

    /// Ids of the node and every descendant, pre-order
    pub fn subtree_ids(&self) -> Vec<&str> {
        std::iter::once(self.id.as_str())
            .chain(self.descendants().into_iter().map(|n| n.id.as_str()))
            .collect()
    }

    /// Number of nodes in the subtree rooted here
    pub fn count(&self) -> usize {
        1 + self.descendants().len()
    }

    /// Document paths referenced anywhere in the subtree, pre-order
    pub fn document_paths(&self) -> Vec<&str> {
        std::iter::once(self)
            .chain(self.descendants())
            .filter_map(|n| n.document_path())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(json: &str) -> RawNode {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_skill_path_makes_node_content_bearing() {
        let node = CatalogNode::from_raw(&raw(
            r#"{"id": "cat-docs", "label": "docs", "type": "category", "skillPath": "skills/docs/SKILL.md"}"#,
        ));
        assert_eq!(node.tag, NodeTag::Category);
        assert!(node.is_content_bearing());
        assert_eq!(node.document_path(), Some("skills/docs/SKILL.md"));
    }

    #[test]
    fn test_missing_type_and_label_pass_through() {
        let node = CatalogNode::from_raw(&raw(r#"{"id": "odd"}"#));
        assert_eq!(node.tag, NodeTag::Other(String::new()));
        assert_eq!(node.label, "odd");
        assert!(!node.is_content_bearing());
    }

    #[test]
    fn test_unknown_tag_is_kept() {
        let node = CatalogNode::from_raw(&raw(r#"{"id": "t", "type": "template"}"#));
        assert_eq!(node.tag.as_str(), "template");
    }

    #[test]
    fn test_descendants_are_preorder() {
        let node = CatalogNode::from_raw(&raw(
            r#"{"id": "a", "children": [
                {"id": "b", "children": [{"id": "c"}, {"id": "d"}]},
                {"id": "e"}
            ]}"#,
        ));
        let ids: Vec<_> = node.descendants().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "d", "e"]);
        assert_eq!(node.subtree_ids(), vec!["a", "b", "c", "d", "e"]);
        assert_eq!(node.count(), 5);
    }

    #[test]
    fn test_leaf_has_no_descendants() {
        let node = CatalogNode::from_raw(&raw(r#"{"id": "leaf", "type": "skill"}"#));
        assert!(node.descendants().is_empty());
        assert!(node.is_leaf());
    }

    #[test]
    fn test_raw_node_round_trips_unknown_fields() {
        let json = r#"{"id":"x","type":"template","templatePath":"t.md"}"#;
        let node = raw(json);
        assert_eq!(node.extra.get("templatePath").unwrap(), "t.md");
        assert_eq!(serde_json::to_string(&node).unwrap(), json);
    }
}
