//! Graph materialization
//!
//! Converts the catalog tree into positioned nodes and parent->child edges.
//! A saved [`LayoutMap`] wins wherever it has an entry; every other node
//! gets its [`RadialLayout`] fallback position.

mod export;
mod radial;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub use export::{export_layout, LiveNode, Positioned};
pub use radial::RadialLayout;

use crate::catalog::CatalogNode;
use crate::constants::catalog::LAYOUT_FILE;
use crate::constants::layout::ROOT_NODE_TYPE;
use crate::content::DocumentFetcher;

/// Point in abstract canvas space (not pixels)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Saved positions by node id. Ids missing here use the fallback.
pub type LayoutMap = BTreeMap<String, Position>;

/// One visual node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    /// `root` for the root, otherwise the node's structural tag
    pub node_type: String,
    pub depth: usize,
    pub position: Position,
    pub content_bearing: bool,
}

/// Parent -> child link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl Graph {
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

/// Edge id for a parent/child pair, recomputable without storing edges
pub fn edge_id(parent: &str, child: &str) -> String {
    format!("e-{}-{}", parent, child)
}

/// Build the positioned graph with the default radial fallback
pub fn build_graph(root: &CatalogNode, layout: &LayoutMap) -> Graph {
    build_graph_with(root, layout, &RadialLayout::default())
}

pub fn build_graph_with(root: &CatalogNode, layout: &LayoutMap, radial: &RadialLayout) -> Graph {
    let mut graph = Graph::default();

    struct Pending<'a> {
        node: &'a CatalogNode,
        parent: Option<&'a str>,
        depth: usize,
        heading: Option<f64>,
    }

    let mut stack = vec![Pending {
        node: root,
        parent: None,
        depth: 0,
        heading: None,
    }];

    while let Some(Pending {
        node,
        parent,
        depth,
        heading,
    }) = stack.pop()
    {
        let fallback = match heading {
            Some(angle) => radial.place(depth, angle),
            None => radial.center(),
        };
        let position = layout.get(&node.id).copied().unwrap_or(fallback);

        let node_type = if parent.is_none() {
            ROOT_NODE_TYPE.to_string()
        } else {
            node.tag.as_str().to_string()
        };

        graph.nodes.push(GraphNode {
            id: node.id.clone(),
            label: node.label.clone(),
            node_type,
            depth,
            position,
            content_bearing: node.is_content_bearing(),
        });

        if let Some(parent) = parent {
            graph.edges.push(GraphEdge {
                id: edge_id(parent, &node.id),
                source: parent.to_string(),
                target: node.id.clone(),
            });
        }

        let headings = radial.child_headings(heading, node.children.len());
        for (child, child_heading) in node.children.iter().zip(headings).rev() {
            stack.push(Pending {
                node: child.as_ref(),
                parent: Some(node.id.as_str()),
                depth: depth + 1,
                heading: Some(child_heading),
            });
        }
    }

    graph
}

/// Parse a saved layout, ignoring it entirely when malformed
pub fn parse_layout(text: &str) -> LayoutMap {
    match serde_json::from_str(text) {
        Ok(layout) => layout,
        Err(e) => {
            warn!("Malformed layout, using computed positions: {}", e);
            LayoutMap::new()
        }
    }
}

/// Fetch `layout.json`; absence just means "compute everything"
pub async fn load_layout(fetcher: &dyn DocumentFetcher) -> LayoutMap {
    match fetcher.fetch(LAYOUT_FILE).await {
        Ok(text) => parse_layout(&text),
        Err(e) => {
            debug!("No saved layout: {}", e);
            LayoutMap::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RawNode;
    use crate::content::StaticFetcher;

    fn tree() -> CatalogNode {
        let raw: RawNode = serde_json::from_str(
            r#"{"id": "root", "type": "root", "label": "skillz", "children": [
                {"id": "cat-frontend", "label": "frontend", "type": "category", "children": [
                    {"id": "skill-a", "label": "skill a", "type": "skill", "skillPath": "skills/frontend/a/SKILL.md"},
                    {"id": "skill-b", "label": "skill b", "type": "skill", "skillPath": "skills/frontend/b/SKILL.md"}
                ]},
                {"id": "skill-solo", "label": "solo", "type": "skill", "skillPath": "skills/misc/solo/SKILL.md"}
            ]}"#,
        )
        .unwrap();
        CatalogNode::from_raw(&raw)
    }

    #[test]
    fn test_nodes_and_edges() {
        let graph = build_graph(&tree(), &LayoutMap::new());
        assert_eq!(graph.nodes.len(), 5);
        assert_eq!(graph.edges.len(), 4);

        let edge = graph.edges.iter().find(|e| e.target == "skill-a").unwrap();
        assert_eq!(edge.source, "cat-frontend");
        assert_eq!(edge.id, "e-cat-frontend-skill-a");
    }

    #[test]
    fn test_saved_position_wins() {
        let layout = LayoutMap::from([("root".to_string(), Position::new(100.0, 200.0))]);
        let graph = build_graph(&tree(), &layout);
        assert_eq!(graph.node("root").unwrap().position, Position::new(100.0, 200.0));
        // children still get their fallback
        let computed = build_graph(&tree(), &LayoutMap::new());
        assert_eq!(
            graph.node("skill-a").unwrap().position,
            computed.node("skill-a").unwrap().position
        );
    }

    #[test]
    fn test_root_type_tag() {
        let graph = build_graph(&tree(), &LayoutMap::new());
        assert_eq!(graph.node("root").unwrap().node_type, "root");
        assert_eq!(graph.node("cat-frontend").unwrap().node_type, "category");
        assert_eq!(graph.node("skill-a").unwrap().node_type, "skill");
    }

    #[test]
    fn test_root_type_tag_regardless_of_manifest_type() {
        let root = CatalogNode::from_raw(&RawNode {
            id: "top".into(),
            node_type: Some("category".into()),
            ..Default::default()
        });
        let graph = build_graph(&root, &LayoutMap::new());
        assert_eq!(graph.nodes[0].node_type, "root");
        assert_eq!(graph.nodes[0].position, Position::new(500.0, 500.0));
    }

    #[test]
    fn test_fallback_is_deterministic() {
        let a = build_graph(&tree(), &LayoutMap::new());
        let b = build_graph(&tree(), &LayoutMap::new());
        assert_eq!(a, b);
    }

    #[test]
    fn test_preorder_and_depth() {
        let graph = build_graph(&tree(), &LayoutMap::new());
        let ids: Vec<_> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["root", "cat-frontend", "skill-a", "skill-b", "skill-solo"]);
        assert_eq!(graph.node("skill-a").unwrap().depth, 2);
    }

    #[test]
    fn test_parse_layout() {
        let layout = parse_layout(r#"{"root": {"x": 1.5, "y": -2}}"#);
        assert_eq!(layout.get("root"), Some(&Position::new(1.5, -2.0)));
        assert!(parse_layout("[]").is_empty());
    }

    #[tokio::test]
    async fn test_missing_layout_is_empty() {
        assert!(load_layout(&StaticFetcher::default()).await.is_empty());
    }
}
