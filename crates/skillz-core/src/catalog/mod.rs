//! Skill catalog: the manifest tree and its lookup tables
//!
//! A [`Catalog`] is built in one step from a [`Manifest`]: the tree is
//! normalized (root label included), then indexed. It is never patched in
//! place; reloading builds a new one.

mod index;
mod manifest;
mod node;

use std::sync::Arc;

pub use index::{build_indexes, NodeIndex, ParentIndex};
pub use manifest::{load_manifest, Manifest};
pub use node::{CatalogNode, NodeContent, NodeTag, RawNode};

/// Normalized tree plus its indexes
#[derive(Debug, Clone)]
pub struct Catalog {
    root: Arc<CatalogNode>,
    overview_path: Option<String>,
    nodes: NodeIndex,
    parents: ParentIndex,
}

impl Catalog {
    /// Normalize a manifest, labelling the root with `app_name`
    pub fn from_manifest(manifest: &Manifest, app_name: &str) -> Self {
        let mut root = CatalogNode::from_raw(&manifest.tree);
        root.label = app_name.to_string();
        Self::new(root, manifest.overview_path.clone())
    }

    pub fn new(root: CatalogNode, overview_path: Option<String>) -> Self {
        let root = Arc::new(root);
        let (nodes, parents) = build_indexes(&root);
        Self {
            root,
            overview_path,
            nodes,
            parents,
        }
    }

    pub fn root(&self) -> &Arc<CatalogNode> {
        &self.root
    }

    pub fn overview_path(&self) -> Option<&str> {
        self.overview_path.as_deref()
    }

    pub fn nodes(&self) -> &NodeIndex {
        &self.nodes
    }

    pub fn parents(&self) -> &ParentIndex {
        &self.parents
    }

    pub fn node(&self, id: &str) -> Option<&Arc<CatalogNode>> {
        self.nodes.get(id)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::from_manifest(
            &Manifest::empty(),
            crate::constants::catalog::DEFAULT_APP_NAME,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_label_injected() {
        let manifest = Manifest::parse(
            r#"{"tree": {"id": "root", "type": "root", "label": "old",
                "children": [{"id": "skill-x", "label": "x", "type": "skill"}]}}"#,
        )
        .unwrap();
        let catalog = Catalog::from_manifest(&manifest, "loadouts");
        assert_eq!(catalog.root().label, "loadouts");
        assert_eq!(catalog.nodes().label("root"), Some("loadouts"));
        assert_eq!(catalog.nodes().label("skill-x"), Some("x"));
        // the manifest itself is untouched
        assert_eq!(manifest.tree.label.as_deref(), Some("old"));
    }

    #[test]
    fn test_default_catalog_is_root_only() {
        let catalog = Catalog::default();
        assert_eq!(catalog.nodes().len(), 1);
        assert!(catalog.parents().is_empty());
        assert_eq!(catalog.overview_path(), None);
    }
}
