//! One loaded catalog with its contents, layout and current selection

use std::collections::BTreeSet;

use tracing::info;

use crate::catalog::{load_manifest, Catalog, CatalogNode};
use crate::content::{describe_node, load_contents, ContentMap, DocumentFetcher};
use crate::layout::{build_graph, export_layout, load_layout, Graph, LayoutMap, Position};
use crate::loadout::{self, LoadoutItem};
use crate::selection::{self, Selection, Toggle};

#[derive(Debug, Clone, Default)]
pub struct CatalogSession {
    catalog: Catalog,
    contents: ContentMap,
    layout: LayoutMap,
    selection: Selection,
}

impl CatalogSession {
    /// Fetch manifest, layout and every referenced document
    pub async fn load(fetcher: &dyn DocumentFetcher, origin: &str, app_name: &str) -> Self {
        let (manifest, layout) = futures::join!(load_manifest(fetcher), load_layout(fetcher));

        let catalog = Catalog::from_manifest(&manifest, app_name);
        let contents =
            load_contents(catalog.root(), catalog.overview_path(), origin, fetcher).await;

        info!(
            "Catalog loaded: {} nodes, {} documents, {} saved positions",
            catalog.nodes().len(),
            contents.len(),
            layout.len()
        );

        Self::from_parts(catalog, contents, layout)
    }

    pub fn from_parts(catalog: Catalog, contents: ContentMap, layout: LayoutMap) -> Self {
        Self {
            catalog,
            contents,
            layout,
            selection: Selection::new(),
        }
    }

    /// Load everything again and swap it in at once. Selected ids that no
    /// longer exist are dropped.
    pub async fn reload(&mut self, fetcher: &dyn DocumentFetcher, origin: &str, app_name: &str) {
        let mut next = Self::load(fetcher, origin, app_name).await;
        next.selection = std::mem::take(&mut self.selection);
        next.selection.retain(|id| next.catalog.nodes().contains(id));
        *self = next;
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn contents(&self) -> &ContentMap {
        &self.contents
    }

    pub fn layout(&self) -> &LayoutMap {
        &self.layout
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn node(&self, id: &str) -> Option<&CatalogNode> {
        self.catalog.node(id).map(|node| node.as_ref())
    }

    /// Subtree toggle on `id`; `None` when the id is unknown
    pub fn click(&mut self, id: &str) -> Option<Toggle> {
        let node = self.catalog.node(id)?;
        Some(self.selection.toggle_subtree(node))
    }

    pub fn remove(&mut self, id: &str) -> bool {
        self.selection.remove(id)
    }

    pub fn clear(&mut self) {
        self.selection.clear();
    }

    pub fn items(&self) -> Vec<LoadoutItem> {
        loadout::list_items(
            &self.selection,
            self.catalog.nodes(),
            self.catalog.parents(),
            &self.contents,
        )
    }

    pub fn export(&self) -> String {
        loadout::build_export(
            &self.selection,
            self.catalog.nodes(),
            &self.contents,
            self.catalog.overview_path(),
        )
    }

    pub fn total_tokens(&self) -> usize {
        loadout::total_tokens(&self.items())
    }

    pub fn graph(&self) -> Graph {
        build_graph(self.catalog.root(), &self.layout)
    }

    pub fn highlighted_ancestors(&self) -> BTreeSet<String> {
        selection::highlighted_ancestors(&self.selection, self.catalog.parents())
    }

    pub fn highlighted_edges(&self) -> BTreeSet<String> {
        selection::highlighted_edges(&self.selection, self.catalog.parents())
    }

    pub fn ancestors(&self, id: &str) -> Vec<String> {
        selection::ancestors_of(id, self.catalog.parents())
    }

    pub fn breadcrumb(&self, id: &str) -> String {
        selection::breadcrumb_of(id, self.catalog.parents(), self.catalog.nodes())
    }

    /// Tooltip text for `id`
    pub fn describe(&self, id: &str) -> Option<String> {
        describe_node(self.node(id)?, &self.contents)
    }

    /// Pin a node (after a drag); unknown ids are ignored
    pub fn set_position(&mut self, id: &str, position: Position) -> bool {
        if !self.catalog.nodes().contains(id) {
            return false;
        }
        self.layout.insert(id.to_string(), position);
        true
    }

    /// Current positions of every node, saved or computed
    pub fn export_layout(&self) -> LayoutMap {
        export_layout(&self.graph().nodes)
    }
}
