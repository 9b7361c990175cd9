//! Document content: fetching, interpolation and descriptions
//!
//! [`load_contents`] discovers every document the tree references, fetches
//! them all concurrently and interpolates each one with its own path.
//! A failed fetch only drops that document from the [`ContentMap`].

mod fetcher;
mod frontmatter;
mod interpolate;

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::{debug, info, warn};

pub use fetcher::{
    DocumentFetcher, FetchError, FsFetcher, HttpFetcher, SiteFetcher, StaticFetcher,
};
pub use frontmatter::{describe_node, extract_description, frontmatter_block};
pub use interpolate::{document_dir, interpolate_content};

use crate::catalog::CatalogNode;

/// Document path -> fully loaded, interpolated text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ContentMap {
    documents: BTreeMap<String, String>,
}

impl ContentMap {
    pub fn get(&self, path: &str) -> Option<&str> {
        self.documents.get(path).map(String::as_str)
    }

    /// Text for `path`, or `""` when the document is absent
    pub fn text_or_empty(&self, path: &str) -> &str {
        self.get(path).unwrap_or("")
    }

    pub fn contains(&self, path: &str) -> bool {
        self.documents.contains_key(path)
    }

    pub fn insert(&mut self, path: impl Into<String>, text: impl Into<String>) {
        self.documents.insert(path.into(), text.into());
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ContentMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            documents: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Distinct document paths referenced by the tree plus the optional
/// supplementary document
pub fn collect_document_paths(root: &CatalogNode, supplementary: Option<&str>) -> BTreeSet<String> {
    root.document_paths()
        .into_iter()
        .chain(supplementary)
        .map(str::to_string)
        .collect()
}

/// Fetch every referenced document concurrently and interpolate it.
///
/// All fetches are issued at once and awaited together; one failure never
/// cancels or delays the rest. Timeouts are the fetcher's concern.
pub async fn load_contents(
    root: &CatalogNode,
    supplementary: Option<&str>,
    origin: &str,
    fetcher: &dyn DocumentFetcher,
) -> ContentMap {
    let paths = collect_document_paths(root, supplementary);
    if paths.is_empty() {
        return ContentMap::default();
    }

    debug!("Fetching {} documents", paths.len());

    let fetches: Vec<_> = paths
        .iter()
        .map(|path| async move { (path, fetcher.fetch(path).await) })
        .collect();

    let results = futures::future::join_all(fetches).await;

    let mut contents = ContentMap::default();
    for (path, result) in results {
        match result {
            Ok(text) => contents.insert(path.clone(), interpolate_content(&text, origin, path)),
            Err(e) => warn!("Failed to load document {}", e),
        }
    }

    info!("Loaded {} of {} documents", contents.len(), paths.len());
    contents
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RawNode;

    fn tree() -> CatalogNode {
        let raw: RawNode = serde_json::from_str(
            r#"{"id": "root", "children": [
                {"id": "cat-a", "type": "category", "skillPath": "skills/a/SKILL.md", "children": [
                    {"id": "skill-x", "type": "skill", "skillPath": "skills/a/x/SKILL.md"},
                    {"id": "skill-y", "type": "skill", "skillPath": "skills/a/y/SKILL.md"}
                ]},
                {"id": "skill-dup", "type": "skill", "skillPath": "skills/a/x/SKILL.md"}
            ]}"#,
        )
        .unwrap();
        CatalogNode::from_raw(&raw)
    }

    #[test]
    fn test_collect_paths_is_distinct() {
        let paths = collect_document_paths(&tree(), Some("skills/OVERVIEW.md"));
        assert_eq!(
            paths.into_iter().collect::<Vec<_>>(),
            vec![
                "skills/OVERVIEW.md",
                "skills/a/SKILL.md",
                "skills/a/x/SKILL.md",
                "skills/a/y/SKILL.md",
            ]
        );
    }

    #[tokio::test]
    async fn test_partial_failure_keeps_the_rest() {
        let fetcher = StaticFetcher::default()
            .with("skills/a/SKILL.md", "category doc")
            .with("skills/a/x/SKILL.md", "x doc");

        let contents = load_contents(&tree(), None, "https://x.io", &fetcher).await;
        assert_eq!(contents.len(), 2);
        assert_eq!(contents.get("skills/a/x/SKILL.md"), Some("x doc"));
        assert!(!contents.contains("skills/a/y/SKILL.md"));
        assert_eq!(contents.text_or_empty("skills/a/y/SKILL.md"), "");
    }

    #[tokio::test]
    async fn test_each_document_uses_its_own_path() {
        let template = "see ${baseUrl}${skillPath}/ref.md";
        let fetcher = StaticFetcher::default()
            .with("skills/a/x/SKILL.md", template)
            .with("skills/a/y/SKILL.md", template)
            .with("skills/OVERVIEW.md", template);

        let contents =
            load_contents(&tree(), Some("skills/OVERVIEW.md"), "https://x.io", &fetcher).await;
        assert_eq!(
            contents.get("skills/a/x/SKILL.md"),
            Some("see https://x.io/skills/a/x/ref.md")
        );
        assert_eq!(
            contents.get("skills/a/y/SKILL.md"),
            Some("see https://x.io/skills/a/y/ref.md")
        );
        assert_eq!(
            contents.get("skills/OVERVIEW.md"),
            Some("see https://x.io/skills/ref.md")
        );
    }

    /// Every fetch parks until all of them have started
    struct GatedFetcher {
        gate: tokio::sync::Barrier,
    }

    #[async_trait::async_trait]
    impl DocumentFetcher for GatedFetcher {
        async fn fetch(&self, path: &str) -> Result<String, FetchError> {
            self.gate.wait().await;
            if path == "skills/a/y/SKILL.md" {
                return Err(FetchError::NotFound(path.to_string()));
            }
            Ok(format!("doc {}", path))
        }
    }

    #[tokio::test]
    async fn test_fetches_run_concurrently() {
        // three distinct paths; awaiting them one by one would never pass the gate
        let fetcher = GatedFetcher {
            gate: tokio::sync::Barrier::new(3),
        };

        let contents = tokio::time::timeout(
            std::time::Duration::from_secs(5),
            load_contents(&tree(), None, "", &fetcher),
        )
        .await
        .expect("fetches were awaited serially");

        assert_eq!(contents.len(), 2);
        assert_eq!(contents.get("skills/a/SKILL.md"), Some("doc skills/a/SKILL.md"));
        assert!(!contents.contains("skills/a/y/SKILL.md"));
    }

    #[tokio::test]
    async fn test_tree_without_documents() {
        let root = CatalogNode::from_raw(&RawNode {
            id: "root".into(),
            ..Default::default()
        });
        let contents = load_contents(&root, None, "", &StaticFetcher::default()).await;
        assert!(contents.is_empty());
    }
}
