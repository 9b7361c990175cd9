//! `skills.json` manifest parsing
//!
//! A manifest that cannot be fetched or parsed degrades to the empty
//! root-only tree; the catalog never refuses to load.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::node::RawNode;
use crate::constants::catalog::{MANIFEST_FILE, ROOT_ID};
use crate::content::DocumentFetcher;

/// Top-level manifest document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub tree: RawNode,
    /// Document always prepended to exports when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview_path: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for Manifest {
    fn default() -> Self {
        Self::empty()
    }
}

impl Manifest {
    /// Root-only manifest used whenever no usable manifest exists
    pub fn empty() -> Self {
        Self::with_tree(RawNode {
            id: ROOT_ID.to_string(),
            node_type: Some("root".to_string()),
            ..Default::default()
        })
    }

    pub fn with_tree(tree: RawNode) -> Self {
        Self {
            tree,
            overview_path: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Strict parse; fails on invalid JSON or a missing `tree`
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Parse, falling back to [`Manifest::empty`] on any error
    pub fn parse_or_empty(text: &str) -> Self {
        match Self::parse(text) {
            Ok(manifest) => manifest,
            Err(e) => {
                warn!("Malformed manifest, using empty tree: {}", e);
                Self::empty()
            }
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Fetch and parse `skills.json` through the given fetcher
pub async fn load_manifest(fetcher: &dyn DocumentFetcher) -> Manifest {
    match fetcher.fetch(MANIFEST_FILE).await {
        Ok(text) => {
            debug!("Fetched manifest ({} bytes)", text.len());
            Manifest::parse_or_empty(&text)
        }
        Err(e) => {
            warn!("Failed to load manifest, using empty tree: {}", e);
            Manifest::empty()
        }
    }
}
