//! Request and response types for the API

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use skillz_core::layout::LiveNode;
use skillz_core::{LoadoutItem, Selection};

// ============================================================================
// Catalog Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct NodeDetailResponse {
    pub id: String,
    pub label: String,
    /// Ancestor labels below the root, joined with ` / `
    pub breadcrumb: String,
    /// Nearest first, ending at the root
    pub ancestors: Vec<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReloadResponse {
    pub nodes: usize,
    pub documents: usize,
}

// ============================================================================
// Selection Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    /// Selection before the click; the server keeps none of its own
    #[serde(default)]
    pub selected: Selection,
    pub id: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleResponse {
    pub selected: Selection,
    pub highlighted_ancestors: BTreeSet<String>,
    pub highlighted_edges: BTreeSet<String>,
}

// ============================================================================
// Loadout Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct LoadoutRequest {
    #[serde(default)]
    pub selected: Selection,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadoutResponse {
    pub items: Vec<LoadoutItem>,
    pub export: String,
    pub total_tokens: usize,
    /// `1.5k` style label
    pub total_tokens_label: String,
}

// ============================================================================
// Layout Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct LayoutExportRequest {
    pub nodes: Vec<LiveNode>,
}
