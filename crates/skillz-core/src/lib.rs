//! Core library for skillz
//!
//! Turns a hierarchical skill catalog (a `skills.json` manifest plus the
//! markdown documents it references) into plain data:
//!
//! - [`catalog`] - node model, manifest parsing and id/parent indexes
//! - [`content`] - document fetching, interpolation and frontmatter
//! - [`layout`] - positioned graph nodes/edges and layout export
//! - [`selection`] - click-to-select closure, ancestors and breadcrumbs
//! - [`loadout`] - stitched export text and token estimates
//! - [`session`] - everything above bundled for one loaded catalog
//! - [`skills`] - skills directory scanning and manifest preparation

pub mod catalog;
pub mod config;
pub mod constants;
pub mod content;
pub mod layout;
pub mod loadout;
pub mod selection;
pub mod session;
pub mod skills;

pub use catalog::{Catalog, CatalogNode, Manifest, NodeContent, NodeIndex, NodeTag, ParentIndex};
pub use config::Settings;
pub use content::{ContentMap, DocumentFetcher, FetchError, FsFetcher, HttpFetcher, SiteFetcher};
pub use layout::{Graph, GraphEdge, GraphNode, LayoutMap, Position};
pub use loadout::LoadoutItem;
pub use selection::{Selection, Toggle};
pub use session::CatalogSession;
