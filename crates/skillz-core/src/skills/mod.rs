//! Skills directory on disk
//!
//! Skills are grouped one level deep by category. Each skill is a directory
//! containing a `SKILL.md` file with YAML frontmatter:
//!
//! ```text
//! skills/
//!   OVERVIEW.md            (optional, prepended to every export)
//!   frontend/
//!     react-hooks/
//!       SKILL.md
//! ```
//!
//! ```yaml
//! ---
//! name: react-hooks
//! description: Brief description shown as a tooltip
//! ---
//! ```
//!
//! [`prepare_manifest`] turns this layout (plus an optional hand-written
//! `skills.json`) into the manifest the catalog loads.

mod loader;
mod prepare;

pub use loader::{scan_categories, scan_skill_paths, skill_document_path, ScannedCategory};
pub use prepare::{generate_manifest, inject_skill_paths, prepare_manifest, Prepared};
