//! Shared constants

/// Catalog and manifest naming
pub mod catalog {
    /// Id of the synthetic root in generated or fallback manifests
    pub const ROOT_ID: &str = "root";

    /// Default label injected on the root node
    pub const DEFAULT_APP_NAME: &str = "skillz";

    /// Manifest file fetched relative to the catalog origin
    pub const MANIFEST_FILE: &str = "skills.json";

    /// Saved layout file fetched relative to the catalog origin
    pub const LAYOUT_FILE: &str = "layout.json";

    /// Document every skill directory must contain
    pub const SKILL_FILE: &str = "SKILL.md";

    /// Optional overview document at the top of the skills directory
    pub const OVERVIEW_FILE: &str = "OVERVIEW.md";

    /// URL prefix under which the skills directory is served
    pub const SKILLS_URL_PREFIX: &str = "skills";

    pub const SKILL_ID_PREFIX: &str = "skill-";
    pub const CATEGORY_ID_PREFIX: &str = "cat-";

    pub const BREADCRUMB_SEPARATOR: &str = " / ";
}

/// Fallback radial layout geometry
pub mod layout {
    /// Side of the abstract square canvas
    pub const GRAPH_SIZE: f64 = 1000.0;

    /// Ring spacing as a fraction of the canvas side
    pub const RING_SPACING: f64 = 0.21;

    /// Total arc shared by the children of a non-root node
    pub const CHILD_ARC_DEGREES: f64 = 144.0;

    /// Type tag given to the root graph node
    pub const ROOT_NODE_TYPE: &str = "root";
}

/// Document interpolation
pub mod content {
    /// Replaced with the caller-supplied origin
    pub const BASE_URL_TOKEN: &str = "${baseUrl}";

    /// Replaced with `/` + the document's containing directory
    pub const SKILL_PATH_TOKEN: &str = "${skillPath}";

    /// Maximum characters kept from a frontmatter description
    pub const DESCRIPTION_MAX_CHARS: usize = 250;
}

/// Loadout stitching
pub mod loadout {
    /// Rough chars-to-tokens ratio; an estimate, not a tokenizer
    pub const APPROX_TOKENS_PER_CHAR: f64 = 0.25;

    /// Separator between stitched documents
    pub const PART_SEPARATOR: &str = "\n\n";
}

/// Settings defaults
pub mod config {
    /// Optional settings file in the working directory
    pub const CONFIG_FILE: &str = "skillz.toml";

    pub const DEFAULT_SKILLS_DIR: &str = "./skills";
    pub const DEFAULT_PUBLIC_DIR: &str = "./public";
    pub const DEFAULT_ORIGIN: &str = "http://localhost:5173";
    pub const DEFAULT_PORT: u16 = 3000;
}
