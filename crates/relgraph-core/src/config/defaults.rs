//! Default values for relgraph configuration.
//!
//! All hardcoded defaults are centralized here for easy maintenance.

// ============================================================================
// Data Defaults
// ============================================================================

/// Relationship table read on every render pass.
pub const DEFAULT_DATA_PATH: &str = "data/relationships.csv";

/// Node-property table (name -> tag).
pub const DEFAULT_PROPERTY_PATH: &str = "data/property.csv";

/// Entity-detail table (person -> organization).
pub const DEFAULT_DETAIL_PATH: &str = "data/hco.csv";

// ============================================================================
// Column Defaults
// ============================================================================

pub const DEFAULT_SOURCE_COLUMN: &str = "source";
pub const DEFAULT_TARGET_COLUMN: &str = "target";
pub const DEFAULT_RELATION_COLUMN: &str = "relation";
pub const DEFAULT_WEIGHT_COLUMN: &str = "weight";
pub const DEFAULT_TAG_COLUMN: &str = "tag";

/// Name column of the node-property table.
pub const DEFAULT_PROPERTY_NAME_COLUMN: &str = "name";

/// Tag column of the node-property table.
pub const DEFAULT_PROPERTY_TAG_COLUMN: &str = "tag";

/// Key column of the entity-detail table, matched against node ids.
pub const DEFAULT_DETAIL_KEY_COLUMN: &str = "hcp_name";

// ============================================================================
// Graph Defaults
// ============================================================================

/// Node size at degree zero when degree sizing is enabled.
pub const DEFAULT_BASE_SIZE: f64 = 20.0;

/// Size added per incident edge.
pub const DEFAULT_SIZE_SCALE: f64 = 5.0;

/// Node size used when degree sizing is disabled.
pub const DEFAULT_FIXED_SIZE: f64 = 10.0;

/// Edge width for rows without a weight.
pub const DEFAULT_EDGE_WEIGHT: f64 = 1.0;

/// Node color when no tag color applies.
pub const DEFAULT_NODE_COLOR: &str = "#97c2fc";

/// Edge color for relations missing from the palette.
pub const DEFAULT_FALLBACK_COLOR: &str = "#9e9e9e";

/// Color of the clicked node.
pub const DEFAULT_HIGHLIGHT_COLOR: &str = "#ff6b35";

/// Relation -> edge color.
pub const DEFAULT_RELATION_PALETTE: &[(&str, &str)] = &[
    ("friend", "#4caf50"),
    ("colleague", "#2196f3"),
    ("family", "#e91e63"),
    ("mentor", "#ff9800"),
    ("coauthor", "#9c27b0"),
];

/// Tag -> node color.
pub const DEFAULT_TAG_PALETTE: &[(&str, &str)] = &[
    ("cardiology", "#ef5350"),
    ("oncology", "#ab47bc"),
    ("neurology", "#42a5f5"),
    ("pediatrics", "#66bb6a"),
    ("surgery", "#ffa726"),
];

// ============================================================================
// Canvas Defaults
// ============================================================================

pub const DEFAULT_CANVAS_HEIGHT: &str = "600px";
pub const DEFAULT_CANVAS_WIDTH: &str = "100%";
pub const DEFAULT_BACKGROUND_COLOR: &str = "#1a1a2e";
pub const DEFAULT_FONT_COLOR: &str = "white";
pub const DEFAULT_FONT_SIZE: u32 = 16;

// ============================================================================
// Server Defaults
// ============================================================================

pub const DEFAULT_PORT: u16 = 8501;

/// Dashboard page title.
pub const DEFAULT_TITLE: &str = "Relationship Network Dashboard";

/// Height of the embedded network frame in pixels.
pub const DEFAULT_FRAME_HEIGHT: u32 = 620;

// ============================================================================
// Config Files
// ============================================================================

/// Project-local config file name.
pub const LOCAL_CONFIG_FILE: &str = "relgraph.toml";

/// Directory under the user config dir.
pub const USER_CONFIG_DIR: &str = "relgraph";

/// File name under the user config dir.
pub const USER_CONFIG_FILE: &str = "config.toml";
