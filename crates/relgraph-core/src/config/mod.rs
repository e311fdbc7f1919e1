//! Configuration management for relgraph.
//!
//! Configuration is loaded from multiple sources with the following priority:
//! 1. Environment variables (highest priority)
//! 2. Project-local `relgraph.toml` file
//! 3. User config `~/.config/relgraph/config.toml`
//! 4. Built-in defaults (lowest priority)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

mod defaults;

pub use defaults::*;

use crate::filter::EmptySelection;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input file locations.
    pub data: DataConfig,

    /// Column names of the input tables.
    pub columns: ColumnConfig,

    /// Node/edge styling.
    pub graph: GraphConfig,

    /// Network canvas options handed to the renderer.
    pub canvas: CanvasConfig,

    /// Filter behavior.
    pub filter: FilterConfig,

    /// Dashboard server settings.
    pub server: ServerConfig,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// Searches for config in order:
    /// 1. `./relgraph.toml` (project local)
    /// 2. `~/.config/relgraph/config.toml` (user config)
    /// 3. Falls back to defaults
    pub fn load() -> Result<Self, ConfigError> {
        if Path::new(LOCAL_CONFIG_FILE).exists() {
            return Self::from_file(LOCAL_CONFIG_FILE);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join(USER_CONFIG_DIR).join(USER_CONFIG_FILE);
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        let mut config = Self::default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(path) = std::env::var("RELGRAPH_DATA_PATH") {
            self.data.relationships = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var("RELGRAPH_PROPERTY_PATH") {
            self.data.property = Some(PathBuf::from(path));
        }
        if let Ok(path) = std::env::var("RELGRAPH_DETAIL_PATH") {
            self.data.detail = Some(PathBuf::from(path));
        }
        if let Ok(port) = std::env::var("RELGRAPH_PORT") {
            if let Ok(n) = port.parse() {
                self.server.port = n;
            }
        }
        if let Ok(policy) = std::env::var("RELGRAPH_EMPTY_SELECTION") {
            self.filter.empty_selection = policy.parse().map_err(ConfigError::Invalid)?;
        }
        Ok(())
    }

    /// Reject values the graph builder cannot use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let g = &self.graph;
        for (name, value) in [
            ("graph.base_size", g.base_size),
            ("graph.size_scale", g.size_scale),
            ("graph.fixed_size", g.fixed_size),
            ("graph.default_weight", g.default_weight),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        if self.columns.source.is_empty() || self.columns.target.is_empty() {
            return Err(ConfigError::Invalid(
                "columns.source and columns.target must be set".to_string(),
            ));
        }
        Ok(())
    }

    /// Create a default config file content as a string.
    pub fn default_config_string() -> String {
        let mut config = Config::default();
        config.data.property = Some(PathBuf::from(DEFAULT_PROPERTY_PATH));
        config.data.detail = Some(PathBuf::from(DEFAULT_DETAIL_PATH));
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Input file locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Relationship table (source, target, ...).
    pub relationships: PathBuf,

    /// Optional node-property table used by the tag filter and node colors.
    pub property: Option<PathBuf>,

    /// Optional entity-detail table shown below the graph.
    pub detail: Option<PathBuf>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            relationships: PathBuf::from(DEFAULT_DATA_PATH),
            property: None,
            detail: None,
        }
    }
}

/// Column names of the input tables. Fixed per deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    pub source: String,
    pub target: String,
    pub relation: String,
    pub weight: String,
    pub tag: String,

    /// Name column of the property table.
    pub property_name: String,

    /// Tag column of the property table.
    pub property_tag: String,

    /// Key column of the detail table.
    pub detail_key: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE_COLUMN.to_string(),
            target: DEFAULT_TARGET_COLUMN.to_string(),
            relation: DEFAULT_RELATION_COLUMN.to_string(),
            weight: DEFAULT_WEIGHT_COLUMN.to_string(),
            tag: DEFAULT_TAG_COLUMN.to_string(),
            property_name: DEFAULT_PROPERTY_NAME_COLUMN.to_string(),
            property_tag: DEFAULT_PROPERTY_TAG_COLUMN.to_string(),
            detail_key: DEFAULT_DETAIL_KEY_COLUMN.to_string(),
        }
    }
}

/// Node and edge styling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Scale node size with degree.
    pub degree_sizing: bool,

    pub base_size: f64,
    pub size_scale: f64,

    /// Size of every node when `degree_sizing` is off.
    pub fixed_size: f64,

    /// Edge width for rows without a weight.
    pub default_weight: f64,

    pub node_color: String,
    pub fallback_color: String,
    pub highlight_color: String,

    /// Relation label -> edge color.
    pub relation_palette: BTreeMap<String, String>,

    /// Tag -> node color.
    pub tag_palette: BTreeMap<String, String>,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            degree_sizing: true,
            base_size: DEFAULT_BASE_SIZE,
            size_scale: DEFAULT_SIZE_SCALE,
            fixed_size: DEFAULT_FIXED_SIZE,
            default_weight: DEFAULT_EDGE_WEIGHT,
            node_color: DEFAULT_NODE_COLOR.to_string(),
            fallback_color: DEFAULT_FALLBACK_COLOR.to_string(),
            highlight_color: DEFAULT_HIGHLIGHT_COLOR.to_string(),
            relation_palette: palette(DEFAULT_RELATION_PALETTE),
            tag_palette: palette(DEFAULT_TAG_PALETTE),
        }
    }
}

impl GraphConfig {
    /// Node size for a given degree.
    pub fn node_size(&self, degree: usize) -> f64 {
        if self.degree_sizing {
            self.base_size + degree as f64 * self.size_scale
        } else {
            self.fixed_size
        }
    }

    /// Edge color for a relation label, falling back for unmapped or missing labels.
    pub fn relation_color(&self, relation: Option<&str>) -> &str {
        relation
            .and_then(|r| self.relation_palette.get(r))
            .map(String::as_str)
            .unwrap_or(&self.fallback_color)
    }

    /// Node color for an optional tag.
    pub fn tag_color(&self, tag: Option<&str>) -> &str {
        tag.and_then(|t| self.tag_palette.get(t))
            .map(String::as_str)
            .unwrap_or(&self.node_color)
    }
}

fn palette(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Canvas options for the network document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub height: String,
    pub width: String,
    pub background: String,
    pub font_color: String,
    pub font_size: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            height: DEFAULT_CANVAS_HEIGHT.to_string(),
            width: DEFAULT_CANVAS_WIDTH.to_string(),
            background: DEFAULT_BACKGROUND_COLOR.to_string(),
            font_color: DEFAULT_FONT_COLOR.to_string(),
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

/// Filter behavior.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// What an empty category selection means.
    pub empty_selection: EmptySelection,
}

/// Dashboard server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,

    /// Open the dashboard in a browser on start.
    pub open_browser: bool,

    pub title: String,

    /// Height of the embedded network frame in pixels.
    pub frame_height: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            open_browser: true,
            title: DEFAULT_TITLE.to_string(),
            frame_height: DEFAULT_FRAME_HEIGHT,
        }
    }
}
