//! Configuration types for `.nanopost/config.json`

use crate::core::{Frontmatter, FrontmatterSchema, DEFAULT_DATE_FORMAT, DEFAULT_MAX_SLUG_LENGTH};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Name of the post type in the built-in configuration
pub const DEFAULT_TYPE_NAME: &str = "default";

/// Content directory of the built-in post type
pub const DEFAULT_CONTENT_DIR: &str = "content/posts";

/// Filename format that selects the fixed `<date>-<slug>.md` naming
pub const LEGACY_FILENAME_FORMAT: &str = "date-slug";

/// Top-level project configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub default_type: String,
    /// Post types in the order they appear in the config file
    pub post_types: IndexMap<String, PostTypeConfig>,
    #[serde(default)]
    pub editor: String,
    #[serde(default)]
    pub plugins: Vec<PluginConfig>,
}

/// Settings for one post type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostTypeConfig {
    pub content_dir: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<FilenameConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frontmatter: Option<FrontmatterConfig>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilenameConfig {
    /// `date-slug`, or a template such as `{date}-{type}-{title}`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_slug_length: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontmatterConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<FrontmatterSchema>,
    #[serde(default)]
    pub defaults: Frontmatter,
}

/// A plugin entry. `options` is passed through to the plugin untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginConfig {
    pub name: String,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub options: Map<String, Value>,
}

fn enabled_by_default() -> bool {
    true
}

impl PluginConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            options: Map::new(),
        }
    }
}

impl Default for PostTypeConfig {
    fn default() -> Self {
        Self {
            content_dir: DEFAULT_CONTENT_DIR.to_string(),
            date_format: Some(DEFAULT_DATE_FORMAT.to_string()),
            filename: Some(FilenameConfig {
                format: Some(LEGACY_FILENAME_FORMAT.to_string()),
                max_slug_length: Some(DEFAULT_MAX_SLUG_LENGTH),
            }),
            frontmatter: Some(FrontmatterConfig::default()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_type: DEFAULT_TYPE_NAME.to_string(),
            post_types: IndexMap::from([(DEFAULT_TYPE_NAME.to_string(), PostTypeConfig::default())]),
            editor: String::new(),
            plugins: Vec::new(),
        }
    }
}

impl Config {
    /// Names of all configured post types
    pub fn post_type_names(&self) -> Vec<&str> {
        self.post_types.keys().map(String::as_str).collect()
    }

    /// The configured default post type
    pub fn default_post_type(&self) -> &str {
        &self.default_type
    }

    /// Plugin entries that are not explicitly disabled
    pub fn enabled_plugins(&self) -> impl Iterator<Item = &PluginConfig> {
        self.plugins.iter().filter(|p| p.enabled)
    }
}

/// Effective settings for one post type after merging over the built-in defaults
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPostType {
    pub name: String,
    pub content_dir: String,
    pub date_format: String,
    pub filename_format: String,
    pub max_slug_length: usize,
    pub schema: Option<FrontmatterSchema>,
    /// Always contains a `type` entry
    pub defaults: Frontmatter,
    /// Top-level editor command, if one is set
    pub editor: Option<String>,
}

impl ResolvedPostType {
    pub fn uses_legacy_filename(&self) -> bool {
        self.filename_format == LEGACY_FILENAME_FORMAT
    }
}
