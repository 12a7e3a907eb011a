//! Project configuration: loading, validation, merging and per-type resolution

mod model;
mod validate;

pub use model::{
    Config, FilenameConfig, FrontmatterConfig, PluginConfig, PostTypeConfig, ResolvedPostType,
    DEFAULT_CONTENT_DIR, DEFAULT_TYPE_NAME, LEGACY_FILENAME_FORMAT,
};
pub use validate::validate_config;

use crate::core::value::is_truthy;
use crate::core::{merge_json_values, DEFAULT_DATE_FORMAT, DEFAULT_MAX_SLUG_LENGTH};
use crate::error::{NanopostError, Result};
use log::debug;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Configuration file name inside `.nanopost/`
pub const CONFIG_FILE: &str = "config.json";

/// Recursively merge `overlay` onto `base`.
///
/// Objects merge key by key; any other overlay value, arrays included,
/// replaces the base value.
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    merge_json_values(base, overlay)
}

/// Load `config.json` from `nanopost_dir`, falling back to the built-in
/// configuration when the file does not exist.
pub fn read_config(nanopost_dir: &Path) -> Result<Config> {
    let path = nanopost_dir.join(CONFIG_FILE);
    if !path.exists() {
        debug!("No {} in {}, using defaults", CONFIG_FILE, nanopost_dir.display());
        return Ok(Config::default());
    }

    let raw = fs::read_to_string(&path)?;
    let parsed: Value =
        serde_json::from_str(&raw).map_err(|e| NanopostError::config_parse(e.to_string()))?;
    validate_config(&parsed)?;

    let merged = deep_merge(serde_json::to_value(Config::default())?, parsed);
    let config: Config = serde_json::from_value(merged)
        .map_err(|e| NanopostError::config_validation(e.to_string()))?;

    debug!(
        "Loaded config from {} ({} post types, {} plugins)",
        path.display(),
        config.post_types.len(),
        config.plugins.len()
    );
    Ok(config)
}

/// Write `config` as pretty JSON with a trailing newline.
pub fn write_config(nanopost_dir: &Path, config: &Config) -> Result<()> {
    let mut text = serde_json::to_string_pretty(config)?;
    text.push('\n');
    fs::write(nanopost_dir.join(CONFIG_FILE), text)?;
    Ok(())
}

/// Effective settings for `type_name`, merged over the built-in per-type defaults.
pub fn resolve_post_type_config(config: &Config, type_name: &str) -> Result<ResolvedPostType> {
    let entry = config
        .post_types
        .get(type_name)
        .ok_or_else(|| NanopostError::unknown_post_type(type_name))?;

    let merged = deep_merge(
        serde_json::to_value(PostTypeConfig::default())?,
        serde_json::to_value(entry)?,
    );
    let merged: PostTypeConfig = serde_json::from_value(merged)
        .map_err(|e| NanopostError::config_validation(e.to_string()))?;

    let filename = merged.filename.unwrap_or_default();
    let frontmatter = merged.frontmatter.unwrap_or_default();

    let mut defaults = frontmatter.defaults;
    let has_type = defaults.get("type").map(is_truthy).unwrap_or(false);
    if !has_type {
        defaults.insert("type".to_string(), Value::String(type_name.to_string()));
    }

    let editor = Some(config.editor.clone()).filter(|e| !e.trim().is_empty());

    Ok(ResolvedPostType {
        name: type_name.to_string(),
        content_dir: merged.content_dir,
        date_format: merged
            .date_format
            .unwrap_or_else(|| DEFAULT_DATE_FORMAT.to_string()),
        filename_format: filename
            .format
            .unwrap_or_else(|| LEGACY_FILENAME_FORMAT.to_string()),
        max_slug_length: filename.max_slug_length.unwrap_or(DEFAULT_MAX_SLUG_LENGTH),
        schema: frontmatter.schema,
        defaults,
        editor,
    })
}

/// Names of all configured post types
pub fn post_types(config: &Config) -> Vec<&str> {
    config.post_type_names()
}

/// The configured default post type
pub fn default_post_type(config: &Config) -> &str {
    config.default_post_type()
}
