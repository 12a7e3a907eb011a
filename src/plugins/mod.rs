//! Post-save plugins
//!
//! A plugin is anything implementing [`Plugin`]. The [`PluginHost`] resolves
//! each configured name to a local executable under `.nanopost/plugins/`, a
//! built-in, or a `nanopost-plugin-<name>` program on `PATH`, and runs the
//! loaded plugins one after another after a post is written.

mod command;
mod github;
mod host;

pub use command::CommandPlugin;
pub use github::GithubPlugin;
pub use host::{LoadedPlugin, PluginFactory, PluginHost, PluginRunResult, PLUGIN_PREFIX};

use crate::config::{Config, PluginConfig};
use crate::core::Frontmatter;
use serde::Serialize;
use std::path::Path;

/// Everything a plugin learns about a saved post
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSavedContext<'a> {
    pub file_path: &'a Path,
    pub project_root: &'a Path,
    pub nanopost_dir: &'a Path,
    pub config: &'a Config,
    /// The entry that enabled the receiving plugin
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugin_config: Option<&'a PluginConfig>,
    pub frontmatter: &'a Frontmatter,
    pub body: &'a str,
}

impl<'a> PostSavedContext<'a> {
    pub fn with_plugin_config(self, plugin_config: &'a PluginConfig) -> Self {
        Self {
            plugin_config: Some(plugin_config),
            ..self
        }
    }
}

/// A post-save hook
pub trait Plugin {
    fn name(&self) -> &str;

    /// Called after a post has been written. Does nothing by default.
    fn on_post_saved(&self, _ctx: &PostSavedContext<'_>) -> anyhow::Result<()> {
        Ok(())
    }
}
