use super::{CommandPlugin, GithubPlugin, Plugin, PostSavedContext};
use crate::config::PluginConfig;
use crate::error::{NanopostError, Result};
use crate::io::fs::is_executable;
use log::{debug, error, warn};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Prefix of plugin executables looked up on `PATH`
pub const PLUGIN_PREFIX: &str = "nanopost-plugin-";

/// Builds a built-in plugin from its config entry
pub type PluginFactory = Box<dyn Fn(&PluginConfig) -> Box<dyn Plugin>>;

/// A resolved plugin together with the config entry that enabled it
pub struct LoadedPlugin {
    pub plugin: Box<dyn Plugin>,
    pub config: PluginConfig,
}

impl LoadedPlugin {
    pub fn name(&self) -> &str {
        self.plugin.name()
    }
}

impl fmt::Debug for LoadedPlugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedPlugin")
            .field("name", &self.plugin.name())
            .field("config", &self.config)
            .finish()
    }
}

/// Outcome of one plugin's post-save hook
#[derive(Debug)]
pub struct PluginRunResult {
    pub plugin: String,
    pub success: bool,
    pub error: Option<NanopostError>,
}

/// Resolves configured plugin names and runs their hooks
pub struct PluginHost {
    builtins: BTreeMap<String, PluginFactory>,
}

impl Default for PluginHost {
    fn default() -> Self {
        Self::new()
    }
}

impl PluginHost {
    /// A host with the built-in plugins registered
    pub fn new() -> Self {
        let mut host = Self::empty();
        host.register(
            "github",
            Box::new(|_: &PluginConfig| Box::new(GithubPlugin) as Box<dyn Plugin>),
        );
        host
    }

    /// A host with no built-ins
    pub fn empty() -> Self {
        Self {
            builtins: BTreeMap::new(),
        }
    }

    /// Register a built-in plugin under `name`, replacing any previous one
    pub fn register(&mut self, name: impl Into<String>, factory: PluginFactory) {
        self.builtins.insert(name.into(), factory);
    }

    pub fn builtin_names(&self) -> Vec<&str> {
        self.builtins.keys().map(String::as_str).collect()
    }

    /// Resolve a single plugin entry.
    ///
    /// Order: `.nanopost/plugins/<name>` or `<name>.sh`, then the built-in
    /// table, then `nanopost-plugin-<name>` on `PATH`.
    pub fn load_plugin(&self, nanopost_dir: &Path, config: &PluginConfig) -> Result<LoadedPlugin> {
        let name = config.name.as_str();

        if let Some(local) = self.local_plugin_path(nanopost_dir, name) {
            if !is_executable(&local) {
                return Err(NanopostError::plugin_load(
                    name,
                    format!("{} is not executable", local.display()),
                ));
            }
            debug!("Plugin {} resolved to local {}", name, local.display());
            return Ok(LoadedPlugin {
                plugin: Box::new(CommandPlugin::new(name, local)),
                config: config.clone(),
            });
        }

        if let Some(factory) = self.builtins.get(name) {
            debug!("Plugin {} resolved to built-in", name);
            return Ok(LoadedPlugin {
                plugin: factory(config),
                config: config.clone(),
            });
        }

        let external = format!("{PLUGIN_PREFIX}{name}");
        match which::which(&external) {
            Ok(program) => {
                debug!("Plugin {} resolved to {}", name, program.display());
                Ok(LoadedPlugin {
                    plugin: Box::new(CommandPlugin::new(name, program)),
                    config: config.clone(),
                })
            }
            Err(_) => Err(NanopostError::plugin_load(
                name,
                format!(
                    "not found in {}, not a built-in, and no {} on PATH",
                    nanopost_dir.join("plugins").display(),
                    external
                ),
            )),
        }
    }

    fn local_plugin_path(&self, nanopost_dir: &Path, name: &str) -> Option<PathBuf> {
        let dir = nanopost_dir.join("plugins");
        [dir.join(name), dir.join(format!("{name}.sh"))]
            .into_iter()
            .find(|candidate| candidate.is_file())
    }

    /// Load every enabled plugin. Failures are logged and skipped.
    pub fn load_plugins(&self, nanopost_dir: &Path, configs: &[PluginConfig]) -> Vec<LoadedPlugin> {
        configs
            .iter()
            .filter(|c| c.enabled)
            .filter_map(|c| match self.load_plugin(nanopost_dir, c) {
                Ok(loaded) => Some(loaded),
                Err(e) => {
                    error!("{}", e);
                    None
                }
            })
            .collect()
    }

    /// Run each plugin's hook in order. A failing hook never stops the rest.
    pub fn run_on_post_saved(
        plugins: &[LoadedPlugin],
        ctx: &PostSavedContext<'_>,
    ) -> Vec<PluginRunResult> {
        plugins
            .iter()
            .map(|loaded| {
                let name = loaded.name().to_string();
                let plugin_ctx = ctx.with_plugin_config(&loaded.config);
                match loaded.plugin.on_post_saved(&plugin_ctx) {
                    Ok(()) => {
                        debug!("Plugin {} finished", name);
                        PluginRunResult {
                            plugin: name,
                            success: true,
                            error: None,
                        }
                    }
                    Err(e) => {
                        let err = NanopostError::plugin_runtime(&name, format!("{e:#}"));
                        warn!("{}", err);
                        PluginRunResult {
                            plugin: name,
                            success: false,
                            error: Some(err),
                        }
                    }
                }
            })
            .collect()
    }
}
