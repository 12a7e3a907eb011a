//! Command implementations shared by the binary and integration tests
//!
//! Every command takes the working directory it runs from and writes its
//! user-facing output to a caller-provided writer.

pub mod doctor;
pub mod edit;
pub mod init;
pub mod last;
pub mod list;
pub mod new;
pub mod prompt;

pub use doctor::{print_doctor_report, run_doctor, CheckResult, CheckStatus, DoctorReport};
pub use edit::run_edit;
pub use init::{run_init, InitOptions};
pub use last::{run_last, LastOptions};
pub use list::{run_list, ListOptions};
pub use new::{build_filename, derive_title, parse_tags, run_new, NewInput, NewOptions};
pub use prompt::{InquirePrompter, Prompter};

use crate::config::{read_config, resolve_post_type_config, Config};
use crate::core::{Frontmatter, Post};
use crate::error::{NanopostError, Result};
use crate::io::scanner::{scan_posts, sort_newest_first};
use crate::io::ProjectPaths;
use crate::plugins::{PluginHost, PluginRunResult, PostSavedContext};
use log::{debug, info};
use std::path::{Path, PathBuf};

/// A discovered project and its loaded configuration
#[derive(Debug, Clone)]
pub struct Project {
    pub paths: ProjectPaths,
    pub config: Config,
}

impl Project {
    pub fn open(cwd: &Path) -> Result<Self> {
        let paths = ProjectPaths::discover(cwd)?;
        let config = read_config(&paths.nanopost_dir)?;
        debug!(
            "Project root {}, config dir {}",
            paths.project_root.display(),
            paths.nanopost_dir.display()
        );
        Ok(Self { paths, config })
    }

    /// Posts of one type, or of every type, newest first.
    ///
    /// Content directories shared by several types are scanned once.
    pub fn collect_posts(&self, post_type: Option<&str>) -> Result<Vec<Post>> {
        let types: Vec<&str> = match post_type {
            Some(name) => {
                if !self.config.post_types.contains_key(name) {
                    return Err(NanopostError::unknown_post_type(name));
                }
                vec![name]
            }
            None => self.config.post_type_names(),
        };

        let mut seen_dirs: Vec<PathBuf> = Vec::new();
        let mut posts = Vec::new();
        for name in types {
            let resolved = resolve_post_type_config(&self.config, name)?;
            let dir = self.paths.resolve(&resolved.content_dir);
            if seen_dirs.contains(&dir) {
                continue;
            }
            posts.extend(scan_posts(&dir)?);
            seen_dirs.push(dir);
        }

        sort_newest_first(&mut posts);
        Ok(posts)
    }

    /// Run the post-save hooks of every enabled plugin for `file`.
    pub fn publish(
        &self,
        host: &PluginHost,
        file: &Path,
        frontmatter: &Frontmatter,
        body: &str,
    ) -> Vec<PluginRunResult> {
        let plugins = host.load_plugins(&self.paths.nanopost_dir, &self.config.plugins);
        if plugins.is_empty() {
            return Vec::new();
        }

        let ctx = PostSavedContext {
            file_path: file,
            project_root: &self.paths.project_root,
            nanopost_dir: &self.paths.nanopost_dir,
            config: &self.config,
            plugin_config: None,
            frontmatter,
            body,
        };
        let results = PluginHost::run_on_post_saved(&plugins, &ctx);
        let failed = results.iter().filter(|r| !r.success).count();
        info!("Ran {} plugins ({} failed)", results.len(), failed);
        results
    }

    /// The top-level editor command, if set
    pub fn editor(&self) -> Option<&str> {
        Some(self.config.editor.as_str()).filter(|e| !e.trim().is_empty())
    }
}
