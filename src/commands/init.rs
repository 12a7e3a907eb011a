use crate::config::{write_config, Config, PluginConfig, CONFIG_FILE};
use crate::error::Result;
use crate::io::fs::{make_executable, write_file};
use crate::io::{find_nanopost_dir, find_project_root, NANOPOST_DIR};
use log::{debug, info};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Default)]
pub struct InitOptions {
    /// Install and enable the GitHub publishing plugin script
    pub github: bool,
    /// Overwrite an existing setup
    pub force: bool,
}

const GITHUB_PLUGIN_SCRIPT: &str = r#"#!/bin/sh
# nanopost plugin: commit the saved post and open a pull request.
# Requires git and an authenticated GitHub CLI (gh).
set -e
git add "$NANOPOST_FILE_PATH"
git commit -m "nanopost: add $NANOPOST_FILE_PATH"
git push
gh pr create --fill
"#;

/// Create `.nanopost/` with a default config. Returns its path.
pub fn run_init(cwd: &Path, opts: InitOptions, out: &mut dyn Write) -> Result<PathBuf> {
    if let Some(existing) = find_nanopost_dir(cwd) {
        if !opts.force {
            writeln!(out, ".nanopost already exists at: {}", existing.display())?;
            return Ok(existing);
        }
    }

    let root = find_project_root(cwd).unwrap_or_else(|| cwd.to_path_buf());
    let dir = root.join(NANOPOST_DIR);
    let plugins_dir = dir.join("plugins");
    fs::create_dir_all(&plugins_dir)?;
    debug!("Initializing {}", dir.display());

    let mut config = Config::default();

    if opts.github {
        let script = plugins_dir.join("github");
        if !script.exists() || opts.force {
            write_file(&script, GITHUB_PLUGIN_SCRIPT)?;
            make_executable(&script)?;
            info!("Wrote {}", script.display());
        }
        config.plugins.push(PluginConfig::new("github"));
    }

    write_config(&dir, &config)?;

    writeln!(out, "Created {}", dir.display())?;
    writeln!(out, "Config: {}", dir.join(CONFIG_FILE).display())?;
    Ok(dir)
}
