use super::{Plugin, PostSavedContext};
use anyhow::{bail, Context};
use log::debug;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// A plugin backed by an external executable.
///
/// The context is written to the program's stdin as JSON and mirrored in
/// `NANOPOST_*` environment variables. The program runs in the project root;
/// a non-zero exit status fails the hook.
#[derive(Debug, Clone)]
pub struct CommandPlugin {
    name: String,
    program: PathBuf,
}

impl CommandPlugin {
    pub fn new(name: impl Into<String>, program: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            program: program.into(),
        }
    }

    pub fn program(&self) -> &PathBuf {
        &self.program
    }
}

impl Plugin for CommandPlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn on_post_saved(&self, ctx: &PostSavedContext<'_>) -> anyhow::Result<()> {
        let payload = serde_json::to_vec(ctx).context("failed to serialize plugin context")?;
        let options = ctx
            .plugin_config
            .map(|p| serde_json::to_string(&p.options))
            .transpose()?
            .unwrap_or_else(|| "{}".to_string());

        debug!("Running plugin {} via {}", self.name, self.program.display());
        let mut child = Command::new(&self.program)
            .current_dir(ctx.project_root)
            .env("NANOPOST_PLUGIN", &self.name)
            .env("NANOPOST_FILE_PATH", ctx.file_path)
            .env("NANOPOST_PROJECT_ROOT", ctx.project_root)
            .env("NANOPOST_DIR", ctx.nanopost_dir)
            .env("NANOPOST_PLUGIN_OPTIONS", options)
            .stdin(Stdio::piped())
            .spawn()
            .with_context(|| format!("failed to start {}", self.program.display()))?;

        if let Some(mut stdin) = child.stdin.take() {
            // a program that ignores its input may exit before we finish writing
            if let Err(e) = stdin.write_all(&payload) {
                if e.kind() != ErrorKind::BrokenPipe {
                    return Err(e).context("failed to write plugin context");
                }
            }
        }

        let status = child.wait().context("failed to wait for plugin")?;
        if !status.success() {
            bail!("{} exited with {}", self.program.display(), status);
        }
        Ok(())
    }
}
