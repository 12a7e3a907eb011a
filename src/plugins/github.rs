use super::{Plugin, PostSavedContext};
use anyhow::{bail, Context};
use log::info;
use serde_json::Value;
use std::process::Command;

/// Built-in publisher: commit the saved post, push, and open a pull request.
///
/// Requires `git` and an authenticated GitHub CLI. Options:
/// `push` (default true) and `pullRequest` (default true).
#[derive(Debug, Default, Clone)]
pub struct GithubPlugin;

fn run(program: &str, args: &[&str], ctx: &PostSavedContext<'_>) -> anyhow::Result<()> {
    let status = Command::new(program)
        .args(args)
        .current_dir(ctx.project_root)
        .status()
        .with_context(|| format!("failed to run {program}"))?;
    if !status.success() {
        bail!("`{} {}` exited with {}", program, args.join(" "), status);
    }
    Ok(())
}

fn option_enabled(ctx: &PostSavedContext<'_>, key: &str) -> bool {
    ctx.plugin_config
        .and_then(|p| p.options.get(key))
        .and_then(Value::as_bool)
        .unwrap_or(true)
}

impl Plugin for GithubPlugin {
    fn name(&self) -> &str {
        "github"
    }

    fn on_post_saved(&self, ctx: &PostSavedContext<'_>) -> anyhow::Result<()> {
        let file = ctx.file_path.to_string_lossy();
        let message = format!("nanopost: add {file}");

        run("git", &["add", &file], ctx)?;
        run("git", &["commit", "-m", &message], ctx)?;
        info!("Committed {file}");

        if option_enabled(ctx, "push") {
            run("git", &["push"], ctx)?;
        }
        if option_enabled(ctx, "pullRequest") {
            run("gh", &["pr", "create", "--fill"], ctx)?;
        }
        Ok(())
    }
}
