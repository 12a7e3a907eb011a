//! External editor invocation
//!
//! The editor command comes from `config.json`, then `$EDITOR`, then
//! `$VISUAL`. Commands may carry arguments (`code --wait`); they are split
//! with shell quoting rules and the file path is appended last.

use crate::error::{NanopostError, Result};
use log::debug;
use std::env;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::Command;

/// Editor command to use, if any is configured or set in the environment.
pub fn resolve_editor(configured: Option<&str>) -> Option<String> {
    let from_env = |key: &str| env::var(key).ok().filter(|v| !v.trim().is_empty());

    configured
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .or_else(|| from_env("EDITOR"))
        .or_else(|| from_env("VISUAL"))
}

/// Split an editor command into program and arguments.
pub fn split_command(command: &str) -> Result<(String, Vec<String>)> {
    let mut parts = shlex::split(command)
        .ok_or_else(|| NanopostError::editor_failed(command, "unbalanced quotes"))?;
    if parts.is_empty() {
        return Err(NanopostError::editor_failed(command, "empty command"));
    }
    let program = parts.remove(0);
    Ok((program, parts))
}

/// First word of an editor command
pub fn editor_program(command: &str) -> Option<String> {
    split_command(command).ok().map(|(program, _)| program)
}

fn run_editor(command: &str, file: &Path) -> Result<()> {
    let (program, args) = split_command(command)?;
    debug!("Opening {} with `{}`", file.display(), command);

    let status = Command::new(&program)
        .args(&args)
        .arg(file)
        .status()
        .map_err(|e| NanopostError::editor_failed(command, e.to_string()))?;

    if !status.success() {
        return Err(NanopostError::editor_failed(
            command,
            format!("exited with {status}"),
        ));
    }
    Ok(())
}

/// Let the user edit `initial` in a scratch file and return the trimmed result.
///
/// With no editor available the text comes back unchanged.
pub fn edit_text(initial: &str, configured: Option<&str>) -> Result<String> {
    let Some(command) = resolve_editor(configured) else {
        debug!("No editor available, keeping text as is");
        return Ok(initial.to_string());
    };

    let mut scratch = tempfile::Builder::new()
        .prefix("nanopost-")
        .suffix(".md")
        .tempfile()?;
    scratch.write_all(initial.as_bytes())?;
    scratch.flush()?;

    run_editor(&command, scratch.path())?;

    let updated = fs::read_to_string(scratch.path())?;
    Ok(updated.trim().to_string())
}

/// Open an existing file in the editor and return its new contents.
pub fn edit_existing_file(path: &Path, configured: Option<&str>) -> Result<String> {
    let command = resolve_editor(configured).ok_or(NanopostError::MissingEditor)?;
    run_editor(&command, path)?;
    Ok(fs::read_to_string(path)?)
}
