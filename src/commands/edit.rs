use super::Project;
use crate::core::parse_frontmatter_from;
use crate::error::{NanopostError, Result};
use crate::io::edit_existing_file;
use crate::plugins::{PluginHost, PluginRunResult};
use log::debug;
use std::path::Path;

/// Open an existing post in the editor, then run the post-save plugins.
pub fn run_edit(cwd: &Path, file: &Path, host: &PluginHost) -> Result<Vec<PluginRunResult>> {
    let resolved = cwd.join(file);
    if !resolved.exists() {
        return Err(NanopostError::file_not_found(resolved));
    }

    let project = Project::open(cwd)?;
    debug!("Editing {}", resolved.display());

    let updated = edit_existing_file(&resolved, project.editor())?;
    let doc = parse_frontmatter_from(&updated, &resolved)?;
    Ok(project.publish(host, &resolved, &doc.frontmatter, &doc.body))
}
