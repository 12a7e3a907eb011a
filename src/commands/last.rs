use super::Project;
use crate::core::{parse_frontmatter_from, Post};
use crate::error::Result;
use crate::io::edit_existing_file;
use crate::plugins::PluginHost;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct LastOptions {
    pub edit: bool,
    pub path: bool,
    pub json: bool,
    pub post_type: Option<String>,
}

/// Show, or edit, the newest post. Returns it when one exists.
pub fn run_last(
    cwd: &Path,
    opts: &LastOptions,
    host: &PluginHost,
    out: &mut dyn Write,
) -> Result<Option<Post>> {
    let project = Project::open(cwd)?;
    let Some(last) = project
        .collect_posts(opts.post_type.as_deref())?
        .into_iter()
        .next()
    else {
        writeln!(out, "No posts found.")?;
        return Ok(None);
    };

    if opts.path {
        writeln!(out, "{}", last.path.display())?;
    } else if opts.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&last)?)?;
    } else if opts.edit {
        let updated = edit_existing_file(&last.path, project.editor())?;
        let doc = parse_frontmatter_from(&updated, &last.path)?;
        project.publish(host, &last.path, &doc.frontmatter, &doc.body);
    } else {
        writeln!(out, "{} \u{2014} {}", last.date, last.title)?;
        if !last.body.is_empty() {
            writeln!(out)?;
            writeln!(out, "{}", last.body)?;
        }
    }

    Ok(Some(last))
}
