use super::Project;
use crate::core::Post;
use crate::error::Result;
use crate::io::{filter_posts, limit_posts};
use log::debug;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub limit: Option<usize>,
    pub json: bool,
    pub grep: Option<String>,
    pub post_type: Option<String>,
}

/// List posts newest first. Returns the posts that were printed.
pub fn run_list(cwd: &Path, opts: &ListOptions, out: &mut dyn Write) -> Result<Vec<Post>> {
    let project = Project::open(cwd)?;

    let posts = project.collect_posts(opts.post_type.as_deref())?;
    let posts = filter_posts(posts, opts.grep.as_deref());
    let posts = limit_posts(posts, opts.limit);
    debug!("Listing {} posts", posts.len());

    if opts.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&posts)?)?;
    } else if posts.is_empty() {
        writeln!(out, "No posts found.")?;
    } else {
        for post in &posts {
            writeln!(out, "{}  {}", post.date, post.title)?;
        }
    }

    Ok(posts)
}
