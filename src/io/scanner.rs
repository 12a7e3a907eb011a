//! Post index: scan a content directory into sorted [`Post`] records

use crate::core::{parse_frontmatter_from, Post};
use crate::error::Result;
use crate::io::fs::{is_markdown, read_to_string};
use log::debug;
use std::path::Path;
use walkdir::WalkDir;

/// Scan `content_dir` (non-recursively) for Markdown posts, newest first.
///
/// A missing directory yields no posts.
pub fn scan_posts(content_dir: &Path) -> Result<Vec<Post>> {
    if !content_dir.is_dir() {
        debug!("Content directory {} does not exist", content_dir.display());
        return Ok(Vec::new());
    }

    let mut posts = Vec::new();
    for entry in WalkDir::new(content_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(std::io::Error::from)?;
        let path = entry.path();
        if !entry.file_type().is_file() || !is_markdown(path) {
            continue;
        }

        let file = entry.file_name().to_string_lossy().into_owned();
        let content = read_to_string(path)?;
        let doc = parse_frontmatter_from(&content, path)?;
        posts.push(Post::from_parts(file, path.to_path_buf(), &doc.frontmatter, doc.body));
    }

    sort_newest_first(&mut posts);
    debug!("Scanned {} posts from {}", posts.len(), content_dir.display());
    Ok(posts)
}

/// Stable descending sort on the date string
pub fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Keep posts whose title or body contains `grep`, ignoring case.
pub fn filter_posts(posts: Vec<Post>, grep: Option<&str>) -> Vec<Post> {
    let pattern = match grep {
        Some(g) if !g.is_empty() => g.to_lowercase(),
        _ => return posts,
    };
    posts
        .into_iter()
        .filter(|p| {
            p.title.to_lowercase().contains(&pattern) || p.body.to_lowercase().contains(&pattern)
        })
        .collect()
}

/// First `limit` posts; zero or `None` keeps them all.
pub fn limit_posts(mut posts: Vec<Post>, limit: Option<usize>) -> Vec<Post> {
    if let Some(n) = limit.filter(|n| *n > 0) {
        posts.truncate(n);
    }
    posts
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_scan_missing_dir() {
        let dir = TempDir::new().unwrap();
        assert!(scan_posts(&dir.path().join("nope")).unwrap().is_empty());
    }

    #[test]
    fn test_scan_sorts_newest_first() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "2024-01-10-older.md", "---\ntitle: Older\n---\n\nold body");
        write(dir.path(), "2024-03-20-newer.md", "---\ntitle: Newer\n---\n\nnew body");
        write(dir.path(), "2024-02-15-middle.md", "no front matter here");
        write(dir.path(), "notes.txt", "ignored");
        fs::create_dir(dir.path().join("nested")).unwrap();
        write(&dir.path().join("nested"), "2025-01-01-deep.md", "ignored");

        let posts = scan_posts(dir.path()).unwrap();
        let titles: Vec<_> = posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Newer", "middle", "Older"]);
        assert_eq!(posts[1].body, "no front matter here");
        assert_eq!(posts[0].path, dir.path().join("2024-03-20-newer.md"));
    }

    #[test]
    fn test_scan_date_from_front_matter() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "custom.md", "---\ntitle: Custom\ndate: 2024-05-06T10:00:00+02:00\n---\nbody");
        write(dir.path(), "undated.md", "body only");

        let posts = scan_posts(dir.path()).unwrap();
        assert_eq!(posts[0].date, "unknown");
        assert_eq!(posts[1].date, "2024-05-06");
    }

    #[test]
    fn test_scan_survives_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "2024-01-01-good.md", "---\ntitle: Good\n---\nfine");
        fs::write(dir.path().join("2024-01-02-bad.md"), b"caf\xff\xfe body").unwrap();

        let posts = scan_posts(dir.path()).unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].file, "2024-01-02-bad.md");
        assert_eq!(posts[0].body, "caf\u{FFFD}\u{FFFD} body");
        assert_eq!(posts[1].title, "Good");
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_follows_symlinked_posts() {
        let dir = TempDir::new().unwrap();
        let elsewhere = TempDir::new().unwrap();
        write(elsewhere.path(), "draft.md", "---\ntitle: Linked\n---\nbody");
        std::os::unix::fs::symlink(
            elsewhere.path().join("draft.md"),
            dir.path().join("2024-04-01-linked.md"),
        )
        .unwrap();

        let posts = scan_posts(dir.path()).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Linked");
    }

    #[test]
    fn test_filter_and_limit() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "2024-01-01-a.md", "---\ntitle: Rust notes\n---\nabout ownership");
        write(dir.path(), "2024-01-02-b.md", "---\ntitle: Other\n---\nmentions RUST in body");
        write(dir.path(), "2024-01-03-c.md", "---\ntitle: Unrelated\n---\nnothing");

        let posts = scan_posts(dir.path()).unwrap();
        let filtered = filter_posts(posts.clone(), Some("rust"));
        assert_eq!(filtered.len(), 2);
        assert_eq!(filter_posts(posts.clone(), None).len(), 3);

        assert_eq!(limit_posts(posts.clone(), Some(1)).len(), 1);
        assert_eq!(limit_posts(posts.clone(), Some(0)).len(), 3);
        assert_eq!(limit_posts(posts, None).len(), 3);
    }
}
