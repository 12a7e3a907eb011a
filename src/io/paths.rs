//! Project discovery by upward directory search

use crate::error::{NanopostError, Result};
use std::path::{Path, PathBuf};

/// Name of the per-project configuration directory
pub const NANOPOST_DIR: &str = ".nanopost";

/// Nearest `.nanopost` directory at or above `start`.
pub fn find_nanopost_dir(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(NANOPOST_DIR))
        .find(|candidate| candidate.is_dir())
}

/// Nearest directory at or above `start` holding `.nanopost` or `.git`.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(NANOPOST_DIR).exists() || dir.join(".git").exists())
        .map(Path::to_path_buf)
}

/// Locations every project command works against
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectPaths {
    pub nanopost_dir: PathBuf,
    pub project_root: PathBuf,
}

impl ProjectPaths {
    /// Discover the project from `cwd`, failing with `MissingProject`.
    pub fn discover(cwd: &Path) -> Result<Self> {
        let nanopost_dir =
            find_nanopost_dir(cwd).ok_or_else(|| NanopostError::missing_project(cwd))?;
        let project_root = find_project_root(cwd)
            .or_else(|| nanopost_dir.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| cwd.to_path_buf());
        Ok(Self {
            nanopost_dir,
            project_root,
        })
    }

    /// Resolve a configured directory against the project root
    pub fn resolve(&self, relative: &str) -> PathBuf {
        self.project_root.join(relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_nanopost_dir_walks_up() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(NANOPOST_DIR)).unwrap();
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_nanopost_dir(&nested), Some(dir.path().join(NANOPOST_DIR)));
    }

    #[test]
    fn test_find_nanopost_dir_ignores_plain_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(NANOPOST_DIR), "").unwrap();
        assert_eq!(find_nanopost_dir(dir.path()), None);
    }

    #[test]
    fn test_find_project_root_prefers_nearest_marker() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(NANOPOST_DIR)).unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir_all(sub.join(".git")).unwrap();

        assert_eq!(find_project_root(&sub), Some(sub.clone()));
        assert_eq!(find_project_root(dir.path()), Some(dir.path().to_path_buf()));
    }

    #[test]
    fn test_discover_missing_project() {
        let dir = TempDir::new().unwrap();
        let err = ProjectPaths::discover(dir.path()).unwrap_err();
        assert!(matches!(err, NanopostError::MissingProject { .. }));
        assert!(err.to_string().contains("nanopost init"));
    }

    #[test]
    fn test_discover_from_subdirectory() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(NANOPOST_DIR)).unwrap();
        let nested = dir.path().join("content");
        fs::create_dir_all(&nested).unwrap();

        let paths = ProjectPaths::discover(&nested).unwrap();
        assert_eq!(paths.nanopost_dir, dir.path().join(NANOPOST_DIR));
        assert_eq!(paths.project_root, dir.path().to_path_buf());
        assert_eq!(paths.resolve("content/posts"), dir.path().join("content/posts"));
    }
}
