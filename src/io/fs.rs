use crate::error::{NanopostError, Result};
use log::warn;
use std::fs;
use std::path::Path;

pub fn is_markdown(path: &Path) -> bool {
    path.extension().map(|s| s == "md").unwrap_or(false)
}

/// Read `path` as text; invalid UTF-8 sequences become U+FFFD.
pub fn read_to_string(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(NanopostError::file_not_found(path));
    }
    match String::from_utf8(fs::read(path)?) {
        Ok(text) => Ok(text),
        Err(e) => {
            warn!("{} is not valid UTF-8, decoding lossily", path.display());
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
    }
}

/// Write `content` to `path`, creating missing parent directories.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

/// Mark a file executable by its owner, group and others.
#[cfg(unix)]
pub fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms)?;
    Ok(())
}

#[cfg(not(unix))]
pub fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}

/// Whether `path` is a file this process may execute.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
pub fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_invalid_utf8_lossily() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.md");
        fs::write(&path, b"ok \xff").unwrap();
        assert_eq!(read_to_string(&path).unwrap(), "ok \u{FFFD}");
    }

    #[test]
    fn test_is_markdown() {
        assert!(is_markdown(Path::new("post.md")));
        assert!(!is_markdown(Path::new("post.txt")));
        assert!(!is_markdown(Path::new("md")));
    }

    #[test]
    fn test_write_file_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a/b/post.md");
        write_file(&path, "hello").unwrap();
        assert_eq!(read_to_string(&path).unwrap(), "hello");
    }

    #[test]
    fn test_read_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = read_to_string(&dir.path().join("nope.md")).unwrap_err();
        assert!(matches!(err, NanopostError::FileNotFound { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_make_executable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("script");
        write_file(&path, "#!/bin/sh\n").unwrap();
        assert!(!is_executable(&path));
        make_executable(&path).unwrap();
        assert!(is_executable(&path));
    }
}
