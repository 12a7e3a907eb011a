pub mod editor;
pub mod fs;
pub mod paths;
pub mod scanner;

pub use editor::{edit_existing_file, edit_text, resolve_editor};
pub use fs::{is_markdown, read_to_string, write_file};
pub use paths::{find_nanopost_dir, find_project_root, ProjectPaths, NANOPOST_DIR};
pub use scanner::{filter_posts, limit_posts, scan_posts};
