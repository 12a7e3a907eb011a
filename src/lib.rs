//! nanopost: write small thoughts as Markdown posts and commit them to your repo
//!
//! This library holds everything behind the `nanopost` command-line tool:
//! project configuration, front matter parsing and serialization, filename
//! generation, post scanning, editor integration and post-save plugins.
//!
//! # Features
//!
//! - **Typed configuration** loaded from `.nanopost/config.json`, validated with
//!   field-level error messages and merged over built-in defaults
//! - **Multiple post types**, each with its own content directory, date format,
//!   filename template and front matter defaults
//! - **Schema-driven front matter** coercion for booleans, numbers, arrays and dates
//! - **Post-save plugins** resolved from local scripts, built-ins or `PATH`
//!
//! # Quick Start
//!
//! ## Parsing and Writing Posts
//!
//! ```rust
//! use nanopost::{parse_frontmatter, to_markdown, Result};
//!
//! fn main() -> Result<()> {
//!     let doc = parse_frontmatter("---\ntitle: Hello\n---\n\nFirst post.")?;
//!     assert_eq!(doc.body, "First post.");
//!
//!     let text = to_markdown(&doc.frontmatter, &doc.body, None)?;
//!     assert_eq!(text, "---\ntitle: Hello\n---\n\nFirst post.\n");
//!     Ok(())
//! }
//! ```
//!
//! ## Resolving a Post Type
//!
//! ```rust,no_run
//! use nanopost::{read_config, resolve_post_type_config, Result};
//! use std::path::Path;
//!
//! fn main() -> Result<()> {
//!     let config = read_config(Path::new(".nanopost"))?;
//!     let blog = resolve_post_type_config(&config, &config.default_type)?;
//!     println!("{} posts go to {}", blog.name, blog.content_dir);
//!     Ok(())
//! }
//! ```
//!
//! ## Listing Posts
//!
//! ```rust,no_run
//! use nanopost::commands::{run_list, ListOptions};
//! use nanopost::Result;
//!
//! fn main() -> Result<()> {
//!     let cwd = std::env::current_dir()?;
//!     let opts = ListOptions { limit: Some(5), ..Default::default() };
//!     let posts = run_list(&cwd, &opts, &mut std::io::stdout())?;
//!     println!("{} posts", posts.len());
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`core`]: front matter codec, value coercion, slugs, dates and post records
//! - [`config`]: configuration loading, validation and per-type resolution
//! - [`io`]: project discovery, the post scanner, file helpers and the editor
//! - [`plugins`]: the [`Plugin`](plugins::Plugin) trait and the plugin host
//! - [`commands`]: the `init`, `new`, `list`, `last`, `edit` and `doctor` commands
//! - [`error`]: the error type shared by all of the above

// Public API exports
pub use error::{ErrorSeverity, NanopostError, Result};

// Core types
pub use crate::core::{
    format_date, format_date_yyyymmdd, format_filename, normalize_frontmatter, parse_frontmatter,
    slugify, to_markdown, FieldType, Frontmatter, FrontmatterSchema, ParsedDocument, Post,
};

// Configuration
pub use config::{
    read_config, resolve_post_type_config, validate_config, write_config, Config, PluginConfig,
    PostTypeConfig, ResolvedPostType,
};

// IO and plugins
pub use io::{filter_posts, limit_posts, scan_posts, ProjectPaths};
pub use plugins::{LoadedPlugin, Plugin, PluginHost, PluginRunResult, PostSavedContext};

pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod plugins;
