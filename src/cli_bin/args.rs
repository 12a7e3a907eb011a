//! Command-line argument definitions and parsing

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI application
#[derive(Parser, Debug)]
#[command(
    name = "nanopost",
    version,
    about = "Write small thoughts. Commit them to your repo.",
    long_about = "nanopost creates Markdown posts with YAML front matter from inline text, \
                  piped input or interactive prompts, lists and edits existing posts, and \
                  runs post-save plugins such as publishing to GitHub.",
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Inline post text and options when no subcommand is given
    #[command(flatten)]
    pub new: NewArgs,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize .nanopost/ in the current project
    Init(InitArgs),
    /// Create a new post (interactive when no text is given)
    New(NewArgs),
    /// List all posts (newest first)
    List(ListArgs),
    /// Show the most recent post
    Last(LastArgs),
    /// Open an existing post in your editor
    Edit(EditArgs),
    /// Check project setup and report issues
    Doctor,
}

#[derive(Args, Debug, Clone)]
pub struct InitArgs {
    /// Create and enable the GitHub publishing plugin
    #[arg(long)]
    pub github: bool,

    /// Overwrite existing files
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct NewArgs {
    /// Inline post text
    #[arg(value_name = "TEXT")]
    pub text: Vec<String>,

    /// Override the title
    #[arg(long)]
    pub title: Option<String>,

    /// Comma-separated tags
    #[arg(long)]
    pub tags: Option<String>,

    /// Post type from config.json
    #[arg(long = "type", value_name = "TYPE")]
    pub post_type: Option<String>,

    /// Open the editor on the body
    #[arg(long)]
    pub edit: bool,

    /// Print the Markdown instead of writing it
    #[arg(long)]
    pub dry_run: bool,

    /// Do not run plugins after saving
    #[arg(long)]
    pub no_publish: bool,
}

impl NewArgs {
    /// Whether any text or option was given
    pub fn is_set(&self) -> bool {
        !self.text.is_empty()
            || self.title.is_some()
            || self.tags.is_some()
            || self.post_type.is_some()
            || self.edit
            || self.dry_run
            || self.no_publish
    }
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Show only the first N posts
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,

    /// Output as a JSON array
    #[arg(long)]
    pub json: bool,

    /// Filter posts by title or body text
    #[arg(long, value_name = "TEXT")]
    pub grep: Option<String>,

    /// Only list posts of this type
    #[arg(long = "type", value_name = "TYPE")]
    pub post_type: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct LastArgs {
    /// Open the last post in your editor
    #[arg(long, conflicts_with_all = ["path", "json"])]
    pub edit: bool,

    /// Print only the file path
    #[arg(long)]
    pub path: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Only consider posts of this type
    #[arg(long = "type", value_name = "TYPE")]
    pub post_type: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct EditArgs {
    /// Post file, relative to the current directory
    pub file: PathBuf,
}
