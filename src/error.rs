//! Error types for the nanopost library
//!
//! This module provides the error taxonomy for every library operation:
//! configuration loading, front matter parsing, project discovery, editor
//! invocation and plugin execution.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for all library operations
#[derive(Error, Debug)]
pub enum NanopostError {
    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing or serialization errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// config.json exists but is not valid JSON
    #[error("config.json is not valid JSON: {message}")]
    ConfigParse { message: String },

    /// config.json parses but has the wrong shape
    #[error("Invalid config: {message}")]
    ConfigValidation { message: String },

    /// Requested post type is not configured
    #[error("Post type \"{name}\" not found in configuration")]
    UnknownPostType { name: String },

    /// Plugin could not be resolved or failed while loading
    #[error("Plugin \"{name}\" failed to load: {reason}")]
    PluginLoad { name: String, reason: String },

    /// Plugin post-save hook failed
    #[error("Plugin \"{name}\" error: {reason}")]
    PluginRuntime { name: String, reason: String },

    /// No .nanopost directory found above the working directory
    #[error("No .nanopost directory found from {}. Run `nanopost init` in your project root.", start.display())]
    MissingProject { start: PathBuf },

    /// No editor configured and none in the environment
    #[error("No editor configured. Set editor in config.json or $EDITOR.")]
    MissingEditor,

    /// Editor process could not be started or exited unsuccessfully
    #[error("Editor `{command}` failed: {reason}")]
    EditorFailed { command: String, reason: String },

    /// File not found or invalid path
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Front matter block that is delimited but not valid YAML
    #[error("Invalid front matter in {}: {reason}", path.display())]
    InvalidFrontMatter { path: PathBuf, reason: String },

    /// Nothing to write for a non-interactive post
    #[error("Nothing to post: provide text, pipe stdin, or pass --title")]
    EmptyPost,

    /// Interactive prompt was aborted or failed
    #[error("Prompt error: {reason}")]
    Prompt { reason: String },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, NanopostError>;

impl NanopostError {
    /// Create a new config parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
        }
    }

    /// Create a new config validation error
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Create a new unknown post type error
    pub fn unknown_post_type(name: impl Into<String>) -> Self {
        Self::UnknownPostType { name: name.into() }
    }

    /// Create a new plugin load error
    pub fn plugin_load(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::PluginLoad {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a new plugin runtime error
    pub fn plugin_runtime(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::PluginRuntime {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a new missing project error
    pub fn missing_project(start: impl Into<PathBuf>) -> Self {
        Self::MissingProject {
            start: start.into(),
        }
    }

    /// Create a new editor failure error
    pub fn editor_failed(command: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::EditorFailed {
            command: command.into(),
            reason: reason.into(),
        }
    }

    /// Create a new file not found error
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a new invalid front matter error
    pub fn invalid_front_matter(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidFrontMatter {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a new prompt error
    pub fn prompt(reason: impl Into<String>) -> Self {
        Self::Prompt {
            reason: reason.into(),
        }
    }

    /// Whether this error aborts the current command.
    ///
    /// Plugin failures are isolated per plugin and never escalate.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::PluginLoad { .. } | Self::PluginRuntime { .. })
    }

    /// Get the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::MissingProject { .. }
            | Self::ConfigParse { .. }
            | Self::ConfigValidation { .. } => ErrorSeverity::Critical,
            Self::UnknownPostType { .. }
            | Self::MissingEditor
            | Self::FileNotFound { .. }
            | Self::InvalidFrontMatter { .. } => ErrorSeverity::High,
            Self::PluginLoad { .. } | Self::PluginRuntime { .. } => ErrorSeverity::Low,
            _ => ErrorSeverity::Medium,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}
