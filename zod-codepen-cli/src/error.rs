//! Error types for the CLI.
//!
//! Each stage (snapshot loading, configuration, filtering, writing) has its
//! own error enum; [`CliError`] wraps them for the command layer.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Main error type for CLI operations.
#[derive(Debug, Error)]
pub enum CliError {
    /// Error reading or decoding a schema snapshot.
    #[error("Failed to load snapshot: {0}")]
    Snapshot(#[from] SnapshotError),

    /// Error loading configuration.
    #[error("Failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    /// Invalid export filter.
    #[error("Invalid filter: {0}")]
    Filter(#[from] FilterError),

    /// Error writing output files.
    #[error("Failed to write output: {0}")]
    Write(#[from] WriteError),

    /// A file the command would create already exists.
    #[error("File already exists: {}", .path.display())]
    AlreadyExists { path: PathBuf },

    /// The generated module on disk is out of date.
    #[error("Check failed: {0}")]
    Check(String),

    /// Generic IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error reading or decoding a schema snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Snapshot file does not exist.
    #[error("Snapshot not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// IO error reading the snapshot.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The top level is not an object of named exports.
    #[error("Snapshot root must be an object mapping export names to schemas")]
    NotAnObject,

    /// A tagged value (`$bigint`, `$date`, ...) has an invalid payload.
    #[error("Invalid '{tag}' value: {message}")]
    InvalidTag { tag: String, message: String },
}

/// Error loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Explicitly requested config file not found.
    #[error("Configuration file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// Invalid TOML syntax or value.
    #[error("Invalid TOML in {}: {message}", .path.display())]
    InvalidToml { path: PathBuf, message: String },

    /// IO error reading config.
    #[error("Failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Invalid export filter.
#[derive(Debug, Error)]
pub enum FilterError {
    /// A glob pattern failed to compile.
    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

/// Error writing output files.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Failed to create directory.
    #[error("Failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write file.
    #[error("Failed to write file {}: {source}", .path.display())]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SnapshotError {
    /// Create an invalid tag error.
    pub fn invalid_tag(tag: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidTag {
            tag: tag.into(),
            message: message.into(),
        }
    }
}

impl ConfigError {
    /// Create an invalid TOML error.
    pub fn invalid_toml(path: PathBuf, message: impl Into<String>) -> Self {
        Self::InvalidToml {
            path,
            message: message.into(),
        }
    }
}

impl FilterError {
    /// Create an invalid pattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }
}

impl CliError {
    /// Process exit code for this error.
    ///
    /// An out-of-date check exits with 2 so scripts can tell it apart from
    /// operational failures.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Check(_) => 2,
            _ => 1,
        }
    }
}
