use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Augur
#[derive(Debug, Error)]
pub enum AugurError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Tool execution errors
    #[error("Tool execution error: {0}")]
    Tool(#[from] ToolError),

    /// Language detection errors
    #[error("Detection error: {0}")]
    Detection(#[from] DetectionError),

    /// Persisted store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Malformed query parameters
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Configuration related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Error loading configuration file
    #[error("Failed to load config from {path}: {message}")]
    LoadError { path: PathBuf, message: String },

    /// Error parsing configuration
    #[error("Failed to parse config {path}: {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Exclude pattern is not a valid glob
    #[error("Invalid exclude pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },
}

/// External tool execution errors
#[derive(Debug, Error)]
pub enum ToolError {
    /// Tool not found on PATH
    #[error("Tool '{0}' not found")]
    NotFound(String),

    /// Tool could not be started or awaited
    #[error("Failed to execute tool '{name}': {message}")]
    ExecutionFailed { name: String, message: String },

    /// Tool exceeded its time budget
    #[error("Tool '{name}' timed out after {seconds}s")]
    Timeout { name: String, seconds: u64 },
}

/// Language detection errors
#[derive(Debug, Error)]
pub enum DetectionError {
    /// Scenario root missing or not a directory
    #[error("The path '{0}' is not a valid directory")]
    InvalidDirectory(PathBuf),

    /// Walk failed at a source root
    #[error("Failed to walk {path}: {message}")]
    WalkFailed { path: PathBuf, message: String },
}

/// Persisted store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backing file could not be read or written
    #[error("Store I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Backing file holds malformed data
    #[error("Store data at {path} is malformed: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Issue id does not exist
    #[error("Issue {0} not found")]
    IssueNotFound(u64),

    /// Internal lock was poisoned by a panicking writer
    #[error("Store lock poisoned")]
    Poisoned,
}
