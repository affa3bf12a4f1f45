use std::path::PathBuf;
use thiserror::Error;

/// Classmap error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config validation error: {0}")]
    ConfigValidation(String),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Scan error in {path}: {message}")]
    Scan { path: PathBuf, message: String },

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Descriptor error: {0}")]
    Descriptor(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Glob pattern error: {0}")]
    GlobPattern(#[from] glob::PatternError),

    #[error("Directory walk error: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for classmap operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a config validation error
    pub fn config_validation(msg: impl Into<String>) -> Self {
        Error::ConfigValidation(msg.into())
    }

    /// Create a scan error
    pub fn scan(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::Scan {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a descriptor error
    pub fn descriptor(msg: impl Into<String>) -> Self {
        Error::Descriptor(msg.into())
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }
}
