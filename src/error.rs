use std::path::PathBuf;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum DiraiError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },
    #[error("Invalid redaction pattern '{pattern}': {source}")]
    Redaction {
        pattern: String,
        source: regex::Error,
    },
    #[error("Error loading config {path}: {message}")]
    Config { path: PathBuf, message: String },
}
impl DiraiError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DiraiError::Io {
            path: path.into(),
            source,
        }
    }
    pub(crate) fn pattern(pattern: &str, err: impl std::fmt::Display) -> Self {
        DiraiError::Pattern {
            pattern: pattern.to_string(),
            message: err.to_string(),
        }
    }
}
