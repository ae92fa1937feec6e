//! Error types for analysis requests

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced to the caller of an analysis request
///
/// Failures on individual files inside a project-wide scan are logged and
/// skipped instead; they never reach this type.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Route not found: {0}")]
    RouteNotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unknown method: {0}")]
    UnknownMethod(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AnalysisError {
    /// Wrap an I/O error with the path it occurred on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for analysis requests
pub type Result<T> = std::result::Result<T, AnalysisError>;
