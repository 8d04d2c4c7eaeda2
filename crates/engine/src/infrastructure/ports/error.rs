//! Error types for port operations.

use std::path::{Path, PathBuf};

/// Document read errors with the offending path for actionable messages.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// Filesystem read failed for a reason other than a missing file.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON document failed to parse.
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// YAML document failed to parse.
    #[error("Invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Document parsed but does not have the expected shape.
    #[error("Malformed document {path}: {reason}")]
    Malformed { path: PathBuf, reason: String },
}

impl DocumentError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn malformed(path: &Path, reason: impl ToString) -> Self {
        Self::Malformed {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// Path of the document that failed.
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. }
            | Self::Json { path, .. }
            | Self::Yaml { path, .. }
            | Self::Malformed { path, .. } => path,
        }
    }
}
