//! Error types for directory change tracking.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while scanning, building, persisting or comparing trees.
#[derive(Debug, Error)]
pub enum TrackError {
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid snapshot record in {path:?}: {source}")]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Malformed snapshot {path:?}: {reason}")]
    MalformedSnapshot { path: PathBuf, reason: String },

    #[error(
        "Structural mismatch: snapshot lists {old_files} files, current state lists {new_files} \
         and the file sets differ. Run `dirtrack forget` and track the directory again."
    )]
    StructuralMismatch { old_files: usize, new_files: usize },

    #[error("Unpaired node at tree level {level}: {width} nodes cannot be paired")]
    UnpairedLevel { level: usize, width: usize },

    #[error("Scan cancelled")]
    Cancelled,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl TrackError {
    /// Build an I/O error tagged with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TrackError::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the snapshot and the current directory state have different shapes.
    ///
    /// Callers typically recover by forgetting the snapshot and tracking again.
    pub fn is_structural_mismatch(&self) -> bool {
        matches!(self, TrackError::StructuralMismatch { .. })
    }
}

impl From<config::ConfigError> for TrackError {
    fn from(err: config::ConfigError) -> Self {
        TrackError::Config(err.to_string())
    }
}
