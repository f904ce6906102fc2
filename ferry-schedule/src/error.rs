//! Crate-level error type.
//!
//! Module errors are precise and typed; this enum only aggregates them for
//! the edges of the system (file I/O, rendering, the CLI).

use std::path::{Path, PathBuf};

use crate::domain::{NotFoundError, ValidationError};
use crate::ingest::DraftError;

/// Errors from loading, querying, rendering or publishing schedules.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The schedule document is malformed
    #[error("invalid schedule: {0}")]
    Validation(#[from] ValidationError),

    /// A query named an unknown service
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// Ingested rows did not form a valid period
    #[error("invalid period: {0}")]
    Draft(#[from] DraftError),

    /// Reading or writing a file failed
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The HTTP server could not start or stopped unexpectedly
    #[error("server error: {0}")]
    Server(#[source] std::io::Error),

    /// Serializing the canonical document failed
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Serializing a day view failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading an extracted table failed
    #[error("table error: {0}")]
    Table(#[from] csv::Error),

    /// Rendering a page failed
    #[error("template error: {0}")]
    Template(#[from] askama::Error),
}

impl Error {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Error::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
