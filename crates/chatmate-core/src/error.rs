//! Error types for chatmate-core

use crate::engine::{Operation, OperationReport};

/// Result type for chatmate-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in chatmate-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Filesystem or validation error from chatmate-fs
    #[error(transparent)]
    Fs(#[from] chatmate_fs::Error),

    #[error("Artifact not found: {filename}")]
    ArtifactNotFound { filename: String },

    /// Artifact bytes do not satisfy the minimal content contract
    #[error("Invalid content in {filename}: {reason}")]
    InvalidContent { filename: String, reason: String },

    /// Bulk install found nothing to install
    #[error("No artifacts available from {origin}")]
    NoArtifactsAvailable { origin: String },

    #[error("Could not determine the home directory")]
    HomeDirNotFound,

    /// A fatal per-item failure stopped a bulk operation part way.
    ///
    /// `report` holds every transition applied before the failure; nothing
    /// is rolled back.
    #[error("{operation} aborted at {filename}: {source}")]
    BatchAborted {
        operation: Operation,
        filename: String,
        report: Box<OperationReport>,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Whether this error must stop the whole batch rather than be recorded
    /// against a single artifact.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::Fs(e) => e.is_io() || e.is_security(),
            Self::BatchAborted { .. } | Self::HomeDirNotFound => true,
            Self::ArtifactNotFound { .. }
            | Self::InvalidContent { .. }
            | Self::NoArtifactsAvailable { .. } => false,
        }
    }
}
