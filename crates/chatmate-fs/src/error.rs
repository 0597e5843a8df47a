//! Error types for chatmate-fs

use std::path::PathBuf;

use crate::validation::ValidationError;

/// Result type for chatmate-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in chatmate-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A filename, path or content check rejected the input
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The resolved path escapes the directory it must stay inside
    #[error("Security violation: {path} escapes {base}")]
    SecurityViolation { path: PathBuf, base: PathBuf },

    #[error("File not found: {path}")]
    NotFound { path: PathBuf },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },

    #[error("Refusing to write through symlink at {path}")]
    SymlinkInPath { path: PathBuf },

    #[error("Failed to parse {format} config at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported config format: {extension}")]
    UnsupportedFormat { extension: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Map an I/O error to [`Error::NotFound`] when the file is missing.
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Io { path, source }
        }
    }

    /// True for failures caused by the filesystem itself (disk, permissions,
    /// locking) rather than by the input.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::LockFailed { .. })
    }

    /// True for confinement and symlink refusals.
    pub fn is_security(&self) -> bool {
        matches!(
            self,
            Self::SecurityViolation { .. } | Self::SymlinkInPath { .. }
        )
    }
}
