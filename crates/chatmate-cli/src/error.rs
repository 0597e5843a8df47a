//! Error types for chatmate-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from chatmate-core
    #[error(transparent)]
    Core(#[from] chatmate_core::Error),

    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),

    /// Some artifacts failed; the rest of the operation completed
    #[error("{count} artifact(s) failed")]
    ItemsFailed { count: usize },

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_pass_through_unchanged() {
        let core = chatmate_core::Error::HomeDirNotFound;
        let expected = core.to_string();

        let err = CliError::from(core);

        assert!(matches!(err, CliError::Core(_)));
        assert_eq!(err.to_string(), expected);
    }
}
