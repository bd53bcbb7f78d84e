use thiserror::Error;

/// Error type flowing out of command delegates, untouched by the layers
/// above until the processor wraps it for the caller.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result of executing or undoing a command or handler.
pub type CommandResult = Result<(), BoxError>;

/// A compensation (undo) that failed during rollback.
#[derive(Debug, Error)]
#[error("compensation failed for handler '{handler}'")]
pub struct CompensationError {
    /// Name of the handler whose undo failed.
    pub handler: String,
    /// The underlying error.
    #[source]
    pub source: BoxError,
}

/// Error from processing a saga.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SagaError {
    /// A handler failed and every compensation succeeded.
    #[error("handler '{handler}' failed")]
    HandlerFailed {
        /// Name of the handler that failed.
        handler: String,
        /// The error that caused the handler to fail.
        #[source]
        source: BoxError,
    },

    /// A handler failed and some compensations also failed.
    #[error("handler '{failed_handler}' failed, and {} compensation(s) also failed", compensation_errors.len())]
    CompensationFailed {
        /// Name of the handler that originally failed.
        failed_handler: String,
        /// The error from the failed handler.
        handler_error: BoxError,
        /// Errors from failed compensations.
        compensation_errors: Vec<CompensationError>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handler_failed_message_names_the_handler() {
        let err = SagaError::HandlerFailed {
            handler: "relational".to_string(),
            source: "row conflict".into(),
        };

        assert!(err.to_string().contains("relational"));
    }

    #[test]
    fn compensation_failed_message_counts_failures() {
        let err = SagaError::CompensationFailed {
            failed_handler: "document".to_string(),
            handler_error: "upsert rejected".into(),
            compensation_errors: vec![
                CompensationError {
                    handler: "filesystem".to_string(),
                    source: "permission denied".into(),
                },
                CompensationError {
                    handler: "relational".to_string(),
                    source: "row locked".into(),
                },
            ],
        };

        assert!(err.to_string().contains("2 compensation(s)"));
    }

    #[test]
    fn handler_failed_preserves_source_chain() {
        let err = SagaError::HandlerFailed {
            handler: "relational".to_string(),
            source: "row conflict".into(),
        };

        let source = std::error::Error::source(&err).expect("source should be set");
        assert_eq!(source.to_string(), "row conflict");
    }
}
