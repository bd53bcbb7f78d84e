use stratus_saga::{BoxError, CompensationError, SagaError};
use thiserror::Error;

/// Error from one backend store.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

/// Error from a catalog operation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("invalid catalog name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("catalog operation failed at handler '{handler}'")]
    Saga {
        handler: String,
        #[source]
        source: BoxError,
    },

    #[error(
        "catalog operation failed at handler '{handler}' and {} compensation(s) also failed",
        compensation_failures.len()
    )]
    SagaCompensation {
        handler: String,
        source: BoxError,
        compensation_failures: Vec<CompensationError>,
    },
}

impl From<SagaError> for CatalogError {
    fn from(err: SagaError) -> Self {
        match err {
            SagaError::HandlerFailed { handler, source } => Self::Saga { handler, source },
            SagaError::CompensationFailed {
                failed_handler,
                handler_error,
                compensation_errors,
            } => Self::SagaCompensation {
                handler: failed_handler,
                source: handler_error,
                compensation_failures: compensation_errors,
            },
            _ => Self::Saga {
                handler: "unknown".to_string(),
                source: "unrecognized saga failure".into(),
            },
        }
    }
}
