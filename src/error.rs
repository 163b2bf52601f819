//! Error types for property service operations.

use lambda_http::http::StatusCode;
use thiserror::Error;

/// Result type alias for the property service.
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Category of a service failure, carrying its fixed client-facing message
/// and HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Query,
    Unmarshal,
    NotFound,
    Invalid,
    Persistence,
}

impl ErrorKind {
    pub fn message(self) -> &'static str {
        match self {
            ErrorKind::Query => "Query API call failed",
            ErrorKind::Unmarshal => "Failed to unmarshal item",
            ErrorKind::NotFound => "Could not find property",
            ErrorKind::Invalid => "Property is not valid",
            ErrorKind::Persistence => "An error occurred while saving",
        }
    }

    pub fn status_code(self) -> StatusCode {
        match self {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Invalid => StatusCode::BAD_REQUEST,
            ErrorKind::Query | ErrorKind::Unmarshal | ErrorKind::Persistence => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Client errors are expected outcomes, not server faults.
    pub fn is_client_error(self) -> bool {
        self.status_code().is_client_error()
    }
}

/// Errors that can occur while serving a property operation.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Query API call failed: {cause:#}")]
    Query { cause: anyhow::Error },

    #[error("Failed to unmarshal item: {0}")]
    Unmarshal(#[from] serde_dynamo::Error),

    #[error("Could not find property '{id}'")]
    NotFound { id: String },

    #[error("Property is not valid: {reason}")]
    Invalid { reason: &'static str },

    #[error("An error occurred while saving: {cause:#}")]
    Persistence { cause: anyhow::Error },
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::Query { .. } => ErrorKind::Query,
            ServiceError::Unmarshal(_) => ErrorKind::Unmarshal,
            ServiceError::NotFound { .. } => ErrorKind::NotFound,
            ServiceError::Invalid { .. } => ErrorKind::Invalid,
            ServiceError::Persistence { .. } => ErrorKind::Persistence,
        }
    }

    pub(crate) fn query(cause: anyhow::Error) -> Self {
        ServiceError::Query { cause }
    }

    pub(crate) fn persistence(cause: anyhow::Error) -> Self {
        ServiceError::Persistence { cause }
    }

    pub(crate) fn invalid(reason: &'static str) -> Self {
        ServiceError::Invalid { reason }
    }
}
