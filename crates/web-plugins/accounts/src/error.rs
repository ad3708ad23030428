use axum::http::StatusCode;
use thiserror::Error;

/// Request-level failures of account operations.
///
/// None of these abort the process: each one is rendered as a failure
/// envelope for the request that raised it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccountError {
    #[error("{0} doesn't exist or is null")]
    MissingField(String),

    #[error("account id `{0}` is not an integer")]
    NotInteger(String),

    #[error("account id `{0}` is a negative integer")]
    NegativeInteger(String),

    #[error("account {0} already exists")]
    AlreadyExists(String),

    #[error("account {0} doesn't exist")]
    NotFound(String),

    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    #[error("no route for {0}")]
    RouteNotFound(String),

    #[error("method not allowed for {0}")]
    MethodNotAllowed(String),
}

impl AccountError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AccountError::MissingField(_)
            | AccountError::NotInteger(_)
            | AccountError::NegativeInteger(_)
            | AccountError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            AccountError::AlreadyExists(_) => StatusCode::CONFLICT,
            AccountError::NotFound(_) | AccountError::RouteNotFound(_) => StatusCode::NOT_FOUND,
            AccountError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}
