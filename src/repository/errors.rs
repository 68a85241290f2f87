use reqwest::StatusCode;
use thiserror::Error;

/// Failures talking to the remote catalog API.
///
/// `Clone` because cached loads hand the same error to every waiting caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Entity not found")]
    NotFound,

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Upstream error: status {status}: {message}")]
    UpstreamStatus { status: u16, message: String },

    #[error("Decode error: {0}")]
    DecodeError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return match status {
                StatusCode::NOT_FOUND => RepositoryError::NotFound,
                status => RepositoryError::UpstreamStatus {
                    status: status.as_u16(),
                    message: err.to_string(),
                },
            };
        }

        if err.is_decode() {
            RepositoryError::DecodeError(err.to_string())
        } else if err.is_connect() || err.is_timeout() || err.is_request() {
            RepositoryError::ConnectionError(err.to_string())
        } else if err.is_builder() {
            RepositoryError::ValidationError(format!("Request builder error: {err}"))
        } else {
            RepositoryError::Unexpected(format!("Unexpected HTTP client error: {err}"))
        }
    }
}
