//! Client error types

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The response envelope carried a non-success code
    #[error("API error {}: {}", .0.code, .0.message)]
    Api(#[from] AppError),

    /// Invalid client configuration
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl ClientError {
    /// Error code equivalent, for hosts that surface [`AppError`]s
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Http(e) if e.is_timeout() => ErrorCode::TimeoutError,
            Self::Http(_) => ErrorCode::NetworkError,
            Self::InvalidResponse(_) | Self::Serialization(_) => ErrorCode::InvalidFormat,
            Self::Unauthorized => ErrorCode::NotAuthenticated,
            Self::Forbidden(_) => ErrorCode::PermissionDenied,
            Self::NotFound(_) => ErrorCode::NotFound,
            Self::Validation(_) => ErrorCode::ValidationFailed,
            Self::Internal(_) => ErrorCode::InternalError,
            Self::Api(e) => e.code,
            Self::InvalidConfig(_) => ErrorCode::ConfigError,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_and_code() {
        let err = ClientError::from(AppError::new(ErrorCode::FloorNotFound));
        assert_eq!(err.code(), ErrorCode::FloorNotFound);
        assert_eq!(err.to_string(), "API error 7401: Floor not found");
    }

    #[test]
    fn test_plain_variants_map_to_codes() {
        assert_eq!(ClientError::Unauthorized.code(), ErrorCode::NotAuthenticated);
        assert_eq!(
            ClientError::NotFound("x".into()).code(),
            ErrorCode::NotFound
        );
        assert_eq!(
            ClientError::InvalidConfig("bad".into()).code(),
            ErrorCode::ConfigError
        );
    }
}
