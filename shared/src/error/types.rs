//! Error types and API response structures

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

}

/// Unified API response structure
///
/// Every collaborator endpoint answers with this envelope:
/// - `code`: Error code (0 for success)
/// - `message`: Human-readable message
/// - `data`: Response payload (on success)
/// - `details`: Additional error details (on failure)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Error code (0 for success, non-zero for errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    /// Human-readable message
    #[serde(default)]
    pub message: String,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Additional error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl<T> ApiResponse<T> {
    /// Create a success response with data
    pub fn success(data: T) -> Self {
        Self {
            code: Some(0),
            message: "OK".to_string(),
            data: Some(data),
            details: None,
        }
    }

    /// A missing code is treated as success
    pub fn is_success(&self) -> bool {
        matches!(self.code, None | Some(0))
    }

    /// Split the envelope into its payload or the error it carries
    ///
    /// Unknown numeric codes collapse into [`ErrorCode::Unknown`] while the
    /// backend's message is preserved.
    pub fn into_result(self) -> AppResult<Option<T>> {
        if self.is_success() {
            return Ok(self.data);
        }
        let raw = self.code.unwrap_or(1);
        let code = ErrorCode::try_from(raw).unwrap_or(ErrorCode::Unknown);
        let message = if self.message.is_empty() {
            code.message().to_string()
        } else {
            self.message
        };
        let mut err = AppError::with_message(code, message);
        err.details = self.details;
        if code == ErrorCode::Unknown && raw != 1 {
            err = err.with_detail("raw_code", raw);
        }
        Err(err)
    }
}

impl ApiResponse<()> {
    /// Create a success response without data
    pub fn ok() -> Self {
        Self {
            code: Some(0),
            message: "OK".to_string(),
            data: None,
            details: None,
        }
    }

    /// Create an error response from an AppError
    pub fn error(err: &AppError) -> Self {
        Self {
            code: Some(err.code.code()),
            message: err.message.clone(),
            data: None,
            details: err.details.clone(),
        }
    }
}

impl<T> From<AppError> for ApiResponse<T> {
    fn from(err: AppError) -> Self {
        Self {
            code: Some(err.code.code()),
            message: err.message,
            data: None,
            details: err.details,
        }
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::FloorNotFound);
        assert_eq!(err.code, ErrorCode::FloorNotFound);
        assert_eq!(err.message, "Floor not found");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::with_message(ErrorCode::ValidationFailed, "Invalid table size")
            .with_detail("field", "width")
            .with_detail("reason", "must be positive");

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        let details = err.details.unwrap();
        assert_eq!(details.get("field").unwrap(), "width");
        assert_eq!(details.get("reason").unwrap(), "must be positive");
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::with_message(ErrorCode::NotFound, "Table T1 not found");
        assert_eq!(format!("{}", err), "Table T1 not found");
    }

    #[test]
    fn test_api_response_success_into_result() {
        let response = ApiResponse::success(42);
        assert!(response.is_success());
        assert_eq!(response.into_result().unwrap(), Some(42));
    }

    #[test]
    fn test_api_response_error_into_result() {
        let json = r#"{"code":7401,"message":"Floor 3 missing","details":{"floor_id":"3"}}"#;
        let response: ApiResponse<i32> = serde_json::from_str(json).unwrap();
        let err = response.into_result().unwrap_err();
        assert_eq!(err.code, ErrorCode::FloorNotFound);
        assert_eq!(err.message, "Floor 3 missing");
        assert_eq!(err.details.unwrap().get("floor_id").unwrap(), "3");
    }

    #[test]
    fn test_api_response_unknown_code_keeps_raw() {
        let json = r#"{"code":4321,"message":""}"#;
        let response: ApiResponse<i32> = serde_json::from_str(json).unwrap();
        let err = response.into_result().unwrap_err();
        assert_eq!(err.code, ErrorCode::Unknown);
        assert_eq!(err.message, "An unknown error occurred");
        assert_eq!(err.details.unwrap().get("raw_code").unwrap(), 4321);
    }

    #[test]
    fn test_api_response_missing_code_is_success() {
        let json = r#"{"data":[1,2,3]}"#;
        let response: ApiResponse<Vec<i32>> = serde_json::from_str(json).unwrap();
        assert!(response.is_success());
        assert_eq!(response.into_result().unwrap(), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_api_response_from_error() {
        let err = AppError::new(ErrorCode::InternalError);
        let response: ApiResponse<String> = err.into();
        assert_eq!(response.code, Some(9001));
        assert!(response.data.is_none());
    }

    #[test]
    fn test_api_response_serialize() {
        let response = ApiResponse::success("hello");
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"code\":0"));
        assert!(json.contains("\"data\":\"hello\""));
    }
}
