//! Error types for layout loading
//!
//! Gestures, rendering and selection never fail; only loading does.

use floor_client::ClientError;
use serde::Serialize;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Why one layout source did not produce a usable layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFailure {
    pub source: &'static str,
    pub reason: String,
}

#[derive(Debug, Error)]
pub enum LoadError {
    /// A collaborator call failed
    #[error("Collaborator call failed: {0}")]
    Client(#[from] ClientError),

    /// Floor listing returned no active floor
    #[error("No active floors")]
    NoActiveFloors,

    /// Flat table list returned no active table
    #[error("No active tables")]
    NoActiveTables,

    /// Every source failed or came back empty
    #[error("No usable floor layout after {} source(s)", attempts.len())]
    Exhausted { attempts: Vec<SourceFailure> },
}

/// Result type for loading operations
pub type LoadResult<T> = Result<T, LoadError>;

impl From<LoadError> for AppError {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::Client(e) => AppError::with_message(e.code(), e.to_string()),
            LoadError::NoActiveFloors => AppError::new(ErrorCode::FloorNotFound),
            LoadError::NoActiveTables => AppError::new(ErrorCode::TableNotFound),
            LoadError::Exhausted { attempts } => {
                let mut app = AppError::new(ErrorCode::FloorLayoutUnavailable);
                for attempt in attempts {
                    app = app.with_detail(attempt.source, attempt.reason);
                }
                app
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhausted_to_app_error() {
        let err = LoadError::Exhausted {
            attempts: vec![
                SourceFailure {
                    source: "floor_layout",
                    reason: "No active floors".into(),
                },
                SourceFailure {
                    source: "table_list",
                    reason: "HTTP error".into(),
                },
            ],
        };
        assert_eq!(err.to_string(), "No usable floor layout after 2 source(s)");

        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::FloorLayoutUnavailable);
        let details = app.details.unwrap();
        assert_eq!(details.get("floor_layout").unwrap(), "No active floors");
        assert_eq!(details.get("table_list").unwrap(), "HTTP error");
    }

    #[test]
    fn test_client_error_keeps_code() {
        let err = LoadError::from(ClientError::Unauthorized);
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::NotAuthenticated);
    }
}
