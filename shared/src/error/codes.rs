//! Error codes shared with the backend envelope
//!
//! One table drives the enum, its messages and the `u16` conversion, so a
//! code can never be added to one of them and forgotten in another.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! error_codes {
    ($($(#[$doc:meta])* $name:ident = $value:literal => $message:literal,)+) => {
        /// Numeric error code carried in the `code` field of the envelope
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(into = "u16", try_from = "u16")]
        #[repr(u16)]
        pub enum ErrorCode {
            $($(#[$doc])* $name = $value,)+
        }

        impl ErrorCode {
            /// Every defined code, in declaration order
            pub const ALL: &'static [ErrorCode] = &[$(ErrorCode::$name,)+];

            /// Developer-facing English message
            pub const fn message(&self) -> &'static str {
                match self {
                    $(ErrorCode::$name => $message,)+
                }
            }
        }

        impl TryFrom<u16> for ErrorCode {
            type Error = InvalidErrorCode;

            fn try_from(value: u16) -> Result<Self, Self::Error> {
                match value {
                    $($value => Ok(ErrorCode::$name),)+
                    _ => Err(InvalidErrorCode(value)),
                }
            }
        }
    };
}

error_codes! {
    // 0xxx general
    Success = 0 => "Operation completed successfully",
    Unknown = 1 => "An unknown error occurred",
    ValidationFailed = 2 => "Validation failed",
    NotFound = 3 => "Resource not found",
    AlreadyExists = 4 => "Resource already exists",
    InvalidRequest = 5 => "Invalid request",
    /// Body could not be decoded into the expected shape
    InvalidFormat = 6 => "Invalid format",

    // 1xxx auth
    NotAuthenticated = 1001 => "User is not authenticated",
    TokenInvalid = 1004 => "Authentication token is invalid",

    // 2xxx permission
    PermissionDenied = 2001 => "Permission denied",

    // 7xxx tables and floors
    TableNotFound = 7001 => "Table not found",
    FloorNotFound = 7401 => "Floor not found",
    /// Neither the per-floor endpoints nor the flat table list gave a layout
    FloorLayoutUnavailable = 7403 => "Floor layout could not be loaded",

    // 9xxx system
    InternalError = 9001 => "Internal server error",
    NetworkError = 9003 => "Network error",
    TimeoutError = 9004 => "Operation timed out",
    ConfigError = 9005 => "Configuration error",
}

impl ErrorCode {
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// A `u16` with no matching [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
