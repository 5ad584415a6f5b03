//! Shared types for the floor plan workspace
//!
//! Common types used across the client and engine crates: the canonical
//! floor plan model, the collaborator wire shapes, error codes and the
//! response envelope.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use models::{
    Floor, FloorLayout, FloorTable, Position, Size, TableKey, TableShape, TableStatus,
};
