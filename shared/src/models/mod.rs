//! Data models
//!
//! - [`floor_plan`]: canonical spatial model consumed by the engine and hosts
//! - [`floor_api`]: collaborator request/response shapes, raw tokens included
//!
//! Raw status/shape tokens only exist in `floor_api`; nothing outside the
//! engine's normalizer turns them into [`TableStatus`] / [`TableShape`].

pub mod floor_api;
pub mod floor_plan;

// Re-exports
pub use floor_api::*;
pub use floor_plan::*;
