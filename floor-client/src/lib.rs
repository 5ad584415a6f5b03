//! Floor Client - collaborator calls for the floor plan engine
//!
//! [`FloorApi`] is the seam the engine's normalizer consumes; [`HttpClient`]
//! implements it against the backend REST API.

pub mod api;
pub mod config;
pub mod error;
pub mod http;

pub use api::FloorApi;
pub use config::{ClientConfig, FloorEndpoints};
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;

// Re-export shared wire types for convenience
pub use shared::models::{
    FloorDetail, FloorLayoutResponse, FloorSummary, LayoutTable, RawToken, TableGeometry,
    TableLayoutUpdate, TableRecord,
};
