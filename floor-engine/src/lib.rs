//! # floor-engine
//!
//! Floor plan layout engine: places restaurant tables on one or more floors,
//! lets a user drag and resize them on a snapping grid, and backs the
//! reservation table picker.
//!
//! ## Scope
//!
//! - [`normalizer`]: builds one canonical [`FloorLayout`] from either backend
//!   shape (per-floor layouts, or the flat legacy table list as fallback)
//! - [`widget`]: one table's gesture state and status-dependent visuals
//! - [`canvas`]: grid, hit-testing and event routing for one floor
//! - [`selection`]: single-table pick for the reservation flow
//! - [`delta`]: host-side application of widget/canvas events to a layout
//!
//! The engine never persists anything and never keeps the authoritative
//! layout: hosts own it, the engine proposes deltas.
//!
//! ## Example
//!
//! ```ignore
//! use floor_client::ClientConfig;
//! use floor_engine::{EngineConfig, LayoutLoader};
//!
//! let api = ClientConfig::from_env().build_http_client()?;
//! let config = EngineConfig::from_env();
//! let layout = LayoutLoader::new(config.normalizer.clone()).load(&api).await?;
//! ```

pub mod canvas;
pub mod config;
pub mod delta;
pub mod error;
pub mod normalizer;
pub mod selection;
pub mod snap;
pub mod widget;

// Re-exports
pub use canvas::{
    CanvasContent, CanvasEvent, CanvasProps, CanvasView, FloorCanvas, FloorEventHandler, Legend,
    TextMarker, zone_markers,
};
pub use config::{EngineConfig, GridConfig, NormalizerConfig};
pub use delta::{LayoutDelta, apply_delta};
pub use error::{LoadError, LoadResult, SourceFailure};
pub use normalizer::{FloorLayoutSource, LayoutLoader, LayoutSource, TableListSource};
pub use selection::{SelectionChange, SelectionState, TableSelection};
pub use widget::{
    OverlayContent, PointerTarget, TableOverlay, TableVisual, TableWidget, WidgetEvent, WidgetProps,
};

pub use shared::models::{
    Floor, FloorLayout, FloorTable, Position, Size, TableKey, TableShape, TableStatus,
};
