//! Shape/status normalizer
//!
//! Turns collaborator data into one canonical [`FloorLayout`]. Sources are an
//! ordered strategy list: the per-floor layout endpoints first, the flat
//! legacy table list second. The first layout passing
//! [`FloorLayout::is_usable`] wins; callers never learn which source it was.
//!
//! Failure policy:
//! - one floor's detail fetch failing keeps that floor with no tables
//! - a source erroring or coming back empty moves on to the next source
//! - only when every source is exhausted does [`LayoutLoader::load`] fail,
//!   unless some source produced floors without tables; that layout is
//!   returned so hosts can show empty floors

mod floor_layout;
mod table_list;
pub mod tokens;

pub use floor_layout::FloorLayoutSource;
pub use table_list::TableListSource;
pub use tokens::{parse_shape, parse_status};

use async_trait::async_trait;
use floor_client::FloorApi;
use shared::models::{FloorLayout, FloorTable, Position, RawToken, Size};

use crate::config::NormalizerConfig;
use crate::error::{LoadError, LoadResult, SourceFailure};

/// One way of obtaining a layout from the collaborator
#[async_trait]
pub trait LayoutSource: Send + Sync {
    /// Stable name, used in logs and failure reports
    fn name(&self) -> &'static str;

    async fn load(&self, api: &dyn FloorApi, config: &NormalizerConfig) -> LoadResult<FloorLayout>;
}

/// Tries each [`LayoutSource`] in order
pub struct LayoutLoader {
    sources: Vec<Box<dyn LayoutSource>>,
    config: NormalizerConfig,
}

impl LayoutLoader {
    /// Per-floor layouts, then the flat table list
    pub fn new(config: NormalizerConfig) -> Self {
        Self::with_sources(
            config,
            vec![Box::new(FloorLayoutSource), Box::new(TableListSource)],
        )
    }

    pub fn with_sources(config: NormalizerConfig, sources: Vec<Box<dyn LayoutSource>>) -> Self {
        Self { sources, config }
    }

    pub fn source_names(&self) -> Vec<&'static str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    pub async fn load(&self, api: &dyn FloorApi) -> LoadResult<FloorLayout> {
        let mut attempts = Vec::with_capacity(self.sources.len());
        let mut floors_only: Option<FloorLayout> = None;

        for source in &self.sources {
            match source.load(api, &self.config).await {
                Ok(layout) if layout.is_usable() => {
                    tracing::info!(
                        source = source.name(),
                        floors = layout.floors.len(),
                        tables = layout.table_count(),
                        "Floor layout loaded"
                    );
                    return Ok(layout);
                }
                Ok(layout) => {
                    tracing::warn!(
                        source = source.name(),
                        floors = layout.floors.len(),
                        "Layout source returned no tables"
                    );
                    attempts.push(SourceFailure {
                        source: source.name(),
                        reason: "no tables".to_string(),
                    });
                    if floors_only.is_none() && !layout.floors.is_empty() {
                        floors_only = Some(layout);
                    }
                }
                Err(e) => {
                    tracing::warn!(source = source.name(), error = %e, "Layout source failed");
                    attempts.push(SourceFailure {
                        source: source.name(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        if let Some(layout) = floors_only {
            tracing::info!(
                source = %layout.id,
                floors = layout.floors.len(),
                "Floor layout loaded without tables"
            );
            return Ok(layout);
        }

        Err(LoadError::Exhausted { attempts })
    }
}

impl Default for LayoutLoader {
    fn default() -> Self {
        Self::new(NormalizerConfig::default())
    }
}

/// Source-independent view of one backend table
///
/// Both sources funnel through [`build_table`] so equal data yields equal
/// tables whichever endpoint it came from.
#[derive(Debug, Default)]
pub(crate) struct RawTable<'a> {
    pub id: &'a str,
    pub code: &'a str,
    pub capacity: Option<u32>,
    pub status: Option<&'a RawToken>,
    pub shape: Option<&'a RawToken>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub rotation: Option<f64>,
}

pub(crate) fn build_table(
    raw: RawTable<'_>,
    floor_id: &str,
    zone: &str,
    config: &NormalizerConfig,
) -> FloorTable {
    let dimension = |v: Option<f64>| {
        v.filter(|d| d.is_finite() && *d > 0.0)
            .unwrap_or(config.default_table_size)
    };
    let coordinate = |v: Option<f64>| v.filter(|c| c.is_finite()).unwrap_or(0.0).max(0.0);
    let name = if raw.code.is_empty() { raw.id } else { raw.code };

    let mut table = FloorTable::new(raw.id, name)
        .with_capacity(raw.capacity.unwrap_or(1))
        .with_status(tokens::status_of(raw.status))
        .with_shape(tokens::shape_of(raw.shape))
        .with_zone(zone)
        .with_rotation(raw.rotation.filter(|r| r.is_finite()).unwrap_or(0.0))
        .on_floor(floor_id);
    table.position = Position::new(coordinate(raw.x), coordinate(raw.y));
    table.size = Size::new(dimension(raw.width), dimension(raw.height));
    table
}
