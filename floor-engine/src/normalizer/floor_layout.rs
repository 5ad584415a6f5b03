//! Primary source: floor list plus one layout request per floor

use async_trait::async_trait;
use floor_client::FloorApi;
use futures::future::join_all;
use shared::models::{Floor, FloorLayout, FloorLayoutResponse, FloorSummary};

use super::{LayoutSource, RawTable, build_table};
use crate::config::NormalizerConfig;
use crate::error::{LoadError, LoadResult};

pub const SOURCE_NAME: &str = "floor_layout";

/// `listFloors()` then `getFloorLayout(id)` for every active floor
///
/// Detail requests run concurrently and are joined before the layout is
/// built; a failed request leaves its floor in place with no tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloorLayoutSource;

#[async_trait]
impl LayoutSource for FloorLayoutSource {
    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    async fn load(&self, api: &dyn FloorApi, config: &NormalizerConfig) -> LoadResult<FloorLayout> {
        let summaries: Vec<FloorSummary> = api
            .list_floors()
            .await?
            .into_iter()
            .filter(|f| f.is_active)
            .collect();

        if summaries.is_empty() {
            return Err(LoadError::NoActiveFloors);
        }

        let details = join_all(summaries.iter().map(|f| api.get_floor_layout(&f.id))).await;

        let floors = summaries
            .iter()
            .zip(details)
            .map(|(summary, detail)| match detail {
                Ok(response) => build_floor(summary, Some(&response), config),
                Err(e) => {
                    tracing::warn!(
                        floor_id = %summary.id,
                        error = %e,
                        "Floor layout fetch failed, showing floor without tables"
                    );
                    build_floor(summary, None, config)
                }
            })
            .collect();

        Ok(FloorLayout::new(SOURCE_NAME, config.layout_name.clone(), floors))
    }
}

fn build_floor(
    summary: &FloorSummary,
    detail: Option<&FloorLayoutResponse>,
    config: &NormalizerConfig,
) -> Floor {
    let floor_info = detail.map(|d| &d.floor);
    let width = floor_info
        .and_then(|f| f.width)
        .or(summary.width)
        .filter(|w| *w > 0.0)
        .unwrap_or(config.min_floor_width);
    let height = floor_info
        .and_then(|f| f.height)
        .or(summary.height)
        .filter(|h| *h > 0.0)
        .unwrap_or(config.min_floor_height);

    let mut floor = Floor::new(summary.id.clone(), summary.name.clone(), width, height);
    floor.background_image = floor_info
        .and_then(|f| f.background_image_url.clone())
        .or_else(|| summary.image_url.clone());

    if let Some(detail) = detail {
        floor.tables = detail
            .tables
            .iter()
            .map(|t| {
                let geometry = t.layout.clone().unwrap_or_default();
                build_table(
                    RawTable {
                        id: &t.id,
                        code: &t.code,
                        capacity: t.seating_capacity,
                        status: t.status.as_ref(),
                        shape: geometry.shape.as_ref(),
                        x: geometry.x,
                        y: geometry.y,
                        width: geometry.width,
                        height: geometry.height,
                        rotation: geometry.rotation,
                    },
                    &summary.id,
                    &summary.name,
                    config,
                )
            })
            .collect();
    }
    floor
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{FloorDetail, LayoutTable, RawToken, TableGeometry, TableShape, TableStatus};

    fn summary(id: &str, name: &str) -> FloorSummary {
        FloorSummary {
            id: id.into(),
            name: name.into(),
            width: Some(1000.0),
            height: None,
            image_url: Some("/summary.png".into()),
            is_active: true,
        }
    }

    #[test]
    fn test_build_floor_from_detail() {
        let detail = FloorLayoutResponse {
            floor: FloorDetail {
                width: Some(1200.0),
                height: Some(900.0),
                background_image_url: Some("/detail.png".into()),
            },
            tables: vec![LayoutTable {
                id: "t1".into(),
                code: "T1".into(),
                seating_capacity: Some(4),
                status: Some(RawToken::new("2")),
                layout: Some(TableGeometry {
                    x: Some(120.0),
                    y: Some(80.0),
                    width: None,
                    height: None,
                    shape: Some(RawToken::new("Round")),
                    rotation: None,
                }),
            }],
        };
        let floor = build_floor(&summary("f1", "Indoor"), Some(&detail), &NormalizerConfig::default());

        assert_eq!((floor.width, floor.height), (1200.0, 900.0));
        assert_eq!(floor.background_image.as_deref(), Some("/detail.png"));
        let table = &floor.tables[0];
        assert_eq!(table.status, TableStatus::Occupied);
        assert_eq!(table.shape, TableShape::Circle);
        assert_eq!(table.zone, "Indoor");
        assert_eq!(table.capacity, 4);
    }

    #[test]
    fn test_build_floor_without_detail_uses_summary() {
        let floor = build_floor(&summary("f2", "Terrace"), None, &NormalizerConfig::default());
        assert!(floor.tables.is_empty());
        assert_eq!(floor.width, 1000.0);
        assert_eq!(floor.height, 600.0);
        assert_eq!(floor.background_image.as_deref(), Some("/summary.png"));
    }
}
