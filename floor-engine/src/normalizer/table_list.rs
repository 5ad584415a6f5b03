//! Fallback source: the flat legacy table list
//!
//! The legacy API has no floors. Active records are grouped by their
//! free-text `type`, each distinct value becoming a floor named after itself,
//! sized to fit its tables plus a margin.

use async_trait::async_trait;
use floor_client::FloorApi;
use shared::models::{Floor, FloorLayout, TableRecord};

use super::{LayoutSource, RawTable, build_table};
use crate::config::NormalizerConfig;
use crate::error::{LoadError, LoadResult};

pub const SOURCE_NAME: &str = "table_list";

#[derive(Debug, Clone, Copy, Default)]
pub struct TableListSource;

#[async_trait]
impl LayoutSource for TableListSource {
    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    async fn load(&self, api: &dyn FloorApi, config: &NormalizerConfig) -> LoadResult<FloorLayout> {
        let records: Vec<TableRecord> = api
            .list_all_tables()
            .await?
            .into_iter()
            .filter(|r| r.is_active)
            .collect();

        if records.is_empty() {
            return Err(LoadError::NoActiveTables);
        }

        let floors = group_by_type(&records, config)
            .into_iter()
            .map(|(name, group)| build_floor(name, &group, config))
            .collect();

        Ok(FloorLayout::new(SOURCE_NAME, config.layout_name.clone(), floors))
    }
}

/// Groups in first-seen order
fn group_by_type<'a>(
    records: &'a [TableRecord],
    config: &'a NormalizerConfig,
) -> Vec<(&'a str, Vec<&'a TableRecord>)> {
    let mut groups: Vec<(&str, Vec<&TableRecord>)> = Vec::new();
    for record in records {
        let name = record
            .table_type
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(config.default_zone.as_str());
        match groups.iter_mut().find(|(n, _)| *n == name) {
            Some((_, members)) => members.push(record),
            None => groups.push((name, vec![record])),
        }
    }
    groups
}

fn build_floor(name: &str, records: &[&TableRecord], config: &NormalizerConfig) -> Floor {
    let tables: Vec<_> = records
        .iter()
        .map(|r| {
            let status = r.status_token();
            build_table(
                RawTable {
                    id: &r.id,
                    code: &r.code,
                    capacity: r.seating_capacity,
                    status: status.as_ref(),
                    shape: r.shape.as_ref(),
                    x: r.position_x,
                    y: r.position_y,
                    width: r.width,
                    height: r.height,
                    rotation: r.rotation,
                },
                name,
                name,
                config,
            )
        })
        .collect();

    let (max_x, max_y) = tables.iter().fold((0.0_f64, 0.0_f64), |(mx, my), t| {
        (
            mx.max(t.position.x + t.size.width),
            my.max(t.position.y + t.size.height),
        )
    });
    let width = (max_x + config.fallback_margin).max(config.min_floor_width);
    let height = (max_y + config.fallback_margin).max(config.min_floor_height);

    let mut floor = Floor::new(name, name, width, height);
    floor.tables = tables;
    floor
}
