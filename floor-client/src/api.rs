//! Collaborator interface consumed by the floor plan engine

use std::sync::Arc;

use async_trait::async_trait;
use shared::models::{FloorLayoutResponse, FloorSummary, TableLayoutUpdate, TableRecord};

use crate::ClientResult;

/// Backend calls the floor plan engine depends on
///
/// The normalizer only reads; `save_table_layout` is for hosts (the admin
/// designer) persisting a move or resize.
#[async_trait]
pub trait FloorApi: Send + Sync {
    /// `listFloors()`
    async fn list_floors(&self) -> ClientResult<Vec<FloorSummary>>;

    /// `getFloorLayout(floorId)`
    async fn get_floor_layout(&self, floor_id: &str) -> ClientResult<FloorLayoutResponse>;

    /// `listAllTables()` (legacy flat list)
    async fn list_all_tables(&self) -> ClientResult<Vec<TableRecord>>;

    /// Persist one table's placement
    async fn save_table_layout(&self, table_id: &str, update: &TableLayoutUpdate)
    -> ClientResult<()>;
}

#[async_trait]
impl<T: FloorApi + ?Sized> FloorApi for Arc<T> {
    async fn list_floors(&self) -> ClientResult<Vec<FloorSummary>> {
        (**self).list_floors().await
    }

    async fn get_floor_layout(&self, floor_id: &str) -> ClientResult<FloorLayoutResponse> {
        (**self).get_floor_layout(floor_id).await
    }

    async fn list_all_tables(&self) -> ClientResult<Vec<TableRecord>> {
        (**self).list_all_tables().await
    }

    async fn save_table_layout(
        &self,
        table_id: &str,
        update: &TableLayoutUpdate,
    ) -> ClientResult<()> {
        (**self).save_table_layout(table_id, update).await
    }
}
