//! Host-side application of engine events
//!
//! Widgets and the canvas only propose changes. A host holding the
//! authoritative [`FloorLayout`] turns them into [`LayoutDelta`]s and builds
//! the next snapshot with [`apply_delta`]; the previous snapshot is left as
//! it was, so a failed persistence call can simply re-render it.

use serde::{Deserialize, Serialize};
use shared::models::{FloorLayout, Position, Size, TableKey, TableStatus};

use crate::config::GridConfig;
use crate::snap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LayoutDelta {
    Move { key: TableKey, position: Position },
    Resize { key: TableKey, size: Size },
    SetStatus { key: TableKey, status: TableStatus },
    SetActiveFloor { floor_id: String },
}

impl LayoutDelta {
    /// Table this delta touches, if any
    pub fn key(&self) -> Option<&TableKey> {
        match self {
            Self::Move { key, .. } | Self::Resize { key, .. } | Self::SetStatus { key, .. } => Some(key),
            Self::SetActiveFloor { .. } => None,
        }
    }
}

/// Next layout snapshot with `delta` applied
///
/// Unknown floors/tables leave the snapshot unchanged. Positions are snapped
/// to the grid and clamped into the floor bounds; sizes are snapped and kept
/// at or above the minimum table size.
///
/// `SetStatus` never writes [`TableStatus::Selected`]: the selection overlay
/// belongs to [`TableSelection`](crate::TableSelection), which keeps it on at
/// most one table.
pub fn apply_delta(layout: &FloorLayout, delta: &LayoutDelta, grid: &GridConfig) -> FloorLayout {
    let mut next = layout.clone();
    match delta {
        LayoutDelta::Move { key, position } => {
            let Some(floor) = next.floor_mut(&key.floor_id) else {
                return unchanged(next, delta);
            };
            let bounds = floor.bounds();
            let Some(table) = floor.table_mut(&key.table_id) else {
                return unchanged(next, delta);
            };
            table.position = snap::snap_into_bounds(*position, bounds, grid);
        }
        LayoutDelta::Resize { key, size } => {
            let Some(table) = next.table_mut(key) else {
                return unchanged(next, delta);
            };
            table.size = snap::snap_size(*size, 0.0, 0.0, grid);
        }
        LayoutDelta::SetStatus { key, status } => {
            if *status == TableStatus::Selected {
                tracing::debug!(?key, "Selection overlay is not set through deltas, ignored");
                return next;
            }
            let Some(table) = next.table_mut(key) else {
                return unchanged(next, delta);
            };
            table.status = *status;
        }
        LayoutDelta::SetActiveFloor { floor_id } => {
            if !next.set_active_floor(floor_id) {
                return unchanged(next, delta);
            }
        }
    }
    next
}

fn unchanged(layout: FloorLayout, delta: &LayoutDelta) -> FloorLayout {
    tracing::debug!(?delta, "Delta target not found, layout unchanged");
    layout
}
