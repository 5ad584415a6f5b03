//! Single-table pick for the reservation flow
//!
//! ```text
//! NoSelection ──click(selectable)──▶ Selected(a)
//! Selected(a) ──click(a)──────────▶ NoSelection
//! Selected(a) ──click(b selectable)▶ Selected(b)
//! any         ──click(occupied/reserved/disabled)──▶ unchanged
//! ```
//!
//! The `SELECTED` status written into the layout is an overlay: it is never
//! persisted (see [`TableStatus::persisted`]) and at most one table in the
//! layout carries it after every transition.

use serde::Serialize;
use shared::models::{FloorLayout, TableKey, TableStatus};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "table", rename_all = "snake_case")]
pub enum SelectionState {
    #[default]
    NoSelection,
    Selected(TableKey),
}

/// Outcome of one click
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SelectionChange {
    /// Unknown or non-selectable table
    Ignored,
    Selected { table: TableKey },
    Deselected { table: TableKey },
    Switched { from: TableKey, to: TableKey },
}

#[derive(Debug, Clone, Default)]
pub struct TableSelection {
    state: SelectionState,
}

impl TableSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn selected(&self) -> Option<&TableKey> {
        match &self.state {
            SelectionState::Selected(key) => Some(key),
            SelectionState::NoSelection => None,
        }
    }

    /// The key a host submits with the reservation request
    pub fn selected_for_submission(&self) -> Option<TableKey> {
        self.selected().cloned()
    }

    pub fn click(&mut self, layout: &mut FloorLayout, key: &TableKey) -> SelectionChange {
        let Some(status) = layout.table(key).map(|t| t.status) else {
            tracing::debug!(table = %key, "Click on unknown table ignored");
            return SelectionChange::Ignored;
        };

        if self.selected() == Some(key) {
            revert(layout, key);
            self.state = SelectionState::NoSelection;
            return SelectionChange::Deselected { table: key.clone() };
        }

        if !status.is_selectable() {
            tracing::debug!(table = %key, status = status.as_str(), "Click on unavailable table ignored");
            return SelectionChange::Ignored;
        }

        let previous = std::mem::take(&mut self.state);
        clear_overlay(layout);
        mark(layout, key);
        self.state = SelectionState::Selected(key.clone());

        match previous {
            SelectionState::Selected(from) => SelectionChange::Switched {
                from,
                to: key.clone(),
            },
            SelectionState::NoSelection => SelectionChange::Selected { table: key.clone() },
        }
    }

    /// Drop the selection and revert its overlay
    pub fn clear(&mut self, layout: &mut FloorLayout) -> Option<TableKey> {
        clear_overlay(layout);
        match std::mem::take(&mut self.state) {
            SelectionState::Selected(key) => Some(key),
            SelectionState::NoSelection => None,
        }
    }

    /// Re-apply a selection onto a freshly loaded layout
    ///
    /// `hint` (the host's `selectedTableId`) wins over the current state. The
    /// selection survives only while the table exists and is still selectable;
    /// otherwise the state resets to `NoSelection`.
    pub fn sync(&mut self, layout: &mut FloorLayout, hint: Option<&TableKey>) -> &SelectionState {
        let wanted = hint.cloned().or_else(|| self.selected().cloned());
        clear_overlay(layout);
        self.state = match wanted {
            Some(key) if layout.table(&key).is_some_and(|t| t.status.is_selectable()) => {
                mark(layout, &key);
                SelectionState::Selected(key)
            }
            Some(key) => {
                tracing::debug!(table = %key, "Selection dropped after reload");
                SelectionState::NoSelection
            }
            None => SelectionState::NoSelection,
        };
        &self.state
    }
}

fn mark(layout: &mut FloorLayout, key: &TableKey) {
    if let Some(table) = layout.table_mut(key) {
        table.status = TableStatus::Selected;
    }
}

fn revert(layout: &mut FloorLayout, key: &TableKey) {
    if let Some(table) = layout.table_mut(key) {
        table.status = table.status.persisted();
    }
}

fn clear_overlay(layout: &mut FloorLayout) {
    for floor in &mut layout.floors {
        for table in &mut floor.tables {
            table.status = table.status.persisted();
        }
    }
}
