//! Floor canvas: one floor's grid, widgets and event routing
//!
//! The canvas owns pointer capture. A press on a table captures the pointer
//! for that table's widget; every move and the final release go to the
//! captured widget wherever they happen, and capture is released on release
//! and on cancel. Widget events leave the canvas tagged with the table id and
//! otherwise unchanged.

use serde::Serialize;
use shared::models::{Floor, FloorTable, Position, Size, TableKey, TableStatus};

use crate::config::GridConfig;
use crate::delta::LayoutDelta;
use crate::widget::{
    PointerTarget, StatusPalette, TableOverlay, TableVisual, TableWidget, WidgetEvent, WidgetProps,
    palette,
};

pub const EMPTY_FLOOR_MESSAGE: &str = "No tables on this floor";

/// Inputs the host passes on every render
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasProps {
    /// Disables drag and resize on every table; clicks still go through
    pub read_only: bool,
    pub show_grid: bool,
    pub resizable: bool,
    /// Externally chosen table to highlight
    pub selected_table_id: Option<String>,
}

impl Default for CanvasProps {
    fn default() -> Self {
        Self {
            read_only: false,
            show_grid: true,
            resizable: true,
            selected_table_id: None,
        }
    }
}

impl CanvasProps {
    /// Reservation picker: read-only, no grid
    pub fn picker(selected_table_id: Option<String>) -> Self {
        Self {
            read_only: true,
            show_grid: false,
            resizable: false,
            selected_table_id,
        }
    }
}

/// Free-floating label in floor coordinates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextMarker {
    pub text: String,
    pub position: Position,
}

impl TextMarker {
    pub fn new(text: impl Into<String>, position: Position) -> Self {
        Self {
            text: text.into(),
            position,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridOverlay {
    pub unit: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CanvasContent {
    /// Floor exists but holds no tables
    Placeholder { message: String },
    Tables { tables: Vec<TableVisual> },
    /// No layout could be loaded
    Unavailable,
}

/// Render description of the canvas
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanvasView {
    pub floor_id: Option<String>,
    pub width: f64,
    pub height: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<GridOverlay>,
    pub content: CanvasContent,
    pub markers: Vec<TextMarker>,
}

impl CanvasView {
    /// Terminal state after every layout source failed
    pub fn unavailable() -> Self {
        Self {
            floor_id: None,
            width: 0.0,
            height: 0.0,
            background_image: None,
            grid: None,
            content: CanvasContent::Unavailable,
            markers: Vec::new(),
        }
    }

    pub fn tables(&self) -> &[TableVisual] {
        match &self.content {
            CanvasContent::Tables { tables } => tables,
            _ => &[],
        }
    }
}

/// Widget event tagged with its table
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CanvasEvent {
    TableClicked { table_id: String },
    PositionChanged { table_id: String, position: Position },
    SizeChanged { table_id: String, size: Size },
}

impl CanvasEvent {
    fn tag(table_id: &str, event: WidgetEvent) -> Self {
        let table_id = table_id.to_string();
        match event {
            WidgetEvent::Click => Self::TableClicked { table_id },
            WidgetEvent::PositionChanged { position } => Self::PositionChanged { table_id, position },
            WidgetEvent::SizeChanged { size } => Self::SizeChanged { table_id, size },
        }
    }

    pub fn table_id(&self) -> &str {
        match self {
            Self::TableClicked { table_id }
            | Self::PositionChanged { table_id, .. }
            | Self::SizeChanged { table_id, .. } => table_id,
        }
    }

    /// Deliver to the host's callbacks; clicks carry the full table
    pub fn dispatch(&self, floor: &Floor, handler: &mut dyn FloorEventHandler) {
        match self {
            Self::TableClicked { table_id } => match floor.table(table_id) {
                Some(table) => handler.on_table_click(table),
                None => tracing::debug!(%table_id, "Click on table no longer on floor"),
            },
            Self::PositionChanged { table_id, position } => handler.on_position_change(table_id, *position),
            Self::SizeChanged { table_id, size } => handler.on_size_change(table_id, *size),
        }
    }

    /// Layout change proposed by this event; clicks propose none
    pub fn into_delta(self, floor_id: &str) -> Option<LayoutDelta> {
        match self {
            Self::TableClicked { .. } => None,
            Self::PositionChanged { table_id, position } => Some(LayoutDelta::Move {
                key: TableKey::new(floor_id, table_id),
                position,
            }),
            Self::SizeChanged { table_id, size } => Some(LayoutDelta::Resize {
                key: TableKey::new(floor_id, table_id),
                size,
            }),
        }
    }
}

/// Host callbacks
pub trait FloorEventHandler {
    fn on_table_click(&mut self, _table: &FloorTable) {}

    /// Drag end with the committed, snapped position
    fn on_position_change(&mut self, _table_id: &str, _position: Position) {}

    fn on_size_change(&mut self, _table_id: &str, _size: Size) {}
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusLegendEntry {
    pub status: TableStatus,
    pub palette: StatusPalette,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneLegendEntry {
    pub zone: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub statuses: Vec<StatusLegendEntry>,
    pub zones: Vec<ZoneLegendEntry>,
}

/// One marker per distinct zone, at the top-left corner of its tables
pub fn zone_markers(floor: &Floor) -> Vec<TextMarker> {
    let mut markers: Vec<TextMarker> = Vec::new();
    for table in floor.tables.iter().filter(|t| !t.zone.is_empty()) {
        match markers.iter_mut().find(|m| m.text == table.zone) {
            Some(marker) => {
                marker.position.x = marker.position.x.min(table.position.x);
                marker.position.y = marker.position.y.min(table.position.y);
            }
            None => markers.push(TextMarker::new(table.zone.clone(), table.position)),
        }
    }
    markers
}

pub struct FloorCanvas {
    grid: GridConfig,
    floor_id: Option<String>,
    /// Same order as the floor's tables; later entries draw on top
    widgets: Vec<TableWidget>,
    /// Table id holding pointer capture
    capture: Option<String>,
    markers: Vec<TextMarker>,
    overlay: Option<Box<dyn TableOverlay>>,
}

impl FloorCanvas {
    pub fn new(grid: GridConfig) -> Self {
        Self {
            grid,
            floor_id: None,
            widgets: Vec::new(),
            capture: None,
            markers: Vec::new(),
            overlay: None,
        }
    }

    pub fn with_overlay(mut self, overlay: impl TableOverlay + 'static) -> Self {
        self.overlay = Some(Box::new(overlay));
        self
    }

    pub fn with_markers(mut self, markers: Vec<TextMarker>) -> Self {
        self.markers = markers;
        self
    }

    pub fn set_markers(&mut self, markers: Vec<TextMarker>) {
        self.markers = markers;
    }

    pub fn floor_id(&self) -> Option<&str> {
        self.floor_id.as_deref()
    }

    /// Table currently holding pointer capture
    pub fn captured(&self) -> Option<&str> {
        self.capture.as_deref()
    }

    pub fn widget(&self, table_id: &str) -> Option<&TableWidget> {
        self.widgets.iter().find(|w| w.table_id() == table_id)
    }

    /// Receive the authoritative floor for this render
    ///
    /// Switching floors drops every widget and any capture. On the same floor
    /// widgets are kept (with their pending visuals) and re-synced.
    pub fn sync(&mut self, floor: &Floor) {
        if self.floor_id.as_deref() != Some(floor.id.as_str()) {
            tracing::debug!(floor_id = %floor.id, tables = floor.tables.len(), "Canvas switched floor");
            self.floor_id = Some(floor.id.clone());
            self.capture = None;
            self.widgets = floor
                .tables
                .iter()
                .map(|t| TableWidget::new(t, self.grid))
                .collect();
            return;
        }

        let mut previous = std::mem::take(&mut self.widgets);
        self.widgets = floor
            .tables
            .iter()
            .map(|table| {
                match previous.iter().position(|w| w.table_id() == table.id) {
                    Some(i) => {
                        let mut widget = previous.swap_remove(i);
                        widget.sync(table);
                        widget
                    }
                    None => TableWidget::new(table, self.grid),
                }
            })
            .collect();

        if let Some(id) = &self.capture
            && self.widget(id).is_none()
        {
            tracing::debug!(table_id = %id, "Captured table removed, releasing pointer");
            self.capture = None;
        }
    }

    /// Widgets were built for `floor`
    fn is_synced_to(&self, floor: &Floor) -> bool {
        self.floor_id.as_deref() == Some(floor.id.as_str())
    }

    fn widget_props(&self, floor: &Floor, props: &CanvasProps, table: &FloorTable) -> WidgetProps {
        WidgetProps {
            draggable: !props.read_only,
            resizable: !props.read_only && props.resizable,
            bounds: floor.bounds(),
            highlighted: props.selected_table_id.as_deref() == Some(table.id.as_str())
                || table.status == TableStatus::Selected,
        }
    }

    /// Draw `floor`; an unsynced floor renders from its committed values
    pub fn render(&self, floor: &Floor, props: &CanvasProps) -> CanvasView {
        let synced = self.is_synced_to(floor);
        let (grid, content) = if floor.is_empty() {
            (
                None,
                CanvasContent::Placeholder {
                    message: EMPTY_FLOOR_MESSAGE.to_string(),
                },
            )
        } else {
            let grid = props.show_grid.then_some(GridOverlay {
                unit: self.grid.unit,
                width: floor.width,
                height: floor.height,
            });
            let tables = floor
                .tables
                .iter()
                .map(|table| {
                    let widget_props = self.widget_props(floor, props, table);
                    let overlay = self.overlay.as_deref();
                    match self.widget(&table.id).filter(|_| synced) {
                        Some(widget) => widget.render(table, &widget_props, overlay),
                        None => TableWidget::new(table, self.grid).render(table, &widget_props, overlay),
                    }
                })
                .collect();
            (grid, CanvasContent::Tables { tables })
        };

        CanvasView {
            floor_id: Some(floor.id.clone()),
            width: floor.width,
            height: floor.height,
            background_image: floor.background_image.clone(),
            grid,
            content,
            markers: self.markers.clone(),
        }
    }

    /// Topmost table under `at` and the part that was hit
    pub fn hit_test<'a>(
        &'a self,
        floor: &'a Floor,
        props: &CanvasProps,
        at: Position,
    ) -> Option<(&'a str, PointerTarget)> {
        if !self.is_synced_to(floor) {
            return floor.tables.iter().rev().find_map(|table| {
                let target = TableWidget::new(table, self.grid)
                    .hit_target(at, &self.widget_props(floor, props, table))?;
                Some((table.id.as_str(), target))
            });
        }
        self.widgets.iter().rev().find_map(|widget| {
            let table = floor.table(widget.table_id())?;
            let target = widget.hit_target(at, &self.widget_props(floor, props, table))?;
            Some((widget.table_id(), target))
        })
    }

    /// Returns true when a table took pointer capture
    pub fn pointer_down(&mut self, floor: &Floor, props: &CanvasProps, at: Position) -> bool {
        if self.capture.is_some() {
            return false;
        }
        if !self.is_synced_to(floor) {
            tracing::debug!(floor_id = %floor.id, "Press on a floor the canvas is not synced to, ignored");
            return false;
        }
        let Some((table_id, target)) = self
            .hit_test(floor, props, at)
            .map(|(id, target)| (id.to_string(), target))
        else {
            return false;
        };
        let Some(table) = floor.table(&table_id) else {
            return false;
        };
        let widget_props = self.widget_props(floor, props, table);
        let Some(widget) = self.widgets.iter_mut().find(|w| w.table_id() == table_id) else {
            return false;
        };
        if widget.pointer_down(target, at, &widget_props) {
            self.capture = Some(table_id);
            true
        } else {
            false
        }
    }

    pub fn pointer_move(&mut self, at: Position) {
        let Some(id) = self.capture.as_deref() else {
            return;
        };
        if let Some(widget) = self.widgets.iter_mut().find(|w| w.table_id() == id) {
            widget.pointer_move(at);
        }
    }

    pub fn pointer_up(&mut self, floor: &Floor, props: &CanvasProps, at: Position) -> Option<CanvasEvent> {
        self.release(floor, props, |widget, widget_props| widget.pointer_up(at, widget_props))
    }

    /// Pointer capture lost: finish with the last known pointer position
    pub fn pointer_cancel(&mut self, floor: &Floor, props: &CanvasProps) -> Option<CanvasEvent> {
        self.release(floor, props, |widget, widget_props| widget.pointer_cancel(widget_props))
    }

    fn release(
        &mut self,
        floor: &Floor,
        props: &CanvasProps,
        finish: impl FnOnce(&mut TableWidget, &WidgetProps) -> Option<WidgetEvent>,
    ) -> Option<CanvasEvent> {
        let id = self.capture.take()?;
        if !self.is_synced_to(floor) {
            tracing::debug!(floor_id = %floor.id, table_id = %id, "Release on another floor, gesture dropped");
            return None;
        }
        let widget_props = match floor.table(&id) {
            Some(table) => self.widget_props(floor, props, table),
            None => WidgetProps {
                draggable: false,
                resizable: false,
                bounds: floor.bounds(),
                highlighted: false,
            },
        };
        let widget = self.widgets.iter_mut().find(|w| w.table_id() == id)?;
        let event = finish(widget, &widget_props)?;
        Some(CanvasEvent::tag(&id, event))
    }

    /// Status counts (every status, fixed order) and zone counts (first seen)
    pub fn legend(floor: &Floor) -> Legend {
        let statuses = TableStatus::ALL
            .iter()
            .map(|&status| StatusLegendEntry {
                status,
                palette: palette(status),
                count: floor.tables.iter().filter(|t| t.status == status).count(),
            })
            .collect();

        let mut zones: Vec<ZoneLegendEntry> = Vec::new();
        for table in &floor.tables {
            match zones.iter_mut().find(|z| z.zone == table.zone) {
                Some(entry) => entry.count += 1,
                None => zones.push(ZoneLegendEntry {
                    zone: table.zone.clone(),
                    count: 1,
                }),
            }
        }

        Legend { statuses, zones }
    }
}
