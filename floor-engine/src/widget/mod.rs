//! Table widget: one table's pointer gestures and visuals
//!
//! # Gesture state machine
//!
//! ```text
//! Idle ──down(body)──▶ Pressed ──move > threshold (draggable)──▶ Dragging
//!   │                     │                                        │
//!   │                     └──up──▶ Click                           └──up/cancel──▶ PositionChanged
//!   └──down(handle, resizable)──▶ Resizing ──up/cancel──▶ SizeChanged
//! ```
//!
//! # Invariants
//!
//! 1. Only one gesture at a time: a press while busy is ignored, so drag is
//!    suppressed during resize and vice versa.
//! 2. Click never fires for a pointer session that dragged or resized.
//! 3. The committed position/size is never written by a gesture. Dragging
//!    only moves a visual offset; the offset is dropped the moment the
//!    committed position received from the host changes.
//! 4. Pointer coordinates are canvas-global: moves and releases outside the
//!    table's bounds still drive and finish the gesture. `pointer_cancel`
//!    finishes it with the last known pointer position.

mod visual;

pub use visual::{
    CornerRadius, OverlayContent, StatusPalette, TableOverlay, TableVisual, palette, size_readout,
};

use serde::Serialize;
use shared::models::{FloorTable, Position, Size};

use crate::config::GridConfig;
use crate::snap;

/// Which part of the widget a press landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerTarget {
    Body,
    ResizeHandle,
}

/// High-level result of a completed pointer session
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WidgetEvent {
    Click,
    PositionChanged { position: Position },
    SizeChanged { size: Size },
}

/// Per-render inputs decided by the canvas/host
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidgetProps {
    pub draggable: bool,
    pub resizable: bool,
    /// Floor bounds; drag results are clamped into them
    pub bounds: Size,
    pub highlighted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture {
    Idle,
    Pressed {
        pointer_start: Position,
        can_drag: bool,
    },
    Dragging {
        pointer_start: Position,
        origin: Position,
    },
    Resizing {
        pointer_start: Position,
        start_size: Size,
        preview: Size,
    },
}

/// Visual state of one table
#[derive(Debug, Clone)]
pub struct TableWidget {
    table_id: String,
    grid: GridConfig,
    /// Last committed position/size seen from the host
    committed: Position,
    committed_size: Size,
    /// Drawn on top of `committed` until the host's position changes
    offset: (f64, f64),
    /// Drawn instead of `committed_size` until the host's size changes
    pending_size: Option<Size>,
    gesture: Gesture,
    last_pointer: Option<Position>,
}

impl TableWidget {
    pub fn new(table: &FloorTable, grid: GridConfig) -> Self {
        Self {
            table_id: table.id.clone(),
            grid,
            committed: table.position,
            committed_size: table.size,
            offset: (0.0, 0.0),
            pending_size: None,
            gesture: Gesture::Idle,
            last_pointer: None,
        }
    }

    pub fn table_id(&self) -> &str {
        &self.table_id
    }

    /// Receive the authoritative table for this render
    ///
    /// A changed committed position drops the visual offset; a changed size
    /// drops the pending size. An unchanged value keeps the pending visual
    /// (the host has not answered yet).
    pub fn sync(&mut self, table: &FloorTable) {
        if table.position != self.committed {
            self.committed = table.position;
            if !self.is_dragging() {
                self.offset = (0.0, 0.0);
            }
        }
        if table.size != self.committed_size {
            self.committed_size = table.size;
            self.pending_size = None;
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, Gesture::Dragging { .. })
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self.gesture, Gesture::Resizing { .. })
    }

    /// A pointer session is in progress
    pub fn is_busy(&self) -> bool {
        !matches!(self.gesture, Gesture::Idle)
    }

    /// Position to draw at
    pub fn visual_position(&self) -> Position {
        match self.gesture {
            Gesture::Dragging { pointer_start, origin } => {
                let (dx, dy) = self.pointer_delta(pointer_start);
                origin.offset(dx, dy)
            }
            _ => self.committed.offset(self.offset.0, self.offset.1),
        }
    }

    /// Size to draw at
    pub fn visual_size(&self) -> Size {
        match self.gesture {
            Gesture::Resizing { preview, .. } => preview,
            _ => self.pending_size.unwrap_or(self.committed_size),
        }
    }

    /// Which region of this widget contains `point`, if any
    ///
    /// The handle only exists when resizing is enabled.
    pub fn hit_target(&self, point: Position, props: &WidgetProps) -> Option<PointerTarget> {
        let origin = self.visual_position();
        let size = self.visual_size();
        let inside = point.x >= origin.x
            && point.x <= origin.x + size.width
            && point.y >= origin.y
            && point.y <= origin.y + size.height;
        if !inside {
            return None;
        }
        let handle = self.grid.resize_handle_size;
        if props.resizable
            && point.x >= origin.x + size.width - handle
            && point.y >= origin.y + size.height - handle
        {
            return Some(PointerTarget::ResizeHandle);
        }
        Some(PointerTarget::Body)
    }

    /// Start a pointer session; returns false when one is already running
    pub fn pointer_down(&mut self, target: PointerTarget, at: Position, props: &WidgetProps) -> bool {
        if self.is_busy() {
            return false;
        }
        self.last_pointer = Some(at);
        self.gesture = match target {
            PointerTarget::ResizeHandle if props.resizable => Gesture::Resizing {
                pointer_start: at,
                start_size: self.visual_size(),
                preview: self.visual_size(),
            },
            _ => Gesture::Pressed {
                pointer_start: at,
                can_drag: props.draggable,
            },
        };
        true
    }

    pub fn pointer_move(&mut self, at: Position) {
        if !self.is_busy() {
            return;
        }
        self.last_pointer = Some(at);
        match self.gesture {
            Gesture::Pressed {
                pointer_start,
                can_drag: true,
            } => {
                let (dx, dy) = (at.x - pointer_start.x, at.y - pointer_start.y);
                if dx.hypot(dy) > self.grid.drag_threshold {
                    // start from where the table is drawn
                    let origin = self.committed.offset(self.offset.0, self.offset.1);
                    self.offset = (0.0, 0.0);
                    self.gesture = Gesture::Dragging {
                        pointer_start,
                        origin,
                    };
                    tracing::trace!(table_id = %self.table_id, "Drag started");
                }
            }
            Gesture::Resizing {
                pointer_start,
                start_size,
                ..
            } => {
                let (dx, dy) = (at.x - pointer_start.x, at.y - pointer_start.y);
                self.gesture = Gesture::Resizing {
                    pointer_start,
                    start_size,
                    preview: snap::snap_size(start_size, dx, dy, &self.grid),
                };
            }
            _ => {}
        }
    }

    /// Finish the pointer session at `at`
    pub fn pointer_up(&mut self, at: Position, props: &WidgetProps) -> Option<WidgetEvent> {
        if !self.is_busy() {
            return None;
        }
        self.pointer_move(at);
        self.finish(props)
    }

    /// Finish the session after pointer capture was lost
    pub fn pointer_cancel(&mut self, props: &WidgetProps) -> Option<WidgetEvent> {
        if !self.is_busy() {
            return None;
        }
        self.finish(props)
    }

    fn finish(&mut self, props: &WidgetProps) -> Option<WidgetEvent> {
        let gesture = std::mem::replace(&mut self.gesture, Gesture::Idle);
        let last = self.last_pointer.take();
        match gesture {
            Gesture::Idle => None,
            Gesture::Pressed { .. } => Some(WidgetEvent::Click),
            Gesture::Dragging {
                pointer_start,
                origin,
            } => {
                let end = last.unwrap_or(pointer_start);
                let position = snap::snap_position(
                    origin,
                    end.x - pointer_start.x,
                    end.y - pointer_start.y,
                    props.bounds,
                    &self.grid,
                );
                // keep drawing at the drop point until the host answers
                self.offset = (position.x - self.committed.x, position.y - self.committed.y);
                tracing::debug!(table_id = %self.table_id, x = position.x, y = position.y, "Drag committed");
                Some(WidgetEvent::PositionChanged { position })
            }
            Gesture::Resizing { preview, .. } => {
                self.pending_size = (preview != self.committed_size).then_some(preview);
                tracing::debug!(
                    table_id = %self.table_id,
                    width = preview.width,
                    height = preview.height,
                    "Resize committed"
                );
                Some(WidgetEvent::SizeChanged { size: preview })
            }
        }
    }

    fn pointer_delta(&self, pointer_start: Position) -> (f64, f64) {
        self.last_pointer
            .map_or((0.0, 0.0), |p| (p.x - pointer_start.x, p.y - pointer_start.y))
    }

    /// Describe the table for drawing; colors and label depend on status only
    pub fn render(
        &self,
        table: &FloorTable,
        props: &WidgetProps,
        overlay: Option<&dyn TableOverlay>,
    ) -> TableVisual {
        let size = self.visual_size();
        TableVisual {
            table_id: table.id.clone(),
            label: table.name.clone(),
            capacity: table.capacity,
            zone: table.zone.clone(),
            status: table.status,
            shape: table.shape,
            position: self.visual_position(),
            size,
            rotation: table.rotation,
            corner_radius: CornerRadius::for_shape(table.shape, self.grid.corner_radius),
            palette: palette(table.status),
            highlighted: props.highlighted,
            draggable: props.draggable,
            resizable: props.resizable,
            size_readout: self.is_resizing().then(|| size_readout(size)),
            overlay: overlay.and_then(|o| o.overlay(table)),
        }
    }
}
