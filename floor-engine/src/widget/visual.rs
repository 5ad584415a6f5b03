//! Status palettes and the render description of one table

use serde::Serialize;
use shared::models::{FloorTable, Position, Size, TableShape, TableStatus};

/// Fixed colors and label for one status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusPalette {
    pub fill: &'static str,
    pub stroke: &'static str,
    pub text: &'static str,
    pub label: &'static str,
}

pub const fn palette(status: TableStatus) -> StatusPalette {
    match status {
        TableStatus::Available => StatusPalette {
            fill: "#dcfce7",
            stroke: "#16a34a",
            text: "#14532d",
            label: "Available",
        },
        TableStatus::Occupied => StatusPalette {
            fill: "#fee2e2",
            stroke: "#dc2626",
            text: "#7f1d1d",
            label: "Occupied",
        },
        TableStatus::Reserved => StatusPalette {
            fill: "#fef3c7",
            stroke: "#d97706",
            text: "#78350f",
            label: "Reserved",
        },
        TableStatus::Disabled => StatusPalette {
            fill: "#f3f4f6",
            stroke: "#9ca3af",
            text: "#4b5563",
            label: "Disabled",
        },
        TableStatus::Selected => StatusPalette {
            fill: "#dbeafe",
            stroke: "#2563eb",
            text: "#1e3a8a",
            label: "Selected",
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CornerRadius {
    /// Pill/ellipse (Circle, Oval)
    Full,
    Fixed(f64),
}

impl CornerRadius {
    pub fn for_shape(shape: TableShape, fixed: f64) -> Self {
        if shape.is_rounded() {
            Self::Full
        } else {
            Self::Fixed(fixed)
        }
    }
}

/// Host-supplied content drawn on top of a table (alert badge, timer, ...)
///
/// Purely decorative: it never takes part in hit-testing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlayContent {
    pub badge: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
}

impl OverlayContent {
    pub fn badge(text: impl Into<String>) -> Self {
        Self {
            badge: text.into(),
            tooltip: None,
        }
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }
}

/// Per-table overlay hook
pub trait TableOverlay: Send + Sync {
    fn overlay(&self, table: &FloorTable) -> Option<OverlayContent>;
}

impl<F> TableOverlay for F
where
    F: Fn(&FloorTable) -> Option<OverlayContent> + Send + Sync,
{
    fn overlay(&self, table: &FloorTable) -> Option<OverlayContent> {
        self(table)
    }
}

/// Everything a front end needs to draw one table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableVisual {
    pub table_id: String,
    pub label: String,
    pub capacity: u32,
    pub zone: String,
    pub status: TableStatus,
    pub shape: TableShape,
    /// Committed position plus any pending drag offset
    pub position: Position,
    /// Committed size, or the resize preview
    pub size: Size,
    pub rotation: f64,
    pub corner_radius: CornerRadius,
    pub palette: StatusPalette,
    pub highlighted: bool,
    pub draggable: bool,
    /// Whether the bottom-right handle is shown
    pub resizable: bool,
    /// "120 × 80" while a resize is in progress
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_readout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlay: Option<OverlayContent>,
}

pub fn size_readout(size: Size) -> String {
    format!("{} × {}", size.width.round(), size.height.round())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palettes_are_distinct() {
        for (i, a) in TableStatus::ALL.iter().enumerate() {
            for b in &TableStatus::ALL[i + 1..] {
                assert_ne!(palette(*a).fill, palette(*b).fill);
                assert_ne!(palette(*a).label, palette(*b).label);
            }
        }
    }

    #[test]
    fn test_corner_radius() {
        assert_eq!(CornerRadius::for_shape(TableShape::Circle, 8.0), CornerRadius::Full);
        assert_eq!(CornerRadius::for_shape(TableShape::Oval, 8.0), CornerRadius::Full);
        assert_eq!(
            CornerRadius::for_shape(TableShape::Square, 8.0),
            CornerRadius::Fixed(8.0)
        );
    }

    #[test]
    fn test_closure_overlay() {
        let hook = |t: &FloorTable| (t.capacity > 6).then(|| OverlayContent::badge("VIP"));
        let big = FloorTable::new("t1", "T1").with_capacity(8);
        let small = FloorTable::new("t2", "T2").with_capacity(2);
        assert_eq!(hook.overlay(&big).unwrap().badge, "VIP");
        assert!(hook.overlay(&small).is_none());
    }

    #[test]
    fn test_size_readout() {
        assert_eq!(size_readout(Size::new(120.0, 80.0)), "120 × 80");
    }
}
