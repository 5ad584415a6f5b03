//! Floor Plan Model
//!
//! Pure value types for one venue view: a [`FloorLayout`] holds [`Floor`]s,
//! each floor holds [`FloorTable`]s (桌台). Coordinates are pixel-equivalent
//! and local to the owning floor.

use serde::{Deserialize, Serialize};

/// Width/height used when a table is constructed without explicit size
pub const DEFAULT_TABLE_SIZE: f64 = 80.0;

/// Point in a floor's local coordinate space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Translate by a pointer delta
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Width/height pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::new(DEFAULT_TABLE_SIZE, DEFAULT_TABLE_SIZE)
    }
}

/// Rendering geometry of a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TableShape {
    Square,
    Circle,
    #[default]
    Rectangle,
    Oval,
}

impl TableShape {
    pub const ALL: [TableShape; 4] = [Self::Square, Self::Circle, Self::Rectangle, Self::Oval];

    /// Circle and Oval render with full corner radius
    pub fn is_rounded(&self) -> bool {
        matches!(self, Self::Circle | Self::Oval)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Square => "Square",
            Self::Circle => "Circle",
            Self::Rectangle => "Rectangle",
            Self::Oval => "Oval",
        }
    }
}

/// Table status (桌台状态)
///
/// `Selected` is a client-local overlay used while a guest picks a table.
/// Backend data never carries it and it must not be persisted as-is; see
/// [`TableStatus::persisted`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableStatus {
    #[default]
    Available,
    Occupied,
    Reserved,
    Disabled,
    Selected,
}

impl TableStatus {
    pub const ALL: [TableStatus; 5] = [
        Self::Available,
        Self::Occupied,
        Self::Reserved,
        Self::Disabled,
        Self::Selected,
    ];

    /// Whether a guest may pick a table in this status
    pub fn is_selectable(&self) -> bool {
        matches!(self, Self::Available | Self::Selected)
    }

    /// Client-only statuses that never come from or go to the backend
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Selected)
    }

    /// Status as it may be sent to a persistence collaborator
    pub fn persisted(self) -> Self {
        match self {
            Self::Selected => Self::Available,
            other => other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::Occupied => "OCCUPIED",
            Self::Reserved => "RESERVED",
            Self::Disabled => "DISABLED",
            Self::Selected => "SELECTED",
        }
    }
}

/// Disambiguates tables across floors: ids are only unique within one floor
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableKey {
    pub floor_id: String,
    pub table_id: String,
}

impl TableKey {
    pub fn new(floor_id: impl Into<String>, table_id: impl Into<String>) -> Self {
        Self {
            floor_id: floor_id.into(),
            table_id: table_id.into(),
        }
    }
}

impl std::fmt::Display for TableKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.floor_id, self.table_id)
    }
}

/// One seatable unit placed on a floor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorTable {
    /// Opaque id, unique within the owning floor
    pub id: String,
    /// Display name / code ("T1", "A-03")
    pub name: String,
    pub capacity: u32,
    pub status: TableStatus,
    /// Area label used for grouping and the legend, not identity
    pub zone: String,
    pub position: Position,
    pub shape: TableShape,
    pub size: Size,
    /// Degrees, clockwise
    pub rotation: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor_id: Option<String>,
}

impl FloorTable {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            capacity: 1,
            status: TableStatus::Available,
            zone: String::new(),
            position: Position::ORIGIN,
            shape: TableShape::default(),
            size: Size::default(),
            rotation: 0.0,
            floor_id: None,
        }
    }

    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    pub fn with_status(mut self, status: TableStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = zone.into();
        self
    }

    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position = Position::new(x, y);
        self
    }

    pub fn with_shape(mut self, shape: TableShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.size = Size::new(width, height);
        self
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn on_floor(mut self, floor_id: impl Into<String>) -> Self {
        self.floor_id = Some(floor_id.into());
        self
    }

    /// Axis-aligned hit test (rotation is ignored by the schematic view)
    pub fn contains(&self, point: Position) -> bool {
        point.x >= self.position.x
            && point.x <= self.position.x + self.size.width
            && point.y >= self.position.y
            && point.y <= self.position.y + self.size.height
    }
}

/// One bounded 2D surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    pub id: String,
    pub name: String,
    /// Canvas bounding box
    pub width: f64,
    pub height: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    pub tables: Vec<FloorTable>,
}

impl Floor {
    pub fn new(id: impl Into<String>, name: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            width,
            height,
            background_image: None,
            tables: Vec::new(),
        }
    }

    pub fn with_background(mut self, image: impl Into<String>) -> Self {
        self.background_image = Some(image.into());
        self
    }

    /// Attach tables, stamping each with this floor's id
    pub fn with_tables(mut self, tables: impl IntoIterator<Item = FloorTable>) -> Self {
        let floor_id = self.id.clone();
        self.tables = tables
            .into_iter()
            .map(|t| t.on_floor(floor_id.clone()))
            .collect();
        self
    }

    pub fn bounds(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn table(&self, table_id: &str) -> Option<&FloorTable> {
        self.tables.iter().find(|t| t.id == table_id)
    }

    pub fn table_mut(&mut self, table_id: &str) -> Option<&mut FloorTable> {
        self.tables.iter_mut().find(|t| t.id == table_id)
    }

    pub fn key_of(&self, table: &FloorTable) -> TableKey {
        TableKey::new(self.id.clone(), table.id.clone())
    }
}

/// The full multi-floor spatial model for one venue view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorLayout {
    pub id: String,
    pub name: String,
    /// Floor currently shown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_floor_id: Option<String>,
    pub floors: Vec<Floor>,
}

impl FloorLayout {
    /// New layout; the first floor becomes active
    pub fn new(id: impl Into<String>, name: impl Into<String>, floors: Vec<Floor>) -> Self {
        let active_floor_id = floors.first().map(|f| f.id.clone());
        Self {
            id: id.into(),
            name: name.into(),
            active_floor_id,
            floors,
        }
    }

    /// Active floor, or the first floor when the reference is stale
    pub fn active_floor(&self) -> Option<&Floor> {
        self.active_floor_id
            .as_deref()
            .and_then(|id| self.floor(id))
            .or_else(|| self.floors.first())
    }

    /// Returns false (and leaves the layout untouched) for an unknown floor
    pub fn set_active_floor(&mut self, floor_id: &str) -> bool {
        if self.floor(floor_id).is_none() {
            return false;
        }
        self.active_floor_id = Some(floor_id.to_string());
        true
    }

    pub fn floor(&self, floor_id: &str) -> Option<&Floor> {
        self.floors.iter().find(|f| f.id == floor_id)
    }

    pub fn floor_mut(&mut self, floor_id: &str) -> Option<&mut Floor> {
        self.floors.iter_mut().find(|f| f.id == floor_id)
    }

    pub fn table(&self, key: &TableKey) -> Option<&FloorTable> {
        self.floor(&key.floor_id)?.table(&key.table_id)
    }

    pub fn table_mut(&mut self, key: &TableKey) -> Option<&mut FloorTable> {
        self.floor_mut(&key.floor_id)?.table_mut(&key.table_id)
    }

    /// Every table with the floor it lives on
    pub fn tables(&self) -> impl Iterator<Item = (&Floor, &FloorTable)> {
        self.floors
            .iter()
            .flat_map(|floor| floor.tables.iter().map(move |table| (floor, table)))
    }

    pub fn count_with_status(&self, status: TableStatus) -> usize {
        self.tables().filter(|(_, t)| t.status == status).count()
    }

    pub fn table_count(&self) -> usize {
        self.floors.iter().map(|f| f.tables.len()).sum()
    }

    /// At least one floor with at least one table
    pub fn is_usable(&self) -> bool {
        self.floors.iter().any(|f| !f.is_empty())
    }
}
