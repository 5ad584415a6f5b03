//! Floor API Models
//!
//! Collaborator shapes for the per-floor layout endpoints and the flat
//! legacy table list. Field names follow the backend (camelCase); numeric
//! ids and codes are accepted as strings or numbers.
//!
//! Decoding is per record: a table entry that cannot be read is dropped, and
//! an unreadable token, capacity or coordinate on an otherwise valid entry
//! reads as absent.

use serde::{Deserialize, Deserializer, Serialize};

use super::floor_plan::{FloorTable, TableStatus};
use crate::util::{lenient_count, lenient_number, lenient_token, opaque_id, skip_invalid};

/// Uninterpreted status/shape token as sent by the backend
///
/// Only the engine's normalizer reads these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RawToken(String);

impl RawToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn raw_token<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<RawToken>, D::Error> {
    lenient_token(deserializer).map(|t| t.map(RawToken))
}

impl From<&str> for RawToken {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

fn default_active() -> bool {
    true
}

/// `listFloors()` entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorSummary {
    #[serde(deserialize_with = "opaque_id")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub width: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub height: Option<f64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// `getFloorLayout(floorId)` response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorLayoutResponse {
    #[serde(default)]
    pub floor: FloorDetail,
    #[serde(default, deserialize_with = "skip_invalid")]
    pub tables: Vec<LayoutTable>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorDetail {
    #[serde(default, deserialize_with = "lenient_number")]
    pub width: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub height: Option<f64>,
    #[serde(default)]
    pub background_image_url: Option<String>,
}

/// Table entry inside a floor layout response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutTable {
    #[serde(deserialize_with = "opaque_id")]
    pub id: String,
    #[serde(default)]
    pub code: String,
    #[serde(default, deserialize_with = "lenient_count")]
    pub seating_capacity: Option<u32>,
    /// `"0" | "1" | "2"` or a textual token
    #[serde(default, deserialize_with = "raw_token")]
    pub status: Option<RawToken>,
    #[serde(default)]
    pub layout: Option<TableGeometry>,
}

/// Absolute placement of one table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableGeometry {
    #[serde(default, deserialize_with = "lenient_number")]
    pub x: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub y: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub width: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub height: Option<f64>,
    #[serde(default, deserialize_with = "raw_token")]
    pub shape: Option<RawToken>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub rotation: Option<f64>,
}

/// `listAllTables()` entry (legacy flat shape)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRecord {
    #[serde(deserialize_with = "opaque_id")]
    pub id: String,
    #[serde(default)]
    pub code: String,
    /// Free text, used as a pseudo-zone
    #[serde(rename = "type", default)]
    pub table_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub seating_capacity: Option<u32>,
    #[serde(default, deserialize_with = "raw_token")]
    pub shape: Option<RawToken>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub position_x: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub position_y: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub width: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub height: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub rotation: Option<f64>,
    #[serde(default, deserialize_with = "lenient_token")]
    pub table_status_id: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl TableRecord {
    /// Status token of the record, wrapped for the normalizer
    pub fn status_token(&self) -> Option<RawToken> {
        self.table_status_id.clone().map(RawToken)
    }
}

/// Persistence payload for a designer move/resize
///
/// Built from a canonical table; a transient `SELECTED` overlay is sent as
/// `AVAILABLE`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableLayoutUpdate {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub shape: String,
    pub rotation: f64,
    pub status: TableStatus,
}

impl TableLayoutUpdate {
    pub fn from_table(table: &FloorTable) -> Self {
        Self {
            x: table.position.x,
            y: table.position.y,
            width: table.size.width,
            height: table.size.height,
            shape: table.shape.as_str().to_string(),
            rotation: table.rotation,
            status: table.status.persisted(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TableShape;

    #[test]
    fn test_layout_response_deserialize() {
        let json = r#"{
            "floor": {"width": 1200, "height": 900, "backgroundImageUrl": "/img/indoor.png"},
            "tables": [
                {"id": 7, "code": "T7", "seatingCapacity": 4, "status": 2,
                 "layout": {"x": 120, "y": 80, "width": 90, "height": 90, "shape": "Round", "rotation": 15}},
                {"id": "t8", "code": "T8", "status": "occupied"}
            ]
        }"#;
        let response: FloorLayoutResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.floor.width, Some(1200.0));
        assert_eq!(response.tables.len(), 2);

        let t7 = &response.tables[0];
        assert_eq!(t7.id, "7");
        assert_eq!(t7.status.as_ref().unwrap().as_str(), "2");
        let geometry = t7.layout.as_ref().unwrap();
        assert_eq!(geometry.shape.as_ref().unwrap().as_str(), "Round");
        assert_eq!(geometry.rotation, Some(15.0));

        let t8 = &response.tables[1];
        assert!(t8.layout.is_none());
        assert_eq!(t8.status.as_ref().unwrap().as_str(), "occupied");
    }

    #[test]
    fn test_floor_summary_defaults_active() {
        let summary: FloorSummary = serde_json::from_str(r#"{"id": 1, "name": "Indoor"}"#).unwrap();
        assert_eq!(summary.id, "1");
        assert!(summary.is_active);
        assert!(summary.width.is_none());
    }

    #[test]
    fn test_table_record_deserialize() {
        let json = r#"{"id": 3, "code": "B3", "type": "Bar", "seatingCapacity": 2,
                       "shape": "square", "positionX": 40, "positionY": 60,
                       "tableStatusId": 1, "isActive": false}"#;
        let record: TableRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.table_type.as_deref(), Some("Bar"));
        assert_eq!(record.status_token().unwrap().as_str(), "1");
        assert!(!record.is_active);
        assert!(record.width.is_none());
    }

    #[test]
    fn test_bad_fields_read_as_absent() {
        let json = r#"{"id": 5, "code": "C5", "seatingCapacity": -1, "shape": {"kind": "round"},
                       "positionX": "140", "positionY": "left", "tableStatusId": true}"#;
        let record: TableRecord = serde_json::from_str(json).unwrap();
        assert!(record.seating_capacity.is_none());
        assert!(record.shape.is_none());
        assert!(record.status_token().is_none());
        assert_eq!(record.position_x, Some(140.0));
        assert!(record.position_y.is_none());

        let record: TableRecord = serde_json::from_str(r#"{"id": 6, "seatingCapacity": "4"}"#).unwrap();
        assert_eq!(record.seating_capacity, Some(4));
    }

    #[test]
    fn test_unreadable_layout_table_is_dropped() {
        let json = r#"{"tables": [
            {"id": "t1", "code": "T1", "status": true},
            {"code": "no id"},
            {"id": "t3", "code": "T3", "layout": {"x": 40, "y": 40}}
        ]}"#;
        let response: FloorLayoutResponse = serde_json::from_str(json).unwrap();
        let ids: Vec<_> = response.tables.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t1", "t3"]);
        assert!(response.tables[0].status.is_none());
    }

    #[test]
    fn test_layout_update_never_carries_selected() {
        let table = FloorTable::new("t1", "T1")
            .with_position(120.0, 100.0)
            .with_shape(TableShape::Oval)
            .with_status(TableStatus::Selected);
        let update = TableLayoutUpdate::from_table(&table);
        assert_eq!(update.status, TableStatus::Available);
        assert_eq!(update.shape, "Oval");

        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["status"], "AVAILABLE");
        assert_eq!(json["x"], 120.0);
    }
}
