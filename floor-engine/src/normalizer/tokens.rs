//! Status and shape vocabulary
//!
//! The only place backend tokens become canonical enums. Mapping is total:
//! unknown input falls back to `Available` / `Rectangle` instead of failing.

use shared::models::{RawToken, TableShape, TableStatus};

/// `"1"`/`reserved` → Reserved, `"2"`/`occupied` → Occupied, anything else → Available
pub fn parse_status(token: &str) -> TableStatus {
    let normalized = token.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "1" | "reserved" => TableStatus::Reserved,
        "2" | "occupied" => TableStatus::Occupied,
        "0" | "available" | "" => TableStatus::Available,
        other => {
            tracing::debug!(token = other, "Unrecognized status token, defaulting to AVAILABLE");
            TableStatus::Available
        }
    }
}

/// Case-insensitive; `round` is a synonym for Circle, unknown → Rectangle
pub fn parse_shape(token: &str) -> TableShape {
    let normalized = token.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "square" => TableShape::Square,
        "circle" | "round" => TableShape::Circle,
        "oval" => TableShape::Oval,
        "rectangle" | "" => TableShape::Rectangle,
        other => {
            tracing::debug!(token = other, "Unrecognized shape token, defaulting to Rectangle");
            TableShape::Rectangle
        }
    }
}

pub fn status_of(token: Option<&RawToken>) -> TableStatus {
    token.map_or(TableStatus::Available, |t| parse_status(t.as_str()))
}

pub fn shape_of(token: Option<&RawToken>) -> TableShape {
    token.map_or(TableShape::Rectangle, |t| parse_shape(t.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_status_codes() {
        assert_eq!(parse_status("0"), TableStatus::Available);
        assert_eq!(parse_status("1"), TableStatus::Reserved);
        assert_eq!(parse_status("2"), TableStatus::Occupied);
    }

    #[test]
    fn test_textual_status_case_insensitive() {
        assert_eq!(parse_status("occupied"), TableStatus::Occupied);
        assert_eq!(parse_status("OCCUPIED"), TableStatus::Occupied);
        assert_eq!(parse_status(" Reserved "), TableStatus::Reserved);
    }

    // Pins the lenient defaulting; tightening validation must update this test.
    #[test]
    fn test_unrecognized_status_defaults_to_available() {
        for token in ["", "3", "-1", "disabled", "selected", "busy", "🍽", "occupied!"] {
            assert_eq!(parse_status(token), TableStatus::Available, "{token:?}");
        }
    }

    #[test]
    fn test_status_mapping_is_total() {
        let samples = (0..200u32)
            .map(|i| char::from_u32(i).map(String::from).unwrap_or_default())
            .chain(["RESERVED", "Occupied", "2 ", "１"].map(String::from));
        for token in samples {
            let status = parse_status(&token);
            assert!(TableStatus::ALL.contains(&status));
            assert_ne!(status, TableStatus::Selected, "backend tokens never select");
        }
    }

    #[test]
    fn test_shapes() {
        assert_eq!(parse_shape("Round"), TableShape::Circle);
        assert_eq!(parse_shape("circle"), TableShape::Circle);
        assert_eq!(parse_shape("SQUARE"), TableShape::Square);
        assert_eq!(parse_shape("oval"), TableShape::Oval);
        assert_eq!(parse_shape("Rectangle"), TableShape::Rectangle);
    }

    #[test]
    fn test_unrecognized_shape_defaults_to_rectangle() {
        for token in ["", "hexagon", "rect", "booth"] {
            assert_eq!(parse_shape(token), TableShape::Rectangle, "{token:?}");
        }
    }

    #[test]
    fn test_missing_tokens() {
        assert_eq!(status_of(None), TableStatus::Available);
        assert_eq!(shape_of(None), TableShape::Rectangle);
        assert_eq!(status_of(Some(&RawToken::new("2"))), TableStatus::Occupied);
    }
}
