//! Grid quantization
//!
//! All position/size arithmetic of the engine lives here so the widget, the
//! host-side delta application and tests agree on one definition.

use shared::models::{Position, Size};

use crate::config::GridConfig;

/// Nearest multiple of `unit` (round-to-nearest, not truncation)
pub fn snap(value: f64, unit: f64) -> f64 {
    if unit <= 0.0 || !value.is_finite() {
        return value;
    }
    let snapped = (value / unit).round() * unit;
    // avoid -0.0 leaking into serialized output
    if snapped == 0.0 { 0.0 } else { snapped }
}

/// Largest multiple of `unit` not above `limit`
fn grid_floor(limit: f64, unit: f64) -> f64 {
    if unit <= 0.0 {
        return limit;
    }
    (limit / unit).floor() * unit
}

/// Drag-end position: snapped, then clamped into `[0, bounds]`
///
/// The upper clamp stays on the grid, so the result is always a multiple of
/// the unit even when the floor size is not.
pub fn snap_position(origin: Position, dx: f64, dy: f64, bounds: Size, grid: &GridConfig) -> Position {
    snap_into_bounds(origin.offset(dx, dy), bounds, grid)
}

/// Any position onto the grid and into `[0, bounds]`, upper clamp on the grid
pub fn snap_into_bounds(position: Position, bounds: Size, grid: &GridConfig) -> Position {
    let clamp_axis = |v: f64, limit: f64| {
        let max = grid_floor(limit.max(0.0), grid.unit);
        snap(v, grid.unit).clamp(0.0, max)
    };
    Position::new(
        clamp_axis(position.x, bounds.width),
        clamp_axis(position.y, bounds.height),
    )
}

/// One resized dimension: `max(min, round((start + delta) / unit) * unit)`
pub fn snap_dimension(start: f64, delta: f64, grid: &GridConfig) -> f64 {
    snap(start + delta, grid.unit).max(grid.min_table_size)
}

pub fn snap_size(start: Size, dx: f64, dy: f64, grid: &GridConfig) -> Size {
    Size::new(
        snap_dimension(start.width, dx, grid),
        snap_dimension(start.height, dy, grid),
    )
}


#[cfg(test)]
mod tests {
    use super::*;

    const FLOOR: Size = Size::new(800.0, 600.0);

    fn grid() -> GridConfig {
        GridConfig::default()
    }

    fn is_multiple(v: f64, unit: f64) -> bool {
        (v / unit).fract() == 0.0
    }

    #[test]
    fn test_snap_rounds_to_nearest() {
        assert_eq!(snap(123.0, 10.0), 120.0);
        assert_eq!(snap(96.0, 10.0), 100.0);
        assert_eq!(snap(125.0, 10.0), 130.0);
        assert_eq!(snap(124.9, 10.0), 120.0);
    }

    #[test]
    fn test_drag_end_rounds_each_axis() {
        let end = snap_position(Position::new(100.0, 100.0), 23.0, -4.0, FLOOR, &grid());
        assert_eq!(end, Position::new(120.0, 100.0));
    }

    #[test]
    fn test_snap_idempotent_on_grid_points() {
        for x in (0..=800).step_by(10) {
            for y in (0..=600).step_by(30) {
                let p = Position::new(x as f64, y as f64);
                assert_eq!(snap_position(p, 0.0, 0.0, FLOOR, &grid()), p);
            }
        }
    }

    #[test]
    fn test_clamp_totality() {
        let origin = Position::new(30.0, 20.0);
        for dx in (-2000..=2000).step_by(37) {
            for dy in (-2000..=2000).step_by(41) {
                let p = snap_position(origin, dx as f64, dy as f64, FLOOR, &grid());
                assert!(p.x >= 0.0 && p.y >= 0.0, "{p:?}");
                assert!(p.x <= FLOOR.width && p.y <= FLOOR.height, "{p:?}");
                assert!(is_multiple(p.x, 10.0) && is_multiple(p.y, 10.0), "{p:?}");
            }
        }
    }

    #[test]
    fn test_upper_clamp_stays_on_grid() {
        let odd = Size::new(805.0, 597.0);
        let p = snap_position(Position::new(790.0, 590.0), 500.0, 500.0, odd, &grid());
        assert_eq!(p, Position::new(800.0, 590.0));
    }

    #[test]
    fn test_arbitrary_position_lands_on_grid() {
        let p = snap_into_bounds(Position::new(123.0, 97.0), FLOOR, &grid());
        assert_eq!(p, Position::new(120.0, 100.0));

        let odd = Size::new(805.0, 597.0);
        let p = snap_into_bounds(Position::new(2000.0, -30.0), odd, &grid());
        assert_eq!(p, Position::new(800.0, 0.0));
    }

    #[test]
    fn test_negative_half_does_not_produce_negative_zero() {
        let p = snap_position(Position::new(0.0, 0.0), -4.0, -5.0, FLOOR, &grid());
        assert!(p.x.is_sign_positive() && p.y.is_sign_positive());
    }

    #[test]
    fn test_resize_floor() {
        let start = Size::new(80.0, 80.0);
        for dx in (-300..=300).step_by(7) {
            for dy in (-300..=300).step_by(11) {
                let s = snap_size(start, dx as f64, dy as f64, &grid());
                assert!(s.width >= 40.0 && s.height >= 40.0, "{s:?}");
                assert!(is_multiple(s.width, 10.0) && is_multiple(s.height, 10.0), "{s:?}");
            }
        }
    }

    #[test]
    fn test_resize_clamps_to_minimum() {
        let s = snap_size(Size::new(80.0, 80.0), 37.0, -70.0, &grid());
        assert_eq!(s, Size::new(120.0, 40.0));
    }
}
