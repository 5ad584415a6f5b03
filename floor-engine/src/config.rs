//! Engine configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | FLOOR_GRID_UNIT | 10 | Snap unit for positions and sizes |
//! | FLOOR_MIN_TABLE_SIZE | 40 | Smallest width/height a resize may produce, rounded up to the unit |
//! | FLOOR_FALLBACK_MARGIN | 50 | Margin around synthesized fallback floors |

use serde::{Deserialize, Serialize};

/// Grid and gesture settings shared by widgets and the canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Positions and sizes snap to multiples of this
    pub unit: f64,
    /// Lower bound for resized width/height (a multiple of `unit`)
    pub min_table_size: f64,
    /// Side of the square bottom-right resize handle
    pub resize_handle_size: f64,
    /// Corner radius for square/rectangle tables
    pub corner_radius: f64,
    /// Pointer travel beyond which a press becomes a drag
    pub drag_threshold: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            unit: 10.0,
            min_table_size: 40.0,
            resize_handle_size: 16.0,
            corner_radius: 8.0,
            drag_threshold: 0.0,
        }
    }
}

impl GridConfig {
    /// `min_table_size` rounded up to a multiple of `unit`
    pub fn aligned(mut self) -> Self {
        if self.unit > 0.0 {
            self.min_table_size = (self.min_table_size / self.unit).ceil() * self.unit;
        }
        self
    }
}

/// Defaults applied while normalizing backend data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Width/height for tables that arrive without one
    pub default_table_size: f64,
    /// Space added around the tables of a synthesized floor
    pub fallback_margin: f64,
    pub min_floor_width: f64,
    pub min_floor_height: f64,
    /// Group name for flat-list tables with an empty type
    pub default_zone: String,
    /// Display name of the produced layout
    pub layout_name: String,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            default_table_size: 100.0,
            fallback_margin: 50.0,
            min_floor_width: 800.0,
            min_floor_height: 600.0,
            default_zone: "Main".to_string(),
            layout_name: "Floor plan".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub grid: GridConfig,
    pub normalizer: NormalizerConfig,
}

impl EngineConfig {
    /// Load overrides from the environment; unset or invalid values keep the defaults
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let mut config = Self::default();
        if let Some(unit) = positive_env("FLOOR_GRID_UNIT") {
            config.grid.unit = unit;
        }
        if let Some(min) = positive_env("FLOOR_MIN_TABLE_SIZE") {
            config.grid.min_table_size = min;
        }
        if let Some(margin) = std::env::var("FLOOR_FALLBACK_MARGIN")
            .ok()
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|m| *m >= 0.0)
        {
            config.normalizer.fallback_margin = margin;
        }
        config.grid = config.grid.aligned();
        config
    }
}

fn positive_env(key: &str) -> Option<f64> {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v > 0.0)
}
