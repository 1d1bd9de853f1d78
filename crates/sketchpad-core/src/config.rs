//! Canvas configuration.

use crate::hit::{HitTolerance, LINE_HIT_THRESHOLD, RECTANGLE_HIT_THRESHOLD};
use crate::shapes::CanvasPoint;
use serde::{Deserialize, Serialize};

/// Canvas configuration. Missing JSON fields take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
    /// Hit distance for lines.
    pub line_tolerance: f64,
    /// Hit distance for rectangle and group borders.
    pub rectangle_tolerance: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            line_tolerance: LINE_HIT_THRESHOLD,
            rectangle_tolerance: RECTANGLE_HIT_THRESHOLD,
        }
    }
}

impl CanvasConfig {
    /// Parse from a JSON object.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn hit_tolerance(&self) -> HitTolerance {
        HitTolerance {
            line: self.line_tolerance,
            rectangle: self.rectangle_tolerance,
        }
    }

    /// Check if a point lies on the visible canvas. Points outside are still
    /// valid geometry.
    pub fn contains(&self, point: CanvasPoint) -> bool {
        let inside = |v: i32, max: u32| v >= 0 && i64::from(v) < i64::from(max);
        inside(point.x, self.width) && inside(point.y, self.height)
    }
}
