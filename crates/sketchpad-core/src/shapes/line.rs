//! Line shape.

use super::{Appearance, CanvasPoint, ShapeId, ShapeTrait};
use crate::hit::{HitTolerance, point_near_segment};
use kurbo::Line as KurboLine;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A straight line segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub(crate) id: ShapeId,
    /// Start point.
    pub start: CanvasPoint,
    /// End point.
    pub end: CanvasPoint,
    /// Current visual treatment.
    pub appearance: Appearance,
}

impl Line {
    /// Create a new line.
    pub fn new(start: CanvasPoint, end: CanvasPoint) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            appearance: Appearance::normal(),
        }
    }

    /// A line whose endpoints coincide. Only hit by its exact point.
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    /// Get the length of the line.
    pub fn length(&self) -> f64 {
        self.as_kurbo().length()
    }

    /// Get as a kurbo Line.
    pub fn as_kurbo(&self) -> KurboLine {
        KurboLine::new(self.start, self.end)
    }
}

impl ShapeTrait for Line {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn defining_points(&self) -> (CanvasPoint, CanvasPoint) {
        (self.start, self.end)
    }

    fn hit_test(&self, query: CanvasPoint, tolerance: &HitTolerance) -> bool {
        point_near_segment(self.start, self.end, query, tolerance.line)
    }

    fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    fn appearance_mut(&mut self) -> &mut Appearance {
        &mut self.appearance
    }
}
