//! Rectangle shape.

use super::{Appearance, CanvasPoint, ShapeId, ShapeTrait};
use crate::hit::{HitTolerance, point_near_rectangle_border};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Corner style of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CornerStyle {
    #[default]
    Square,
    Rounded,
}

impl CornerStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            CornerStyle::Square => "square",
            CornerStyle::Rounded => "rounded",
        }
    }

    /// Parse a persisted corner label. Anything but `rounded` is square.
    pub fn from_label(label: &str) -> Self {
        if label.trim() == "rounded" {
            CornerStyle::Rounded
        } else {
            CornerStyle::Square
        }
    }
}

/// An axis-aligned rectangle given by two corners.
///
/// Corners are kept as drawn: a rectangle dragged from bottom-right to
/// top-left stores its corners in that order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub(crate) id: ShapeId,
    /// Upper-left corner.
    pub upper_left: CanvasPoint,
    /// Lower-right corner.
    pub lower_right: CanvasPoint,
    /// Corner style.
    pub corner: CornerStyle,
    /// Current visual treatment.
    pub appearance: Appearance,
}

impl Rectangle {
    /// Create a new rectangle.
    pub fn new(upper_left: CanvasPoint, lower_right: CanvasPoint, corner: CornerStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            upper_left,
            lower_right,
            corner,
            appearance: Appearance::normal(),
        }
    }

    pub fn width(&self) -> i32 {
        (self.lower_right.x - self.upper_left.x).abs()
    }

    pub fn height(&self) -> i32 {
        (self.lower_right.y - self.upper_left.y).abs()
    }
}

impl ShapeTrait for Rectangle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn defining_points(&self) -> (CanvasPoint, CanvasPoint) {
        (self.upper_left, self.lower_right)
    }

    fn hit_test(&self, query: CanvasPoint, tolerance: &HitTolerance) -> bool {
        point_near_rectangle_border(self.upper_left, self.lower_right, query, tolerance.rectangle)
    }

    fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    fn appearance_mut(&mut self) -> &mut Appearance {
        &mut self.appearance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_creation() {
        let rect = Rectangle::new(
            CanvasPoint::new(10, 20),
            CanvasPoint::new(110, 70),
            CornerStyle::Rounded,
        );
        assert_eq!(rect.width(), 100);
        assert_eq!(rect.height(), 50);
        assert_eq!(rect.corner, CornerStyle::Rounded);
    }

    #[test]
    fn test_corner_labels() {
        assert_eq!(CornerStyle::from_label("rounded"), CornerStyle::Rounded);
        assert_eq!(CornerStyle::from_label(" rounded\n"), CornerStyle::Rounded);
        assert_eq!(CornerStyle::from_label("square"), CornerStyle::Square);
        assert_eq!(CornerStyle::from_label("bevel"), CornerStyle::Square);
        assert_eq!(CornerStyle::Rounded.as_str(), "rounded");
    }

    #[test]
    fn test_hit_test_border_only() {
        let rect = Rectangle::new(
            CanvasPoint::new(50, 50),
            CanvasPoint::new(150, 150),
            CornerStyle::Square,
        );
        let tolerance = HitTolerance::default();
        assert!(rect.hit_test(CanvasPoint::new(50, 100), &tolerance));
        assert!(rect.hit_test(CanvasPoint::new(100, 148), &tolerance));
        assert!(!rect.hit_test(CanvasPoint::new(100, 100), &tolerance));
    }

    #[test]
    fn test_reversed_corners_are_kept() {
        let rect = Rectangle::new(
            CanvasPoint::new(150, 150),
            CanvasPoint::new(50, 50),
            CornerStyle::Square,
        );
        assert_eq!(rect.upper_left, CanvasPoint::new(150, 150));
        let bounds = rect.bounds();
        assert!((bounds.x0 - 50.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 150.0).abs() < f64::EPSILON);
        // Border ranges are computed from the stored corners, so nothing is hit.
        assert!(!rect.hit_test(CanvasPoint::new(50, 100), &HitTolerance::default()));
    }
}
