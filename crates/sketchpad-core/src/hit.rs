//! Point hit-testing.
//!
//! Everything here is pure: no registry access, no mutation. "No match" is an
//! absent result, never an error.

use crate::shapes::{CanvasPoint, Shape, ShapeId};
use serde::{Deserialize, Serialize};

/// Default distance within which a point counts as on a line.
pub const LINE_HIT_THRESHOLD: f64 = 5.0;
/// Default distance within which a point counts as on a rectangle border.
pub const RECTANGLE_HIT_THRESHOLD: f64 = 10.0;

/// Hit distances for lines and rectangle borders.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitTolerance {
    pub line: f64,
    pub rectangle: f64,
}

impl Default for HitTolerance {
    fn default() -> Self {
        Self {
            line: LINE_HIT_THRESHOLD,
            rectangle: RECTANGLE_HIT_THRESHOLD,
        }
    }
}

/// True iff the clamped distance from `query` to segment `p1 -> p2` is at most
/// `threshold`.
///
/// A degenerate segment (`p1 == p2`) only matches its exact point; the
/// threshold is not applied.
pub fn point_near_segment(p1: CanvasPoint, p2: CanvasPoint, query: CanvasPoint, threshold: f64) -> bool {
    if p1 == p2 {
        return query == p1;
    }

    let a = kurbo::Point::from(p1);
    let q = kurbo::Point::from(query);
    let seg = kurbo::Point::from(p2) - a;
    let pv = q - a;

    let t = (pv.dot(seg) / seg.hypot2()).clamp(0.0, 1.0);
    let closest = a + seg * t;
    (q - closest).hypot() <= threshold
}

/// Border test using independent axis checks.
///
/// A point hits a vertical edge when it is within `threshold` of either x
/// coordinate and strictly inside the y range shrunk by `threshold`;
/// horizontal edges symmetrically. Comparisons are strict, the corner zones
/// are blind, and the ranges assume `top_left` really is the smaller corner.
pub fn point_near_rectangle_border(
    top_left: CanvasPoint,
    bottom_right: CanvasPoint,
    query: CanvasPoint,
    threshold: f64,
) -> bool {
    let (x1, y1) = (f64::from(top_left.x), f64::from(top_left.y));
    let (x2, y2) = (f64::from(bottom_right.x), f64::from(bottom_right.y));
    let (x, y) = (f64::from(query.x), f64::from(query.y));

    let near_vertical = (x - x1).abs().min((x - x2).abs()) < threshold;
    let within_rows = y > y1 + threshold && y < y2 - threshold;
    if near_vertical && within_rows {
        return true;
    }

    let near_horizontal = (y - y1).abs().min((y - y2).abs()) < threshold;
    let within_columns = x > x1 + threshold && x < x2 - threshold;
    near_horizontal && within_columns
}

/// Resolve a query point against shapes in order with default tolerances.
pub fn resolve<'a, I>(query: CanvasPoint, shapes: I) -> Option<ShapeId>
where
    I: IntoIterator<Item = &'a Shape>,
    I::IntoIter: Clone,
{
    resolve_with(query, shapes, &HitTolerance::default())
}

/// Resolve a query point: the first line hit wins; only when no line matches
/// is the first rectangle (or group bounding box) hit returned.
pub fn resolve_with<'a, I>(query: CanvasPoint, shapes: I, tolerance: &HitTolerance) -> Option<ShapeId>
where
    I: IntoIterator<Item = &'a Shape>,
    I::IntoIter: Clone,
{
    let shapes = shapes.into_iter();

    let line_hit = shapes
        .clone()
        .filter(|s| matches!(s, Shape::Line(_)))
        .find(|s| s.hit_test(query, tolerance));
    if let Some(line) = line_hit {
        log::debug!("hit line {} at {}", line.id(), query);
        return Some(line.id());
    }

    let rect_hit = shapes
        .filter(|s| !matches!(s, Shape::Line(_)))
        .find(|s| s.hit_test(query, tolerance))
        .map(Shape::id);
    match rect_hit {
        Some(id) => log::debug!("hit rectangle {} at {}", id, query),
        None => log::debug!("no hit at {}", query),
    }
    rect_hit
}

/// First hits of a query point, one per hit-test pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hits {
    /// First line hit in order.
    pub line: Option<ShapeId>,
    /// First rectangle or group bounding box hit in order.
    pub rectangle: Option<ShapeId>,
}

impl Hits {
    /// The hit a single-entry selection takes: the line when there is one.
    pub fn resolved(&self) -> Option<ShapeId> {
        self.line.or(self.rectangle)
    }
}

/// Run both hit-test passes without letting a line hit short-circuit the
/// rectangle pass.
pub fn hits_with<'a, I>(query: CanvasPoint, shapes: I, tolerance: &HitTolerance) -> Hits
where
    I: IntoIterator<Item = &'a Shape>,
    I::IntoIter: Clone,
{
    let shapes = shapes.into_iter();
    let first = |lines: bool| {
        shapes
            .clone()
            .filter(|s| matches!(s, Shape::Line(_)) == lines)
            .find(|s| s.hit_test(query, tolerance))
            .map(Shape::id)
    };
    let hits = Hits {
        line: first(true),
        rectangle: first(false),
    };
    log::debug!("hits at {}: {:?}", query, hits);
    hits
}
