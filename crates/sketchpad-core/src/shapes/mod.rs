//! Shape definitions for the drawing surface.

mod group;
mod line;
mod rectangle;

pub use group::Group;
pub use line::Line;
pub use rectangle::{CornerStyle, Rectangle};

use crate::hit::HitTolerance;
use kurbo::Rect;
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for registry entries.
pub type ShapeId = Uuid;

/// An integer point in canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CanvasPoint {
    pub x: i32,
    pub y: i32,
}

impl CanvasPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<CanvasPoint> for kurbo::Point {
    fn from(p: CanvasPoint) -> Self {
        kurbo::Point::new(f64::from(p.x), f64::from(p.y))
    }
}

impl From<(i32, i32)> for CanvasPoint {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for CanvasPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Outline color token. The file format only ever records black.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StrokeColor {
    #[default]
    Black,
    Blue,
}

impl StrokeColor {
    pub fn as_str(self) -> &'static str {
        match self {
            StrokeColor::Black => "black",
            StrokeColor::Blue => "blue",
        }
    }
}

impl From<StrokeColor> for Color {
    fn from(color: StrokeColor) -> Self {
        match color {
            StrokeColor::Black => Color::from_rgba8(0, 0, 0, 255),
            StrokeColor::Blue => Color::from_rgba8(0, 0, 255, 255),
        }
    }
}

/// Dash treatment of an outline.
///
/// `Selection` and `Group` render with the same "3 on, 3 off" pattern; they are
/// kept apart so a group bounding box can be recognized after it was highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Dash {
    #[default]
    Solid,
    Selection,
    Group,
}

impl Dash {
    /// Dash pattern as (on, off) lengths, `None` for a solid stroke.
    pub fn pattern(self) -> Option<(u8, u8)> {
        match self {
            Dash::Solid => None,
            Dash::Selection | Dash::Group => Some((3, 3)),
        }
    }
}

/// Current visual treatment of a registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Appearance {
    pub color: StrokeColor,
    pub dash: Dash,
}

impl Appearance {
    /// Plain black solid outline.
    pub const fn normal() -> Self {
        Self {
            color: StrokeColor::Black,
            dash: Dash::Solid,
        }
    }

    /// Black dashed outline of a selected entry.
    pub const fn selected() -> Self {
        Self {
            color: StrokeColor::Black,
            dash: Dash::Selection,
        }
    }

    /// Blue dashed outline of a group bounding box.
    pub const fn group() -> Self {
        Self {
            color: StrokeColor::Blue,
            dash: Dash::Group,
        }
    }

    pub fn is_dashed(&self) -> bool {
        self.dash.pattern().is_some()
    }

    /// Stroke color for rendering.
    pub fn stroke(&self) -> Color {
        self.color.into()
    }
}

/// Common trait for all registry entries.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// The two defining points: endpoints for a line, corners otherwise.
    fn defining_points(&self) -> (CanvasPoint, CanvasPoint);

    /// Axis-aligned extent in canvas coordinates.
    fn bounds(&self) -> Rect {
        let (a, b) = self.defining_points();
        Rect::from_points(kurbo::Point::from(a), kurbo::Point::from(b))
    }

    /// Check if a query point is "on" this shape.
    fn hit_test(&self, query: CanvasPoint, tolerance: &HitTolerance) -> bool;

    fn appearance(&self) -> &Appearance;

    fn appearance_mut(&mut self) -> &mut Appearance;
}

/// Tagged union of everything the registry stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Line(Line),
    Rectangle(Rectangle),
    Group(Group),
}

impl Shape {
    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Line(s) => s.id(),
            Shape::Rectangle(s) => s.id(),
            Shape::Group(s) => s.id(),
        }
    }

    pub fn defining_points(&self) -> (CanvasPoint, CanvasPoint) {
        match self {
            Shape::Line(s) => s.defining_points(),
            Shape::Rectangle(s) => s.defining_points(),
            Shape::Group(s) => s.defining_points(),
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Line(s) => s.bounds(),
            Shape::Rectangle(s) => s.bounds(),
            Shape::Group(s) => s.bounds(),
        }
    }

    pub fn hit_test(&self, query: CanvasPoint, tolerance: &HitTolerance) -> bool {
        match self {
            Shape::Line(s) => s.hit_test(query, tolerance),
            Shape::Rectangle(s) => s.hit_test(query, tolerance),
            Shape::Group(s) => s.hit_test(query, tolerance),
        }
    }

    pub fn appearance(&self) -> &Appearance {
        match self {
            Shape::Line(s) => s.appearance(),
            Shape::Rectangle(s) => s.appearance(),
            Shape::Group(s) => s.appearance(),
        }
    }

    pub fn appearance_mut(&mut self) -> &mut Appearance {
        match self {
            Shape::Line(s) => s.appearance_mut(),
            Shape::Rectangle(s) => s.appearance_mut(),
            Shape::Group(s) => s.appearance_mut(),
        }
    }

    /// Lines and rectangles; groups are derived entries.
    pub fn is_primitive(&self) -> bool {
        !self.is_group()
    }

    /// Check if this entry is a group.
    pub fn is_group(&self) -> bool {
        matches!(self, Shape::Group(_))
    }

    /// Get the group if this entry is a group.
    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Shape::Group(g) => Some(g),
            _ => None,
        }
    }

    /// Move the second defining point (used while a draw gesture is in progress).
    pub fn set_end_point(&mut self, point: CanvasPoint) {
        match self {
            Shape::Line(l) => l.end = point,
            Shape::Rectangle(r) => r.lower_right = point,
            Shape::Group(_) => {}
        }
    }

    /// Apply the dashed "selected" treatment.
    ///
    /// A rectangle that already carries the group dash keeps it and only turns
    /// black, so [`Shape::restore`] can still tell it apart.
    pub fn highlight(&mut self) {
        match self {
            Shape::Line(l) => l.appearance = Appearance::selected(),
            Shape::Rectangle(_) | Shape::Group(_) => {
                let appearance = self.appearance_mut();
                if appearance.dash == Dash::Group {
                    appearance.color = StrokeColor::Black;
                } else {
                    *appearance = Appearance::selected();
                }
            }
        }
    }

    /// Restore the resting treatment after deselection.
    ///
    /// Rectangles carrying the group dash go back to blue dashed, everything
    /// else to plain black solid.
    pub fn restore(&mut self) {
        match self {
            Shape::Line(l) => l.appearance = Appearance::normal(),
            Shape::Rectangle(_) | Shape::Group(_) => {
                let appearance = self.appearance_mut();
                *appearance = if appearance.dash == Dash::Group {
                    Appearance::group()
                } else {
                    Appearance::normal()
                };
            }
        }
    }
}
