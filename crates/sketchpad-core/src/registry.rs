//! Shape registry: the canonical, ordered store of every entry on the canvas.

use crate::error::{CanvasError, CanvasResult};
use crate::shapes::{CanvasPoint, CornerStyle, Group, Line, Rectangle, Shape, ShapeId};
use kurbo::Rect;
use std::collections::HashMap;

/// Owns all lines, rectangles and groups.
///
/// Entries are kept in insertion order. Shapes absorbed into a group stay in
/// the registry (and keep their position in that order) but are no longer
/// top-level: they are skipped by [`ShapeRegistry::all`] and cannot be removed
/// directly until their group is gone.
#[derive(Debug, Clone, Default)]
pub struct ShapeRegistry {
    /// All entries, keyed by ID.
    shapes: HashMap<ShapeId, Shape>,
    /// Insertion order of entries.
    order: Vec<ShapeId>,
    /// Member ID -> owning group ID.
    memberships: HashMap<ShapeId, ShapeId>,
}

impl ShapeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new line and return its identity.
    pub fn add_line(&mut self, start: CanvasPoint, end: CanvasPoint) -> ShapeId {
        self.insert(Shape::Line(Line::new(start, end)))
    }

    /// Append a new rectangle and return its identity.
    pub fn add_rectangle(
        &mut self,
        upper_left: CanvasPoint,
        lower_right: CanvasPoint,
        corner: CornerStyle,
    ) -> ShapeId {
        self.insert(Shape::Rectangle(Rectangle::new(upper_left, lower_right, corner)))
    }

    /// Append a group entry. Its members stop being top-level.
    pub(crate) fn add_group(&mut self, group: Group) -> ShapeId {
        let group_id = group.id;
        for &member in group.members() {
            self.memberships.insert(member, group_id);
        }
        self.insert(Shape::Group(group))
    }

    fn insert(&mut self, shape: Shape) -> ShapeId {
        let id = shape.id();
        log::debug!("registered {id}");
        self.order.push(id);
        self.shapes.insert(id, shape);
        id
    }

    /// Remove a top-level entry.
    ///
    /// Removing a group releases its members back to top level at their
    /// original positions.
    pub fn remove(&mut self, id: ShapeId) -> CanvasResult<Shape> {
        if !self.is_top_level(id) {
            return Err(CanvasError::NotFound(id));
        }
        let shape = self.shapes.remove(&id).ok_or(CanvasError::NotFound(id))?;
        self.order.retain(|&entry| entry != id);

        if let Shape::Group(group) = &shape {
            for member in group.members() {
                self.memberships.remove(member);
            }
        }
        log::debug!("removed {id}");
        Ok(shape)
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.order.clear();
        self.memberships.clear();
    }

    /// Get any entry by ID, top-level or grouped.
    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    /// Get a mutable reference to any entry by ID.
    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(&id)
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.shapes.contains_key(&id)
    }

    /// Check if an entry exists and is not absorbed into a group.
    pub fn is_top_level(&self, id: ShapeId) -> bool {
        self.contains(id) && !self.memberships.contains_key(&id)
    }

    /// The group currently owning a member, if any.
    pub fn group_of(&self, member: ShapeId) -> Option<ShapeId> {
        self.memberships.get(&member).copied()
    }

    /// Top-level entries in insertion order.
    pub fn all(&self) -> impl Iterator<Item = &Shape> + Clone + '_ {
        self.order
            .iter()
            .filter(|id| !self.memberships.contains_key(*id))
            .filter_map(|id| self.shapes.get(id))
    }

    /// Every line and rectangle, grouped or not, in insertion order.
    pub fn primitives(&self) -> impl Iterator<Item = &Shape> + Clone + '_ {
        self.order
            .iter()
            .filter_map(|id| self.shapes.get(id))
            .filter(|shape| shape.is_primitive())
    }

    /// Number of top-level entries.
    pub fn len(&self) -> usize {
        self.all().count()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Get the bounding box of all top-level entries.
    pub fn bounds(&self) -> Option<Rect> {
        self.all()
            .map(Shape::bounds)
            .reduce(|acc, bounds| acc.union(bounds))
    }
}
