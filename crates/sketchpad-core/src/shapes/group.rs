//! Group entry: a bounding box over member shapes.

use super::{Appearance, CanvasPoint, ShapeId, ShapeTrait};
use crate::hit::{HitTolerance, point_near_rectangle_border};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A flat group of shapes selected and hit-tested as a single unit.
///
/// The bounding box is fixed at creation; members never move, so it stays
/// equal to the extent of its members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub(crate) id: ShapeId,
    /// Upper-left corner of the bounding box.
    pub upper_left: CanvasPoint,
    /// Lower-right corner of the bounding box.
    pub lower_right: CanvasPoint,
    members: Vec<ShapeId>,
    /// Current visual treatment.
    pub appearance: Appearance,
}

impl Group {
    /// Create a new group with a blue dashed bounding box.
    pub fn new(upper_left: CanvasPoint, lower_right: CanvasPoint, members: Vec<ShapeId>) -> Self {
        Self {
            id: Uuid::new_v4(),
            upper_left,
            lower_right,
            members,
            appearance: Appearance::group(),
        }
    }

    /// Member identities in grouping order.
    pub fn members(&self) -> &[ShapeId] {
        &self.members
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.members.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl ShapeTrait for Group {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn defining_points(&self) -> (CanvasPoint, CanvasPoint) {
        (self.upper_left, self.lower_right)
    }

    /// Groups are hit on their bounding box border, exactly like rectangles.
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
