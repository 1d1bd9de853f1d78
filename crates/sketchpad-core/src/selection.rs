//! Selection state and highlight handling.

use crate::error::{CanvasError, CanvasResult};
use crate::hit::{HitTolerance, hits_with};
use crate::registry::ShapeRegistry;
use crate::shapes::{CanvasPoint, Shape, ShapeId};
use serde::{Deserialize, Serialize};

/// How clicks affect the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SelectionMode {
    /// Each click replaces the selection.
    Single,
    /// Clicks accumulate.
    #[default]
    Multi,
}

/// Tracks selected entries and keeps their visual treatment in sync.
///
/// The selection is an ordered sequence and is not deduplicated: clicking the
/// same shape twice in multi mode selects it twice. A selected group stays a
/// single entry, but highlighting goes to its members and not to its
/// bounding box.
#[derive(Debug, Clone, Default)]
pub struct SelectionManager {
    mode: SelectionMode,
    selected: Vec<ShapeId>,
}

impl SelectionManager {
    /// Create a new selection manager.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Selected entries in selection order.
    pub fn selected(&self) -> &[ShapeId] {
        &self.selected
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Switch mode. Always clears the current selection, even when the mode
    /// does not change.
    pub fn set_mode(&mut self, mode: SelectionMode, registry: &mut ShapeRegistry) {
        self.clear(registry);
        self.mode = mode;
        log::debug!("selection mode {:?}", mode);
    }

    /// Resolve a click and update the selection. Returns the last entry
    /// added, if any.
    ///
    /// Single mode clears first and takes one hit, a line before any
    /// rectangle. Multi mode appends the first line hit and then the first
    /// rectangle hit. Hitting a group's bounding box replaces the whole
    /// selection with that group in either mode.
    pub fn click(
        &mut self,
        registry: &mut ShapeRegistry,
        query: CanvasPoint,
        tolerance: &HitTolerance,
    ) -> Option<ShapeId> {
        let hits = hits_with(query, registry.all(), tolerance);
        let picked: Vec<ShapeId> = match self.mode {
            SelectionMode::Single => {
                self.clear(registry);
                hits.resolved().into_iter().collect()
            }
            SelectionMode::Multi => hits.line.into_iter().chain(hits.rectangle).collect(),
        };

        let mut last = None;
        for id in picked {
            if registry.get(id).is_some_and(Shape::is_group) {
                self.clear(registry);
            }
            self.selected.push(id);
            last = Some(id);
        }
        self.highlight(registry);
        last
    }

    /// Replace the selection with one entry per member of `group` and
    /// highlight each member.
    pub fn select_group(&mut self, registry: &mut ShapeRegistry, group: ShapeId) -> CanvasResult<()> {
        let members = registry
            .get(group)
            .and_then(Shape::as_group)
            .map(|g| g.members().to_vec())
            .ok_or(CanvasError::NotFound(group))?;

        self.clear(registry);
        self.selected.extend(members);
        self.highlight(registry);
        Ok(())
    }

    /// IDs that carry the highlight: selected shapes, with groups expanded
    /// to their members.
    pub fn highlighted_ids(&self, registry: &ShapeRegistry) -> Vec<ShapeId> {
        let mut ids = Vec::new();
        for &id in &self.selected {
            match registry.get(id) {
                Some(Shape::Group(group)) => ids.extend_from_slice(group.members()),
                Some(_) => ids.push(id),
                None => {}
            }
        }
        ids
    }

    /// Apply the dashed treatment to every selected entry.
    pub fn highlight(&self, registry: &mut ShapeRegistry) {
        for id in self.highlighted_ids(registry) {
            if let Some(shape) = registry.get_mut(id) {
                shape.highlight();
            }
        }
    }

    /// Restore the resting treatment of every selected entry, then empty the
    /// selection.
    pub fn clear(&mut self, registry: &mut ShapeRegistry) {
        for id in std::mem::take(&mut self.selected) {
            let members = match registry.get(id) {
                Some(Shape::Group(group)) => group.members().to_vec(),
                Some(_) => Vec::new(),
                None => {
                    log::debug!("selected entry {id} no longer exists");
                    continue;
                }
            };
            for member in members.into_iter().chain(std::iter::once(id)) {
                if let Some(shape) = registry.get_mut(member) {
                    shape.restore();
                }
            }
        }
    }
}
