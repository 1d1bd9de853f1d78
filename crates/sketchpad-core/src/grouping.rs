//! Group composition and decomposition over the current selection.

use crate::error::{CanvasError, CanvasResult};
use crate::registry::ShapeRegistry;
use crate::selection::SelectionManager;
use crate::shapes::{CanvasPoint, Group, Shape, ShapeId};

/// Group the selected entries into a new group and return its identity.
///
/// Selected groups are flattened into their members and dissolved, so
/// regrouping an existing group with more shapes yields one flat group. The
/// new entry is appended at the end of the registry order and the selection
/// is cleared. Nothing is touched on failure.
pub fn group(registry: &mut ShapeRegistry, selection: &mut SelectionManager) -> CanvasResult<ShapeId> {
    let entries = selection.selected();
    if entries.len() < 2 {
        return Err(CanvasError::InsufficientSelection(entries.len()));
    }

    let mut members: Vec<ShapeId> = Vec::new();
    let mut dissolved: Vec<ShapeId> = Vec::new();
    for &id in entries {
        match registry.get(id) {
            Some(Shape::Group(existing)) => {
                if !dissolved.contains(&id) {
                    dissolved.push(id);
                }
                members.extend_from_slice(existing.members());
            }
            Some(_) => {
                // A member selected on its own still belongs to its group.
                if let Some(owner) = registry.group_of(id) {
                    if !dissolved.contains(&owner) {
                        dissolved.push(owner);
                    }
                }
                members.push(id);
            }
            None => return Err(CanvasError::NotFound(id)),
        }
    }

    let mut seen = std::collections::HashSet::new();
    members.retain(|id| seen.insert(*id));
    if members.len() < 2 {
        return Err(CanvasError::InsufficientSelection(members.len()));
    }

    let (upper_left, lower_right) = member_extent(registry, &members)?;

    selection.clear(registry);
    for old in dissolved {
        registry.remove(old)?;
        log::debug!("dissolved group {old}");
    }
    let id = registry.add_group(Group::new(upper_left, lower_right, members));
    log::info!("grouped into {id} spanning {upper_left}-{lower_right}");
    Ok(id)
}

/// Dissolve the selected group.
///
/// Only acts when the selection is exactly one group entry; anything else is
/// a no-op that leaves the selection alone. Returns the released members.
pub fn ungroup(
    registry: &mut ShapeRegistry,
    selection: &mut SelectionManager,
) -> CanvasResult<Option<Vec<ShapeId>>> {
    let &[id] = selection.selected() else {
        log::debug!("ungroup ignored: {} entries selected", selection.len());
        return Ok(None);
    };
    if !matches!(registry.get(id), Some(Shape::Group(_))) {
        log::debug!("ungroup ignored: {id} is not a group");
        return Ok(None);
    }

    selection.clear(registry);
    let removed = registry.remove(id)?;
    let members = removed.as_group().map(|g| g.members().to_vec());
    log::info!("ungrouped {id}");
    Ok(members)
}

/// Min/max over both defining points of every member.
fn member_extent(registry: &ShapeRegistry, members: &[ShapeId]) -> CanvasResult<(CanvasPoint, CanvasPoint)> {
    let mut min = CanvasPoint::new(i32::MAX, i32::MAX);
    let mut max = CanvasPoint::new(i32::MIN, i32::MIN);
    for &id in members {
        let (a, b) = registry
            .get(id)
            .map(Shape::defining_points)
            .ok_or(CanvasError::NotFound(id))?;
        for point in [a, b] {
            min.x = min.x.min(point.x);
            min.y = min.y.min(point.y);
            max.x = max.x.max(point.x);
            max.y = max.y.max(point.y);
        }
    }
    Ok((min, max))
}
