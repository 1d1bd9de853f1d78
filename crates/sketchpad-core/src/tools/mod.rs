//! Tool system for the drawing surface.
//!
//! Pointer input is routed through an explicit [`InteractionMode`] instead of
//! rebinding handlers per gesture.

use crate::registry::ShapeRegistry;
use crate::shapes::{CanvasPoint, CornerStyle, ShapeId};
use crate::selection::SelectionMode;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolKind {
    Line,
    Rectangle,
    /// Click-to-select with the given selection mode.
    Select(SelectionMode),
}

/// What a pointer press currently means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InteractionMode {
    /// No tool armed; presses are ignored.
    #[default]
    Idle,
    DrawingLine,
    DrawingRectangle,
    Selecting,
}

impl From<ToolKind> for InteractionMode {
    fn from(tool: ToolKind) -> Self {
        match tool {
            ToolKind::Line => InteractionMode::DrawingLine,
            ToolKind::Rectangle => InteractionMode::DrawingRectangle,
            ToolKind::Select(_) => InteractionMode::Selecting,
        }
    }
}

/// State of a draw gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolState {
    /// Waiting for a press.
    #[default]
    Idle,
    /// A press created a transient shape that follows the pointer.
    Active {
        /// Press position.
        start: CanvasPoint,
        /// Registry entry being drawn.
        shape: ShapeId,
    },
}

/// Manages the armed tool and any in-progress gesture.
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    mode: InteractionMode,
    state: ToolState,
    /// Corner style applied to new rectangles.
    pub corner: CornerStyle,
}

impl ToolManager {
    /// Create a new tool manager.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn state(&self) -> ToolState {
        self.state
    }

    /// Check if a draw gesture is in progress.
    pub fn is_active(&self) -> bool {
        matches!(self.state, ToolState::Active { .. })
    }

    /// Arm a tool. An in-progress gesture is cancelled and its transient
    /// shape removed from the registry.
    pub fn set_tool(&mut self, tool: ToolKind, registry: &mut ShapeRegistry) {
        self.cancel(registry);
        self.mode = tool.into();
        log::debug!("tool {:?} -> {:?}", tool, self.mode);
    }

    /// Abort the current gesture, discarding its transient shape.
    pub fn cancel(&mut self, registry: &mut ShapeRegistry) {
        if let ToolState::Active { shape, .. } = std::mem::take(&mut self.state) {
            if registry.remove(shape).is_ok() {
                log::debug!("cancelled gesture, discarded {shape}");
            }
        }
    }

    /// Pointer press while drawing: create the transient shape at
    /// (point, point). Returns its identity, or `None` when no draw tool is
    /// armed.
    pub fn begin(&mut self, point: CanvasPoint, registry: &mut ShapeRegistry) -> Option<ShapeId> {
        self.cancel(registry);
        let shape = match self.mode {
            InteractionMode::DrawingLine => registry.add_line(point, point),
            InteractionMode::DrawingRectangle => registry.add_rectangle(point, point, self.corner),
            InteractionMode::Idle | InteractionMode::Selecting => return None,
        };
        self.state = ToolState::Active { start: point, shape };
        Some(shape)
    }

    /// Pointer drag: move the second point of the transient shape.
    pub fn update(&mut self, point: CanvasPoint, registry: &mut ShapeRegistry) {
        if let ToolState::Active { shape, .. } = self.state {
            if let Some(entry) = registry.get_mut(shape) {
                entry.set_end_point(point);
            }
        }
    }

    /// Pointer release: finalize the shape and disarm the draw tool.
    pub fn end(&mut self, point: CanvasPoint, registry: &mut ShapeRegistry) -> Option<ShapeId> {
        let ToolState::Active { start, shape } = std::mem::take(&mut self.state) else {
            return None;
        };
        if let Some(entry) = registry.get_mut(shape) {
            entry.set_end_point(point);
        }
        self.mode = InteractionMode::Idle;
        log::info!("drew {shape} from {start} to {point}");
        Some(shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Shape;

    fn p(x: i32, y: i32) -> CanvasPoint {
        CanvasPoint::new(x, y)
    }

    #[test]
    fn test_tool_manager_creation() {
        let tools = ToolManager::new();
        assert_eq!(tools.mode(), InteractionMode::Idle);
        assert!(!tools.is_active());
        assert_eq!(tools.corner, CornerStyle::Square);
    }

    #[test]
    fn test_line_gesture() {
        let mut registry = ShapeRegistry::new();
        let mut tools = ToolManager::new();
        tools.set_tool(ToolKind::Line, &mut registry);
        assert_eq!(tools.mode(), InteractionMode::DrawingLine);

        let id = tools.begin(p(10, 10), &mut registry).unwrap();
        assert!(tools.is_active());
        assert_eq!(registry.get(id).unwrap().defining_points(), (p(10, 10), p(10, 10)));

        tools.update(p(50, 60), &mut registry);
        assert_eq!(registry.get(id).unwrap().defining_points(), (p(10, 10), p(50, 60)));

        assert_eq!(tools.end(p(100, 100), &mut registry), Some(id));
        assert_eq!(registry.get(id).unwrap().defining_points(), (p(10, 10), p(100, 100)));
        assert_eq!(tools.mode(), InteractionMode::Idle);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_rectangle_uses_corner_style() {
        let mut registry = ShapeRegistry::new();
        let mut tools = ToolManager::new();
        tools.corner = CornerStyle::Rounded;
        tools.set_tool(ToolKind::Rectangle, &mut registry);

        let id = tools.begin(p(0, 0), &mut registry).unwrap();
        tools.end(p(20, 20), &mut registry);

        assert!(matches!(
            registry.get(id),
            Some(Shape::Rectangle(r)) if r.corner == CornerStyle::Rounded && r.lower_right == p(20, 20)
        ));
    }

    #[test]
    fn test_switching_tool_cancels_gesture() {
        let mut registry = ShapeRegistry::new();
        let mut tools = ToolManager::new();
        tools.set_tool(ToolKind::Line, &mut registry);
        let id = tools.begin(p(10, 10), &mut registry).unwrap();

        tools.set_tool(ToolKind::Rectangle, &mut registry);
        assert!(!tools.is_active());
        assert!(!registry.contains(id));
        assert_eq!(tools.mode(), InteractionMode::DrawingRectangle);
    }

    #[test]
    fn test_press_without_draw_tool() {
        let mut registry = ShapeRegistry::new();
        let mut tools = ToolManager::new();
        assert_eq!(tools.begin(p(1, 1), &mut registry), None);

        tools.set_tool(ToolKind::Select(SelectionMode::Single), &mut registry);
        assert_eq!(tools.mode(), InteractionMode::Selecting);
        assert_eq!(tools.begin(p(1, 1), &mut registry), None);
        assert_eq!(tools.end(p(1, 1), &mut registry), None);
        assert!(registry.is_empty());
    }
}
