//! Canvas: the owned state that input is routed through.

use crate::config::CanvasConfig;
use crate::error::CanvasResult;
use crate::grouping;
use crate::registry::ShapeRegistry;
use crate::selection::{SelectionManager, SelectionMode};
use crate::shapes::{CanvasPoint, CornerStyle, ShapeId};
use crate::storage::{DrawingFile, Storage};
use crate::tools::{InteractionMode, ToolKind, ToolManager};

/// Runtime canvas state.
///
/// Aggregates the shape registry, the selection, the armed tool and the
/// configuration. Everything is plain owned data driven from a single thread.
#[derive(Debug, Clone, Default)]
pub struct Canvas {
    registry: ShapeRegistry,
    selection: SelectionManager,
    tools: ToolManager,
    /// Canvas size and hit distances.
    pub config: CanvasConfig,
}

impl Canvas {
    /// Create a new canvas with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CanvasConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn registry(&self) -> &ShapeRegistry {
        &self.registry
    }

    pub fn selection(&self) -> &SelectionManager {
        &self.selection
    }

    pub fn tools(&self) -> &ToolManager {
        &self.tools
    }

    /// Arm a tool. Selection tools also switch the selection mode, which
    /// clears the current selection.
    pub fn activate_tool(&mut self, tool: ToolKind) {
        self.tools.set_tool(tool, &mut self.registry);
        if let ToolKind::Select(mode) = tool {
            self.selection.set_mode(mode, &mut self.registry);
        }
    }

    /// Switch to selecting with the given mode.
    pub fn set_selection_mode(&mut self, mode: SelectionMode) {
        self.activate_tool(ToolKind::Select(mode));
    }

    /// Corner style for rectangles drawn from now on.
    pub fn set_corner_style(&mut self, corner: CornerStyle) {
        self.tools.corner = corner;
    }

    fn note_bounds(&self, point: CanvasPoint) {
        if !self.config.contains(point) {
            log::debug!(
                "{point} is outside the {}x{} canvas",
                self.config.width,
                self.config.height
            );
        }
    }

    /// Pointer press. Starts a draw gesture or performs a selection click,
    /// depending on the armed tool.
    pub fn pointer_down(&mut self, point: CanvasPoint) -> Option<ShapeId> {
        self.note_bounds(point);
        match self.tools.mode() {
            InteractionMode::Selecting => self.click(point),
            InteractionMode::DrawingLine | InteractionMode::DrawingRectangle => {
                self.tools.begin(point, &mut self.registry)
            }
            InteractionMode::Idle => None,
        }
    }

    /// Pointer drag.
    pub fn pointer_move(&mut self, point: CanvasPoint) {
        self.note_bounds(point);
        self.tools.update(point, &mut self.registry);
    }

    /// Pointer release. Returns the finished shape of a draw gesture.
    pub fn pointer_up(&mut self, point: CanvasPoint) -> Option<ShapeId> {
        self.note_bounds(point);
        self.tools.end(point, &mut self.registry)
    }

    /// Resolve a click and update the selection.
    pub fn click(&mut self, point: CanvasPoint) -> Option<ShapeId> {
        let tolerance = self.config.hit_tolerance();
        self.selection.click(&mut self.registry, point, &tolerance)
    }

    /// Replace the selection with the members of `group`.
    pub fn select_group(&mut self, group: ShapeId) -> CanvasResult<()> {
        self.selection.select_group(&mut self.registry, group)
    }

    /// Clear the selection, restoring the resting appearance of its entries.
    pub fn clear_selection(&mut self) {
        self.selection.clear(&mut self.registry);
    }

    /// Group the current selection.
    pub fn group_selected(&mut self) -> CanvasResult<ShapeId> {
        grouping::group(&mut self.registry, &mut self.selection)
    }

    /// Ungroup the selected group, if exactly one is selected.
    pub fn ungroup_selected(&mut self) -> CanvasResult<Option<Vec<ShapeId>>> {
        grouping::ungroup(&mut self.registry, &mut self.selection)
    }

    /// The persisted form of the current scene.
    pub fn to_drawing(&self) -> DrawingFile {
        DrawingFile::from_registry(&self.registry)
    }

    /// Save every primitive, grouped or not, in insertion order.
    pub fn save(&self, storage: &dyn Storage, key: &str) -> CanvasResult<()> {
        storage.save(key, &self.to_drawing())?;
        Ok(())
    }

    /// Replace the scene with a stored drawing. Returns the number of shapes
    /// loaded.
    ///
    /// A document that cannot be read or parsed leaves the scene untouched.
    /// Once parsed, the scene is cleared and elements are added one by one; an
    /// element with unusable content aborts the load with the earlier
    /// elements already in place. Unknown elements are skipped.
    pub fn load(&mut self, storage: &dyn Storage, key: &str) -> CanvasResult<usize> {
        let drawing = storage.load(key)?;

        self.tools.cancel(&mut self.registry);
        self.selection.clear(&mut self.registry);
        self.registry.clear();

        let mut loaded = 0;
        for element in &drawing.elements {
            if element.add_to(&mut self.registry)?.is_some() {
                loaded += 1;
            }
        }
        log::info!("loaded {loaded} shapes from {key}");
        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CanvasError;
    use crate::shapes::{Appearance, Shape};
    use crate::storage::{MemoryStorage, StorageError};

    fn p(x: i32, y: i32) -> CanvasPoint {
        CanvasPoint::new(x, y)
    }

    fn draw(canvas: &mut Canvas, tool: ToolKind, from: CanvasPoint, to: CanvasPoint) -> ShapeId {
        canvas.activate_tool(tool);
        canvas.pointer_down(from).unwrap();
        canvas.pointer_move(to);
        canvas.pointer_up(to).unwrap()
    }

    fn scene() -> (Canvas, ShapeId, ShapeId) {
        let mut canvas = Canvas::new();
        let line = draw(&mut canvas, ToolKind::Line, p(10, 10), p(100, 100));
        let rect = draw(&mut canvas, ToolKind::Rectangle, p(50, 50), p(150, 150));
        (canvas, line, rect)
    }

    #[test]
    fn test_draw_gestures() {
        let (canvas, line, rect) = scene();
        assert_eq!(canvas.registry().len(), 2);
        assert_eq!(canvas.tools().mode(), InteractionMode::Idle);
        assert!(matches!(canvas.registry().get(line), Some(Shape::Line(l)) if l.end == p(100, 100)));
        assert!(matches!(
            canvas.registry().get(rect),
            Some(Shape::Rectangle(r)) if r.corner == CornerStyle::Square && r.lower_right == p(150, 150)
        ));
    }

    #[test]
    fn test_press_after_gesture_is_ignored() {
        let (mut canvas, _, _) = scene();
        assert_eq!(canvas.pointer_down(p(5, 5)), None);
        assert_eq!(canvas.registry().len(), 2);
    }

    #[test]
    fn test_group_scenario() {
        let (mut canvas, line, rect) = scene();
        canvas.set_selection_mode(SelectionMode::Multi);

        assert_eq!(canvas.pointer_down(p(55, 55)), Some(line));
        assert_eq!(canvas.pointer_down(p(50, 100)), Some(rect));
        let group = canvas.group_selected().unwrap();

        let entry = canvas.registry().get(group).and_then(Shape::as_group).unwrap();
        assert_eq!((entry.upper_left, entry.lower_right), (p(10, 10), p(150, 150)));
        assert_eq!(entry.members(), &[line, rect]);
        assert!(canvas.selection().is_empty());

        // Selecting mode persists: the next press clicks the group box.
        assert_eq!(canvas.pointer_down(p(12, 80)), Some(group));
        assert_eq!(canvas.ungroup_selected().unwrap(), Some(vec![line, rect]));
        assert_eq!(canvas.click(p(55, 55)), Some(line));
    }

    #[test]
    fn test_tool_switch_clears_selection() {
        let (mut canvas, line, _) = scene();
        canvas.set_selection_mode(SelectionMode::Multi);
        canvas.click(p(55, 55));
        assert_eq!(*canvas.registry().get(line).unwrap().appearance(), Appearance::selected());

        canvas.set_selection_mode(SelectionMode::Single);
        assert!(canvas.selection().is_empty());
        assert_eq!(*canvas.registry().get(line).unwrap().appearance(), Appearance::normal());
    }

    #[test]
    fn test_custom_tolerance() {
        let config = CanvasConfig {
            line_tolerance: 20.0,
            ..CanvasConfig::default()
        };
        let mut canvas = Canvas::with_config(config);
        let line = draw(&mut canvas, ToolKind::Line, p(0, 0), p(100, 0));
        assert_eq!(canvas.click(p(50, 15)), Some(line));
    }

    #[test]
    fn test_rounded_rectangle_round_trip() {
        let storage = MemoryStorage::new();
        let mut canvas = Canvas::new();
        canvas.set_corner_style(CornerStyle::Rounded);
        draw(&mut canvas, ToolKind::Rectangle, p(0, 0), p(20, 20));
        canvas.save(&storage, "scene").unwrap();

        let mut reloaded = Canvas::new();
        assert_eq!(reloaded.load(&storage, "scene").unwrap(), 1);
        let shapes: Vec<_> = reloaded.registry().all().collect();
        assert!(matches!(
            shapes.as_slice(),
            [Shape::Rectangle(r)]
                if r.corner == CornerStyle::Rounded
                    && r.upper_left == p(0, 0)
                    && r.lower_right == p(20, 20)
        ));
    }

    #[test]
    fn test_groups_are_saved_as_members() {
        let storage = MemoryStorage::new();
        let (mut canvas, _, _) = scene();
        canvas.click(p(55, 55));
        canvas.click(p(50, 100));
        canvas.group_selected().unwrap();
        canvas.save(&storage, "scene").unwrap();

        let xml = storage.raw("scene").unwrap();
        assert!(!xml.contains("group"));

        canvas.load(&storage, "scene").unwrap();
        let kinds: Vec<_> = canvas.registry().all().map(Shape::is_primitive).collect();
        assert_eq!(kinds, vec![true, true]);
        assert!(matches!(canvas.registry().all().next(), Some(Shape::Line(_))));
    }

    #[test]
    fn test_load_clears_selection_and_scene() {
        let storage = MemoryStorage::new();
        let (mut source, _, _) = scene();
        source.save(&storage, "scene").unwrap();

        let mut canvas = Canvas::new();
        let old = draw(&mut canvas, ToolKind::Line, p(300, 300), p(400, 400));
        canvas.click(p(350, 350));
        assert_eq!(canvas.selection().len(), 1);

        canvas.load(&storage, "scene").unwrap();
        assert!(canvas.selection().is_empty());
        assert!(!canvas.registry().contains(old));
        assert_eq!(canvas.registry().len(), 2);
    }

    #[test]
    fn test_malformed_load_leaves_scene() {
        let storage = MemoryStorage::new();
        storage.insert_raw("bad", "<drawing><line><begin>").unwrap();
        let (mut canvas, line, rect) = scene();

        let err = canvas.load(&storage, "bad").unwrap_err();
        assert!(matches!(err, CanvasError::Storage(StorageError::Serialization(_))));
        assert!(canvas.registry().contains(line));
        assert!(canvas.registry().contains(rect));
    }

    #[test]
    fn test_bad_element_leaves_partial_scene() {
        let storage = MemoryStorage::new();
        storage
            .insert_raw(
                "partial",
                r#"<drawing>
                    <line><begin><x>1</x><y>1</y></begin><end><x>9</x><y>9</y></end><color>black</color></line>
                    <rectangle><upper-left><x>0</x><y>zero</y></upper-left><lower-right><x>5</x><y>5</y></lower-right><color>black</color><corner>square</corner></rectangle>
                    <line><begin><x>2</x><y>2</y></begin><end><x>8</x><y>8</y></end><color>black</color></line>
                </drawing>"#,
            )
            .unwrap();
        let (mut canvas, _, _) = scene();

        let err = canvas.load(&storage, "partial").unwrap_err();
        assert!(matches!(err, CanvasError::Storage(StorageError::Format(_))));

        let shapes: Vec<_> = canvas.registry().all().collect();
        assert!(matches!(shapes.as_slice(), [Shape::Line(l)] if l.start == p(1, 1)));
    }

    #[test]
    fn test_load_skips_unknown_elements() {
        let storage = MemoryStorage::new();
        storage
            .insert_raw(
                "shapes",
                "<drawing><line><begin><x>1</x><y>1</y></begin><end><x>9</x><y>9</y></end><color>black</color></line><circle/></drawing>",
            )
            .unwrap();
        let (mut canvas, _, _) = scene();

        assert_eq!(canvas.load(&storage, "shapes").unwrap(), 1);
        let shapes: Vec<_> = canvas.registry().all().collect();
        assert!(matches!(shapes.as_slice(), [Shape::Line(l)] if l.end == p(9, 9)));
    }

    #[test]
    fn test_load_missing_key() {
        let storage = MemoryStorage::new();
        let mut canvas = Canvas::new();
        let err = canvas.load(&storage, "nope").unwrap_err();
        assert!(matches!(err, CanvasError::Storage(StorageError::NotFound(_))));
    }

    #[test]
    fn test_out_of_bounds_points_are_kept() {
        let mut canvas = Canvas::new();
        let line = draw(&mut canvas, ToolKind::Line, p(-20, 10), p(900, 950));
        assert_eq!(
            canvas.registry().get(line).unwrap().defining_points(),
            (p(-20, 10), p(900, 950))
        );
    }
}
