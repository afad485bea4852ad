//! Canvas document and session state.

use crate::camera::Camera;
use crate::config::{EngineConfig, Tolerances};
use crate::error::{CoreError, CoreResult};
use crate::geometry::Anchors;
use crate::history::HistoryStore;
use crate::input::{InputState, KeyEvent, MouseButton, PointerEvent, Shortcut};
use crate::render::ShapeRenderer;
use crate::selection::{self, Corner, CursorIcon, Hit, Zone, apply_resize, zone_to_cursor};
use crate::shapes::{
    Shape, ShapeId, ShapeKind, ShapeTrait, append_point, create_shape, normalize_corners,
    rescale_stroke,
};
use crate::tools::{Gesture, ToolKind, ToolManager};
use kurbo::{Point, Rect, Size, Vec2};
use std::collections::HashMap;

/// One version of the drawing: every shape plus its draw order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanvasDocument {
    /// All shapes in the document, keyed by ID.
    pub shapes: HashMap<ShapeId, Shape>,
    /// Z-order of shapes (back to front).
    pub z_order: Vec<ShapeId>,
}

impl CanvasDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a shape on top of the others.
    pub fn add_shape(&mut self, shape: Shape) {
        let id = shape.id();
        if self.shapes.insert(id, shape).is_none() {
            self.z_order.push(id);
        }
    }

    /// Remove a shape from the document.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Shape> {
        self.z_order.retain(|&shape_id| shape_id != id);
        self.shapes.remove(&id)
    }

    /// Clear all shapes from the document.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.z_order.clear();
    }

    /// Get a shape by ID.
    pub fn get_shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    /// Get a mutable reference to a shape by ID.
    pub fn get_shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(&id)
    }

    /// Get shapes in z-order (back to front).
    pub fn shapes_ordered(&self) -> impl Iterator<Item = &Shape> {
        self.z_order.iter().filter_map(|id| self.shapes.get(id))
    }

    /// The shape and zone under a world point.
    pub fn shape_at(&self, point: Point, tolerances: &Tolerances) -> Option<Hit> {
        selection::resolve(point, self.shapes_ordered(), tolerances)
    }

    /// Get the bounding box of all shapes.
    pub fn bounds(&self) -> Option<Rect> {
        self.shapes
            .values()
            .map(Shape::bounds)
            .reduce(|acc, bounds| acc.union(bounds))
    }

    /// Check if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Get the number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }
}

/// An editing session: history of documents, view and active tool.
///
/// Every discrete action (finishing a shape, deleting, clearing) is one
/// undo step. Drags amend the step they opened instead of adding new ones.
#[derive(Debug, Clone)]
pub struct Canvas {
    history: HistoryStore<CanvasDocument>,
    /// Camera for view transform.
    pub camera: Camera,
    /// Tool manager and gesture context.
    pub tool_manager: ToolManager,
    /// Held keys and buttons.
    pub input: InputState,
    config: EngineConfig,
    next_id: u64,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(Size::new(800.0, 600.0))
    }
}

impl Canvas {
    /// Create a new canvas with an empty document.
    pub fn new(viewport: Size) -> Self {
        Self::from_parts(EngineConfig::default(), Camera::new(viewport))
    }

    /// Create a canvas with a custom configuration, rejecting unusable zoom limits
    /// or tolerances.
    pub fn with_config(config: EngineConfig, viewport: Size) -> CoreResult<Self> {
        let camera = Camera::from_config(&config, viewport)?;
        Ok(Self::from_parts(config, camera))
    }

    fn from_parts(config: EngineConfig, camera: Camera) -> Self {
        Self {
            history: HistoryStore::new(CanvasDocument::new()),
            camera,
            tool_manager: ToolManager::new(config.default_tool),
            input: InputState::new(),
            config,
            next_id: 0,
        }
    }

    /// The current document.
    pub fn document(&self) -> &CanvasDocument {
        self.history.current()
    }

    pub fn history(&self) -> &HistoryStore<CanvasDocument> {
        &self.history
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The gesture in progress, if any.
    pub fn gesture(&self) -> &Gesture {
        &self.tool_manager.state
    }

    pub fn tool(&self) -> ToolKind {
        self.tool_manager.current_tool
    }

    /// Set the current tool.
    pub fn set_tool(&mut self, tool: ToolKind) {
        log::debug!("tool: {}", tool);
        self.tool_manager.set_tool(tool);
    }

    /// Set the viewport size.
    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.camera.set_viewport_size(Size::new(width, height));
    }

    fn allocate_id(&mut self) -> ShapeId {
        let id = ShapeId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a finished shape spanning two world points. Commits.
    ///
    /// The eraser trail is transient and cannot be stored.
    pub fn add_shape(&mut self, kind: ShapeKind, start: Point, end: Point) -> CoreResult<ShapeId> {
        if kind == ShapeKind::EraserMarker {
            return Err(CoreError::InvalidKind(kind.to_string()));
        }
        let id = self.allocate_id();
        let shape = normalize_corners(&create_shape(id, start, end, kind));
        self.history.commit_with(|doc| doc.add_shape(shape));
        Ok(id)
    }

    /// Remove a shape. Commits if the shape existed.
    pub fn delete_shape(&mut self, id: ShapeId) -> bool {
        if self.document().get_shape(id).is_none() {
            return false;
        }
        self.history.commit_with(|doc| {
            doc.remove_shape(id);
        });
        log::debug!("deleted shape {}", id);
        true
    }

    /// Remove every shape. Commits unless the document is already empty.
    pub fn clear(&mut self) -> bool {
        if self.document().is_empty() {
            return false;
        }
        self.tool_manager.end();
        self.history.commit_with(CanvasDocument::clear);
        true
    }

    /// Undo the last action. Any gesture in flight is dropped first.
    pub fn undo(&mut self) -> bool {
        self.tool_manager.end();
        self.history.undo()
    }

    /// Redo the last undone action.
    pub fn redo(&mut self) -> bool {
        self.tool_manager.end();
        self.history.redo()
    }

    /// Abandon the gesture in progress.
    ///
    /// Whatever the gesture last wrote stays current; there is no rollback.
    pub fn cancel(&mut self) {
        if self.tool_manager.is_active() {
            log::debug!("gesture cancelled");
        }
        self.tool_manager.end();
    }

    /// Dispatch a pointer sample in device coordinates.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        self.input.handle_pointer_event(event);
        match event {
            PointerEvent::Down { position, button } => self.pointer_down(position, button),
            PointerEvent::Move { position } => self.pointer_move(position),
            PointerEvent::Up { .. } => self.pointer_up(),
            PointerEvent::Scroll { delta, .. } => self.scroll(delta),
        }
    }

    /// Process a key event, running any shortcut it triggers.
    pub fn handle_key(&mut self, event: &KeyEvent) -> Option<Shortcut> {
        self.input.handle_key_event(event);
        let KeyEvent::Pressed(key) = event else {
            return None;
        };
        let shortcut = Shortcut::from_key(key, self.input.modifiers)?;
        self.apply_shortcut(shortcut);
        Some(shortcut)
    }

    pub fn apply_shortcut(&mut self, shortcut: Shortcut) {
        match shortcut {
            Shortcut::Undo => {
                self.undo();
            }
            Shortcut::Redo => {
                self.redo();
            }
            Shortcut::Cancel => self.cancel(),
            Shortcut::ZoomIn => self.camera.zoom_by(1.0),
            Shortcut::ZoomOut => self.camera.zoom_by(-1.0),
            Shortcut::ResetZoom => self.camera.reset_zoom(),
        }
    }

    /// Wheel input: zooms with Ctrl/Cmd held, pans otherwise.
    pub fn scroll(&mut self, delta: Vec2) {
        if self.input.modifiers.command() {
            self.camera.zoom_by(-delta.y);
        } else {
            self.camera.pan(-delta);
        }
    }

    /// Start a gesture at a device point.
    pub fn pointer_down(&mut self, device: Point, button: MouseButton) {
        if self.input.wants_pan(button) || self.tool() == ToolKind::Pan {
            self.tool_manager.begin(Gesture::Panning { last: device });
            return;
        }
        if button != MouseButton::Left {
            return;
        }

        let world = self.camera.to_world(device);
        match self.tool() {
            ToolKind::Selection => self.begin_manipulation(world),
            ToolKind::Eraser => {
                let id = self.allocate_id();
                let marker = create_shape(id, world, world, ShapeKind::EraserMarker);
                self.tool_manager.begin(Gesture::Erasing {
                    marker,
                    erased_any: false,
                });
                self.erase_at(world);
            }
            tool => {
                let Some(kind) = tool.shape_kind() else {
                    return;
                };
                let id = self.allocate_id();
                let shape = create_shape(id, world, world, kind);
                self.history.commit_with(|doc| doc.add_shape(shape));
                self.tool_manager.begin(Gesture::Drawing { id });
                log::debug!("drawing {} {}", kind, id);
            }
        }
    }

    fn begin_manipulation(&mut self, world: Point) {
        let Some(hit) = self.document().shape_at(world, &self.config.tolerances) else {
            return;
        };
        let Some(original) = self.document().get_shape(hit.id).cloned() else {
            return;
        };

        // Open one undo step for the whole drag.
        let snapshot = self.document().clone();
        self.history.commit(snapshot);

        let gesture = match hit.zone {
            Zone::Inside => Gesture::Moving {
                id: hit.id,
                original,
                grab: world,
            },
            zone => Gesture::Resizing {
                id: hit.id,
                zone,
                original,
            },
        };
        log::debug!("manipulating {} at {}", hit.id, hit.zone);
        self.tool_manager.begin(gesture);
    }

    /// Continue the gesture in progress.
    pub fn pointer_move(&mut self, device: Point) {
        let world = self.camera.to_world(device);
        match &mut self.tool_manager.state {
            Gesture::Idle => {}
            Gesture::Panning { last } => {
                let delta = device - *last;
                *last = device;
                self.camera.pan_by_device(delta);
            }
            Gesture::Drawing { id } => {
                let id = *id;
                self.history.amend_with(|doc| match doc.get_shape_mut(id) {
                    Some(shape) => extend_drawn(shape, world),
                    None => log::warn!("drawn shape {} is gone", id),
                });
            }
            Gesture::Moving { id, original, grab } => {
                let mut moved = original.clone();
                moved.translate(world - *grab);
                replace_shape(&mut self.history, *id, moved);
            }
            Gesture::Resizing { id, zone, original } => {
                if let Some(resized) = resize_shape(original, *zone, world) {
                    replace_shape(&mut self.history, *id, resized);
                }
            }
            Gesture::Erasing { marker, .. } => {
                append_point(marker, world);
            }
        }

        if matches!(self.tool_manager.state, Gesture::Erasing { .. }) {
            self.erase_at(world);
        }
    }

    /// Finish the gesture in progress.
    pub fn pointer_up(&mut self) {
        match self.tool_manager.end() {
            Gesture::Drawing { id } | Gesture::Resizing { id, .. } => {
                self.history.amend_with(|doc| {
                    if let Some(shape) = doc.get_shape_mut(id) {
                        if shape.kind().needs_normalization() {
                            *shape = normalize_corners(shape);
                        }
                    }
                });
                log::debug!("finished {}", id);
            }
            Gesture::Erasing { erased_any, .. } => {
                log::debug!("erase gesture done, removed anything: {}", erased_any);
            }
            Gesture::Moving { .. } | Gesture::Panning { .. } | Gesture::Idle => {}
        }
    }

    /// Remove the shape under `world`, if any. The first removal of a gesture commits.
    fn erase_at(&mut self, world: Point) -> bool {
        let Some(hit) = self.document().shape_at(world, &self.config.tolerances) else {
            return false;
        };
        let Gesture::Erasing { erased_any, .. } = &mut self.tool_manager.state else {
            return false;
        };

        let remove = |doc: &mut CanvasDocument| {
            doc.remove_shape(hit.id);
        };
        if *erased_any {
            self.history.amend_with(remove);
        } else {
            self.history.commit_with(remove);
            *erased_any = true;
        }
        log::debug!("erased {}", hit.id);
        true
    }

    /// Cursor affordance for a device point.
    pub fn cursor_at(&self, device: Point) -> CursorIcon {
        match &self.tool_manager.state {
            Gesture::Panning { .. } => return CursorIcon::Grabbing,
            Gesture::Moving { .. } => return CursorIcon::Move,
            Gesture::Resizing { zone, .. } => return zone_to_cursor(Some(*zone)),
            Gesture::Idle | Gesture::Drawing { .. } | Gesture::Erasing { .. } => {}
        }
        match self.tool() {
            ToolKind::Selection => {
                let world = self.camera.to_world(device);
                let hit = self.document().shape_at(world, &self.config.tolerances);
                zone_to_cursor(hit.map(|h| h.zone))
            }
            ToolKind::Pan => CursorIcon::Default,
            ToolKind::Line
            | ToolKind::Rectangle
            | ToolKind::Circle
            | ToolKind::Freehand
            | ToolKind::Eraser => CursorIcon::Crosshair,
        }
    }

    /// Cursor affordance at the last pointer position.
    pub fn current_cursor(&self) -> CursorIcon {
        self.cursor_at(self.input.pointer_position)
    }

    /// Transient shape drawn on top of the document.
    pub fn preview(&self) -> Option<&Shape> {
        self.tool_manager.preview_shape()
    }

    /// Hand the current frame to a renderer.
    pub fn render(&self, renderer: &mut impl ShapeRenderer) {
        let transform = self.camera.transform();
        renderer.begin_frame(transform);
        for shape in self.document().shapes_ordered() {
            renderer.render_shape(shape, transform, false);
        }
        if let Some(preview) = self.preview() {
            renderer.render_shape(preview, transform, true);
        }
    }
}

/// Follow the pointer while a shape is being drawn.
fn extend_drawn(shape: &mut Shape, world: Point) {
    if !append_point(shape, world) {
        let start = shape.anchors().start();
        shape.set_anchors(Anchors::from_points(start, world));
    }
}

/// The original shape with the anchor under `zone` dragged to `world`.
fn resize_shape(original: &Shape, zone: Zone, world: Point) -> Option<Shape> {
    if let Shape::Freehand(stroke) = original {
        let mut resized = stroke.clone();
        match zone {
            Zone::Inside => return None,
            Zone::Start | Zone::Corner(Corner::TopLeft) => {
                let bounds = stroke.bounds();
                resized.rescale_to(world, Point::new(bounds.x1, bounds.y1));
            }
            _ => resized.points = rescale_stroke(&stroke.points, world.x, world.y),
        }
        return Some(Shape::Freehand(resized));
    }

    let anchors = apply_resize(zone, world, original.anchors())?;
    let mut resized = original.clone();
    resized.set_anchors(anchors);
    Some(resized)
}

fn replace_shape(history: &mut HistoryStore<CanvasDocument>, id: ShapeId, shape: Shape) {
    history.amend_with(|doc| match doc.get_shape_mut(id) {
        Some(slot) => *slot = shape,
        None => log::warn!("shape {} is gone", id),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Modifiers;

    fn canvas() -> Canvas {
        Canvas::new(Size::new(800.0, 600.0))
    }

    fn drag(canvas: &mut Canvas, points: &[(f64, f64)]) {
        let (first, rest) = points.split_first().unwrap();
        canvas.handle_pointer(PointerEvent::Down {
            position: Point::new(first.0, first.1),
            button: MouseButton::Left,
        });
        for &(x, y) in rest {
            canvas.handle_pointer(PointerEvent::Move {
                position: Point::new(x, y),
            });
        }
        let last = points.last().unwrap();
        canvas.handle_pointer(PointerEvent::Up {
            position: Point::new(last.0, last.1),
            button: MouseButton::Left,
        });
    }

    fn only_shape(canvas: &Canvas) -> &Shape {
        assert_eq!(canvas.document().len(), 1);
        canvas.document().shapes_ordered().next().unwrap()
    }

    #[test]
    fn test_document_add_remove() {
        let mut doc = CanvasDocument::new();
        let shape = create_shape(ShapeId::new(7), Point::ZERO, Point::new(10.0, 10.0), ShapeKind::Rectangle);
        doc.add_shape(shape);
        assert_eq!(doc.len(), 1);
        assert!(doc.get_shape(ShapeId::new(7)).is_some());

        assert!(doc.remove_shape(ShapeId::new(7)).is_some());
        assert!(doc.is_empty());
        assert!(doc.z_order.is_empty());
    }

    #[test]
    fn test_z_order_survives_removal() {
        let mut doc = CanvasDocument::new();
        for i in 0..3 {
            let p = Point::new(i as f64 * 10.0, 0.0);
            doc.add_shape(create_shape(ShapeId::new(i), p, p + Vec2::new(5.0, 5.0), ShapeKind::Line));
        }
        doc.remove_shape(ShapeId::new(1));
        assert_eq!(doc.z_order, vec![ShapeId::new(0), ShapeId::new(2)]);
        let ids: Vec<_> = doc.shapes_ordered().map(Shape::id).collect();
        assert_eq!(ids, vec![ShapeId::new(0), ShapeId::new(2)]);
    }

    #[test]
    fn test_draw_rectangle_is_one_step() {
        let mut canvas = canvas();
        canvas.set_tool(ToolKind::Rectangle);
        drag(&mut canvas, &[(50.0, 30.0), (20.0, 60.0), (30.0, 40.0), (10.0, 10.0)]);

        assert_eq!(canvas.history().len(), 2);
        assert_eq!(only_shape(&canvas).anchors(), Anchors::new(10.0, 10.0, 50.0, 30.0));
        assert!(!canvas.tool_manager.is_active());

        assert!(canvas.undo());
        assert!(canvas.document().is_empty());
        assert!(canvas.redo());
        assert_eq!(canvas.document().len(), 1);
    }

    #[test]
    fn test_draw_freehand() {
        let mut canvas = canvas();
        canvas.set_tool(ToolKind::Freehand);
        drag(&mut canvas, &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);

        let stroke = only_shape(&canvas).as_freehand().unwrap();
        assert_eq!(
            stroke.points,
            vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)]
        );
        assert_eq!(canvas.history().len(), 2);
    }

    #[test]
    fn test_move_shape() {
        let mut canvas = canvas();
        let id = canvas.add_shape(ShapeKind::Rectangle, Point::new(10.0, 10.0), Point::new(50.0, 30.0)).unwrap();
        canvas.set_tool(ToolKind::Selection);
        drag(&mut canvas, &[(30.0, 20.0), (40.0, 25.0), (50.0, 30.0)]);

        let moved = canvas.document().get_shape(id).unwrap();
        assert_eq!(moved.anchors(), Anchors::new(30.0, 20.0, 70.0, 40.0));
        assert_eq!(canvas.history().len(), 3);

        canvas.undo();
        let restored = canvas.document().get_shape(id).unwrap();
        assert_eq!(restored.anchors(), Anchors::new(10.0, 10.0, 50.0, 30.0));
    }

    #[test]
    fn test_resize_normalizes_on_release() {
        let mut canvas = canvas();
        let id = canvas.add_shape(ShapeKind::Rectangle, Point::new(10.0, 10.0), Point::new(50.0, 30.0)).unwrap();
        canvas.set_tool(ToolKind::Selection);

        canvas.pointer_down(Point::new(50.0, 30.0), MouseButton::Left);
        assert!(matches!(
            canvas.gesture(),
            Gesture::Resizing { zone: Zone::Corner(Corner::BottomRight), .. }
        ));
        canvas.pointer_move(Point::new(5.0, 5.0));
        assert_eq!(
            canvas.document().get_shape(id).unwrap().anchors(),
            Anchors::new(10.0, 10.0, 5.0, 5.0)
        );
        canvas.pointer_up();
        assert_eq!(
            canvas.document().get_shape(id).unwrap().anchors(),
            Anchors::new(5.0, 5.0, 10.0, 10.0)
        );
    }

    #[test]
    fn test_resize_freehand_end_handle() {
        let mut canvas = canvas();
        canvas.set_tool(ToolKind::Freehand);
        drag(&mut canvas, &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);

        canvas.set_tool(ToolKind::Selection);
        drag(&mut canvas, &[(10.0, 0.0), (20.0, 20.0)]);

        let stroke = only_shape(&canvas).as_freehand().unwrap();
        assert_eq!(stroke.points[0], Point::new(0.0, 0.0));
        assert_eq!(stroke.points[1], Point::new(20.0, 0.0));
        assert_eq!(stroke.points[2], Point::new(20.0, 20.0));
    }

    #[test]
    fn test_resize_freehand_start_handle() {
        let mut canvas = canvas();
        canvas.set_tool(ToolKind::Freehand);
        drag(&mut canvas, &[(10.0, 10.0), (20.0, 10.0), (20.0, 20.0)]);

        canvas.set_tool(ToolKind::Selection);
        drag(&mut canvas, &[(10.0, 10.0), (0.0, 0.0)]);

        let stroke = only_shape(&canvas).as_freehand().unwrap();
        assert_eq!(stroke.points[0], Point::new(0.0, 0.0));
        assert_eq!(stroke.points[2], Point::new(20.0, 20.0));
    }

    #[test]
    fn test_erase_gesture_is_one_step() {
        let mut canvas = canvas();
        canvas.add_shape(ShapeKind::Rectangle, Point::new(10.0, 10.0), Point::new(50.0, 30.0)).unwrap();
        canvas.add_shape(ShapeKind::Rectangle, Point::new(100.0, 100.0), Point::new(150.0, 150.0)).unwrap();
        assert_eq!(canvas.history().len(), 3);

        canvas.set_tool(ToolKind::Eraser);
        canvas.pointer_down(Point::new(30.0, 20.0), MouseButton::Left);
        assert_eq!(canvas.document().len(), 1);
        canvas.pointer_move(Point::new(120.0, 120.0));
        assert!(canvas.document().is_empty());
        assert!(canvas.preview().is_some());
        canvas.pointer_up();

        assert!(canvas.preview().is_none());
        assert_eq!(canvas.history().len(), 4);
        canvas.undo();
        assert_eq!(canvas.document().len(), 2);
    }

    #[test]
    fn test_eraser_miss_adds_no_history() {
        let mut canvas = canvas();
        canvas.add_shape(ShapeKind::Line, Point::new(0.0, 0.0), Point::new(100.0, 0.0)).unwrap();
        canvas.set_tool(ToolKind::Eraser);
        drag(&mut canvas, &[(300.0, 300.0), (310.0, 300.0)]);
        assert_eq!(canvas.history().len(), 2);
        assert_eq!(canvas.document().len(), 1);
    }

    #[test]
    fn test_delete_and_clear() {
        let mut canvas = canvas();
        let a = canvas.add_shape(ShapeKind::Line, Point::new(0.0, 0.0), Point::new(10.0, 0.0)).unwrap();
        canvas.add_shape(ShapeKind::Circle, Point::new(20.0, 20.0), Point::new(40.0, 40.0)).unwrap();

        assert!(canvas.delete_shape(a));
        assert!(!canvas.delete_shape(a));
        assert_eq!(canvas.history().len(), 4);

        assert!(canvas.clear());
        assert!(canvas.document().is_empty());
        assert!(!canvas.clear());
        assert_eq!(canvas.history().len(), 5);
    }

    #[test]
    fn test_ids_are_not_reused_after_undo() {
        let mut canvas = canvas();
        let first = canvas.add_shape(ShapeKind::Line, Point::ZERO, Point::new(1.0, 1.0)).unwrap();
        canvas.undo();
        let second = canvas.add_shape(ShapeKind::Line, Point::ZERO, Point::new(1.0, 1.0)).unwrap();
        assert!(second > first);
    }

    #[test]
    fn test_cancel_keeps_last_frame() {
        let mut canvas = canvas();
        let id = canvas.add_shape(ShapeKind::Rectangle, Point::new(10.0, 10.0), Point::new(50.0, 30.0)).unwrap();
        canvas.set_tool(ToolKind::Selection);
        canvas.pointer_down(Point::new(30.0, 20.0), MouseButton::Left);
        canvas.pointer_move(Point::new(35.0, 20.0));
        canvas.cancel();
        assert!(!canvas.tool_manager.is_active());

        canvas.pointer_move(Point::new(90.0, 90.0));
        let shape = canvas.document().get_shape(id).unwrap();
        assert_eq!(shape.anchors(), Anchors::new(15.0, 10.0, 55.0, 30.0));
    }

    #[test]
    fn test_middle_button_pans() {
        let mut canvas = canvas();
        canvas.handle_pointer(PointerEvent::Down {
            position: Point::new(100.0, 100.0),
            button: MouseButton::Middle,
        });
        canvas.handle_pointer(PointerEvent::Move {
            position: Point::new(140.0, 100.0),
        });
        assert_eq!(canvas.cursor_at(Point::new(140.0, 100.0)), CursorIcon::Grabbing);
        canvas.handle_pointer(PointerEvent::Up {
            position: Point::new(140.0, 100.0),
            button: MouseButton::Middle,
        });

        let world = canvas.camera.to_world(Point::new(140.0, 100.0));
        assert!((world.x - 100.0).abs() < 1e-10);
        assert!(canvas.document().is_empty());
    }

    #[test]
    fn test_scroll_pans_or_zooms() {
        let mut canvas = canvas();
        canvas.scroll(Vec2::new(0.0, 30.0));
        assert_eq!(canvas.camera.pan_offset(), Vec2::new(0.0, -30.0));

        canvas.input.set_modifiers(Modifiers {
            ctrl: true,
            ..Modifiers::default()
        });
        canvas.scroll(Vec2::new(0.0, 30.0));
        assert!((canvas.camera.scale() - 0.9).abs() < 1e-12);
        canvas.scroll(Vec2::new(0.0, -30.0));
        assert!((canvas.camera.scale() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_keyboard_undo_redo() {
        let mut canvas = canvas();
        canvas.add_shape(ShapeKind::Line, Point::ZERO, Point::new(10.0, 10.0)).unwrap();
        canvas.input.set_modifiers(Modifiers {
            meta: true,
            ..Modifiers::default()
        });

        let shortcut = canvas.handle_key(&KeyEvent::Pressed("z".to_string()));
        assert_eq!(shortcut, Some(Shortcut::Undo));
        assert!(canvas.document().is_empty());

        canvas.handle_key(&KeyEvent::Released("z".to_string()));
        canvas.handle_key(&KeyEvent::Pressed("y".to_string()));
        assert_eq!(canvas.document().len(), 1);
    }

    #[test]
    fn test_cursor_affordance() {
        let mut canvas = canvas();
        canvas.add_shape(ShapeKind::Rectangle, Point::new(10.0, 10.0), Point::new(50.0, 30.0)).unwrap();

        canvas.set_tool(ToolKind::Selection);
        assert_eq!(canvas.cursor_at(Point::new(10.0, 10.0)), CursorIcon::NwseResize);
        assert_eq!(canvas.cursor_at(Point::new(50.0, 10.0)), CursorIcon::NeswResize);
        assert_eq!(canvas.cursor_at(Point::new(30.0, 20.0)), CursorIcon::Move);
        assert_eq!(canvas.cursor_at(Point::new(300.0, 300.0)), CursorIcon::Default);

        canvas.set_tool(ToolKind::Circle);
        assert_eq!(canvas.cursor_at(Point::new(30.0, 20.0)), CursorIcon::Crosshair);
    }

    #[test]
    fn test_zoomed_hit_testing_uses_world_space() {
        let mut canvas = canvas();
        canvas.add_shape(ShapeKind::Rectangle, Point::new(10.0, 10.0), Point::new(50.0, 30.0)).unwrap();
        canvas.camera.set_scale(2.0);
        canvas.set_tool(ToolKind::Selection);

        let device = canvas.camera.to_device(Point::new(10.0, 10.0));
        assert_eq!(canvas.cursor_at(device), CursorIcon::NwseResize);
    }

    #[derive(Default)]
    struct Recorder {
        frames: usize,
        drawn: Vec<(ShapeKind, bool)>,
    }

    impl ShapeRenderer for Recorder {
        fn begin_frame(&mut self, _transform: kurbo::Affine) {
            self.frames += 1;
        }

        fn render_shape(&mut self, shape: &Shape, _transform: kurbo::Affine, preview: bool) {
            self.drawn.push((shape.kind(), preview));
        }
    }

    #[test]
    fn test_render_order_and_preview() {
        let mut canvas = canvas();
        canvas.add_shape(ShapeKind::Circle, Point::new(0.0, 0.0), Point::new(10.0, 10.0)).unwrap();
        canvas.add_shape(ShapeKind::Line, Point::new(100.0, 0.0), Point::new(200.0, 0.0)).unwrap();
        canvas.set_tool(ToolKind::Eraser);
        canvas.pointer_down(Point::new(400.0, 400.0), MouseButton::Left);

        let mut recorder = Recorder::default();
        canvas.render(&mut recorder);
        assert_eq!(recorder.frames, 1);
        assert_eq!(
            recorder.drawn,
            vec![
                (ShapeKind::Circle, false),
                (ShapeKind::Line, false),
                (ShapeKind::EraserMarker, true),
            ]
        );
    }

    #[test]
    fn test_add_shape_rejects_eraser_marker() {
        let mut canvas = canvas();
        let result = canvas.add_shape(ShapeKind::EraserMarker, Point::ZERO, Point::new(10.0, 10.0));
        assert!(matches!(result, Err(CoreError::InvalidKind(_))));
        assert!(canvas.document().is_empty());
        assert_eq!(canvas.history().len(), 1);
    }

    #[test]
    fn test_resize_circle_by_border() {
        let mut canvas = canvas();
        let id = canvas.add_shape(ShapeKind::Circle, Point::new(0.0, 0.0), Point::new(40.0, 20.0)).unwrap();
        canvas.set_tool(ToolKind::Selection);
        assert_eq!(canvas.cursor_at(Point::new(45.0, 10.0)), CursorIcon::Scale);

        drag(&mut canvas, &[(45.0, 10.0), (50.0, 20.0), (60.0, 30.0)]);
        assert_eq!(
            canvas.document().get_shape(id).unwrap().anchors(),
            Anchors::new(0.0, 0.0, 60.0, 30.0)
        );
        assert_eq!(canvas.history().len(), 3);

        assert!(canvas.undo());
        assert_eq!(
            canvas.document().get_shape(id).unwrap().anchors(),
            Anchors::new(0.0, 0.0, 40.0, 20.0)
        );
    }

    #[test]
    fn test_with_config_rejects_bad_zoom_limits() {
        let config = EngineConfig {
            min_scale: 3.0,
            max_scale: 1.0,
            ..EngineConfig::default()
        };
        let result = Canvas::with_config(config, Size::new(800.0, 600.0));
        assert!(matches!(result, Err(CoreError::InvalidConfig(_))));
    }

    #[test]
    fn test_current_cursor_follows_pointer() {
        let mut canvas = canvas();
        canvas.add_shape(ShapeKind::Rectangle, Point::new(10.0, 10.0), Point::new(50.0, 30.0)).unwrap();
        canvas.set_tool(ToolKind::Selection);

        canvas.handle_pointer(PointerEvent::Move {
            position: Point::new(30.0, 20.0),
        });
        assert_eq!(canvas.current_cursor(), CursorIcon::Move);
        canvas.handle_pointer(PointerEvent::Move {
            position: Point::new(50.0, 10.0),
        });
        assert_eq!(canvas.current_cursor(), CursorIcon::NeswResize);
        canvas.handle_pointer(PointerEvent::Move {
            position: Point::new(300.0, 300.0),
        });
        assert_eq!(canvas.current_cursor(), CursorIcon::Default);
    }
}
