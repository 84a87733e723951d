use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::camera::{Camera, Point};
use crate::consts::{
    DEFAULT_RECT_HEIGHT, DEFAULT_RECT_WIDTH, DEFAULT_SURFACE_HEIGHT, DEFAULT_SURFACE_WIDTH, DEFAULT_TEXT,
    DEFAULT_TEXT_HEIGHT, DEFAULT_TEXT_WIDTH,
};
use crate::doc::{PartialShape, Shape, ShapeId, ShapeKind, ShapeStore};
use crate::grid::Grid;
use crate::hit::{self, HitPart, ResizeAnchor};
use crate::input::{Button, InputState, Key, Modifiers, Tool, UiState};
use crate::overlay::TextOverlay;
use crate::render;
use crate::surface::{DrawingSurface, LabelSpec, ShapeSpec};
use crate::svg;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Offset between consecutive toolbar-created shapes so they don't stack exactly.
const CASCADE_STEP: f64 = 20.0;
const CASCADE_ORIGIN: f64 = 40.0;
const CASCADE_SLOTS: u8 = 10;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ShapeCreated(Shape),
    ShapeUpdated { id: ShapeId, fields: PartialShape },
    ShapeDeleted { id: ShapeId },
    SelectionChanged(Option<ShapeId>),
    EditTextRequested { id: ShapeId, text: String, overlay: TextOverlay },
    ZoomChanged(f64),
    SetCursor(String),
    RenderNeeded,
}

/// Errors acquiring or drawing to the browser canvas.
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("drawing surface unavailable")]
    Unavailable,
    #[error("render failed: {0}")]
    Render(String),
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub doc: ShapeStore,
    pub camera: Camera,
    pub ui: UiState,
    pub input: InputState,
    pub grid: Grid,
    /// Surface size in world pixels.
    pub width: f64,
    pub height: f64,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new(DEFAULT_SURFACE_WIDTH, DEFAULT_SURFACE_HEIGHT)
    }
}

impl EngineCore {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            doc: ShapeStore::new(),
            camera: Camera::default(),
            ui: UiState::default(),
            input: InputState::default(),
            grid: Grid::default(),
            width,
            height,
        }
    }

    // --- Tool / toolbar ---

    pub fn set_tool(&mut self, tool: Tool) {
        self.ui.tool = tool;
    }

    /// Add a default rectangle at the next cascade slot.
    pub fn add_rect(&mut self) -> Vec<Action> {
        let origin = self.cascade_origin();
        self.create(ShapeKind::Rect, origin, DEFAULT_RECT_WIDTH, DEFAULT_RECT_HEIGHT, String::new())
    }

    /// Add a default text box at the next cascade slot.
    pub fn add_text(&mut self) -> Vec<Action> {
        let origin = self.cascade_origin();
        self.create(ShapeKind::Text, origin, DEFAULT_TEXT_WIDTH, DEFAULT_TEXT_HEIGHT, DEFAULT_TEXT.to_owned())
    }

    /// Delete the selected shape, if any.
    pub fn delete_selection(&mut self) -> Vec<Action> {
        let Some(id) = self.ui.selected_id.take() else {
            return Vec::new();
        };
        self.input = InputState::Idle;
        if self.doc.remove(&id).is_none() {
            return vec![Action::SelectionChanged(None)];
        }
        vec![Action::ShapeDeleted { id }, Action::SelectionChanged(None), Action::RenderNeeded]
    }

    /// Commit text from the host editor back into the shape.
    pub fn set_text(&mut self, id: &ShapeId, text: String) -> Option<Action> {
        let partial = PartialShape { text: Some(text), ..Default::default() };
        self.doc.apply_partial(id, &partial).then_some(Action::ShapeUpdated { id: *id, fields: partial })
    }

    // --- Zoom / grid ---

    pub fn zoom_in(&mut self) -> Action {
        Action::ZoomChanged(self.camera.zoom_in())
    }

    pub fn zoom_out(&mut self) -> Action {
        Action::ZoomChanged(self.camera.zoom_out())
    }

    pub fn reset_zoom(&mut self) -> Action {
        Action::ZoomChanged(self.camera.reset_zoom())
    }

    /// Flip grid snapping. Returns the new state.
    pub fn toggle_grid(&mut self) -> bool {
        self.grid.toggle()
    }

    /// Change the grid unit. Returns false for values below one pixel.
    pub fn set_grid_size(&mut self, size: f64) -> bool {
        self.grid.set_size(size)
    }

    // --- Pointer input ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        let world = self.camera.screen_to_world(screen_pt);

        if self.ui.tool.is_shape() {
            let origin = self.grid.snap_point(world);
            let actions = if self.ui.tool == Tool::Text {
                self.create(ShapeKind::Text, origin, DEFAULT_TEXT_WIDTH, DEFAULT_TEXT_HEIGHT, DEFAULT_TEXT.to_owned())
            } else {
                self.create(ShapeKind::Rect, origin, DEFAULT_RECT_WIDTH, DEFAULT_RECT_HEIGHT, String::new())
            };
            self.ui.tool = Tool::Select;
            return actions;
        }

        let Some(hit) = hit::hit_test(world, &self.doc, &self.camera, self.ui.selected_id) else {
            self.input = InputState::Idle;
            if self.ui.selected_id.take().is_some() {
                return vec![Action::SelectionChanged(None), Action::RenderNeeded];
            }
            return Vec::new();
        };
        let Some(shape) = self.doc.get(&hit.shape_id) else {
            return Vec::new();
        };

        let mut actions = Vec::new();
        match hit.part {
            HitPart::ResizeHandle(anchor) => {
                self.input = InputState::Resizing {
                    id: shape.id,
                    anchor,
                    start_world: world,
                    orig_x: shape.x,
                    orig_y: shape.y,
                    orig_w: shape.width,
                    orig_h: shape.height,
                };
                actions.push(Action::SetCursor(anchor.cursor().to_owned()));
            }
            HitPart::Body => {
                self.input = InputState::Dragging { id: shape.id, start_world: world, orig_x: shape.x, orig_y: shape.y };
                if self.ui.selected_id != Some(shape.id) {
                    self.ui.selected_id = Some(shape.id);
                    actions.push(Action::SelectionChanged(Some(shape.id)));
                    actions.push(Action::RenderNeeded);
                }
                actions.push(Action::SetCursor("move".to_owned()));
            }
        }
        actions
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        let world = self.camera.screen_to_world(screen_pt);
        let Some((id, partial)) = self.gesture_update(world) else {
            return Vec::new();
        };
        if self.doc.apply_partial(&id, &partial) {
            vec![Action::RenderNeeded]
        } else {
            self.input = InputState::Idle;
            Vec::new()
        }
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, _button: Button, _modifiers: Modifiers) -> Vec<Action> {
        let world = self.camera.screen_to_world(screen_pt);
        let update = self.gesture_update(world);
        self.input = InputState::Idle;
        let Some((id, partial)) = update else {
            return Vec::new();
        };
        if !self.doc.apply_partial(&id, &partial) {
            return Vec::new();
        }
        vec![
            Action::ShapeUpdated { id, fields: partial },
            Action::SetCursor("default".to_owned()),
            Action::RenderNeeded,
        ]
    }

    /// Double-click opens the in-place editor on a text box.
    pub fn on_double_click(&mut self, screen_pt: Point) -> Vec<Action> {
        let world = self.camera.screen_to_world(screen_pt);
        self.input = InputState::Idle;
        let Some(hit) = hit::hit_test(world, &self.doc, &self.camera, None) else {
            return Vec::new();
        };
        let Some(shape) = self.doc.get(&hit.shape_id) else {
            return Vec::new();
        };
        if !shape.is_text() {
            return Vec::new();
        }
        let overlay = TextOverlay::for_shape(shape, &self.camera);
        let request = Action::EditTextRequested { id: shape.id, text: shape.text.clone(), overlay };
        let mut actions = Vec::new();
        if self.ui.selected_id != Some(shape.id) {
            self.ui.selected_id = Some(shape.id);
            actions.push(Action::SelectionChanged(Some(shape.id)));
        }
        actions.push(request);
        actions
    }

    // --- Keyboard input ---

    /// Keyboard shortcuts. Ignored entirely while a text field has focus so
    /// Backspace inside an input never deletes a shape.
    pub fn on_key_down(&mut self, key: &Key, text_field_focused: bool) -> Vec<Action> {
        if text_field_focused {
            return Vec::new();
        }
        if key.is_delete() {
            return self.delete_selection();
        }
        if key.is_escape() {
            self.cancel_gesture();
            if self.ui.selected_id.take().is_some() {
                return vec![Action::SelectionChanged(None), Action::RenderNeeded];
            }
        }
        Vec::new()
    }

    // --- Queries ---

    #[must_use]
    pub fn selection(&self) -> Option<ShapeId> {
        self.ui.selected_id
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    #[must_use]
    pub fn shape(&self, id: &ShapeId) -> Option<&Shape> {
        self.doc.get(id)
    }

    /// Screen-space editor box for a text shape.
    #[must_use]
    pub fn text_overlay(&self, id: &ShapeId) -> Option<TextOverlay> {
        self.doc.get(id).filter(|s| s.is_text()).map(|s| TextOverlay::for_shape(s, &self.camera))
    }

    /// Surface size in CSS pixels at the current zoom.
    #[must_use]
    pub fn screen_size(&self) -> (f64, f64) {
        (self.width * self.camera.zoom, self.height * self.camera.zoom)
    }

    // --- Internals ---

    fn cascade_origin(&self) -> Point {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let slot = (self.doc.len() % usize::from(CASCADE_SLOTS)) as u8;
        let offset = CASCADE_ORIGIN + f64::from(slot) * CASCADE_STEP;
        self.grid.snap_point(Point::new(offset, offset))
    }

    /// Insert a new shape on top and select it.
    fn place(&mut self, kind: ShapeKind, origin: Point, width: f64, height: f64, text: String) -> Shape {
        let shape = Shape {
            id: uuid::Uuid::new_v4(),
            kind,
            x: origin.x,
            y: origin.y,
            width: self.grid.snap_size(width),
            height: self.grid.snap_size(height),
            text,
            z_index: self.doc.next_z_index(),
        };
        self.doc.insert(shape.clone());
        self.ui.selected_id = Some(shape.id);
        shape
    }

    fn create(&mut self, kind: ShapeKind, origin: Point, width: f64, height: f64, text: String) -> Vec<Action> {
        let shape = self.place(kind, origin, width, height, text);
        let id = shape.id;
        vec![Action::ShapeCreated(shape), Action::SelectionChanged(Some(id)), Action::RenderNeeded]
    }

    /// Snapped geometry for the active gesture at pointer position `world`.
    fn gesture_update(&self, world: Point) -> Option<(ShapeId, PartialShape)> {
        match self.input {
            InputState::Idle => None,
            InputState::Dragging { id, start_world, orig_x, orig_y } => {
                let partial = PartialShape {
                    x: Some(self.grid.snap(orig_x + world.x - start_world.x)),
                    y: Some(self.grid.snap(orig_y + world.y - start_world.y)),
                    ..Default::default()
                };
                Some((id, partial))
            }
            InputState::Resizing { id, anchor, start_world, orig_x, orig_y, orig_w, orig_h } => {
                let dx = world.x - start_world.x;
                let dy = world.y - start_world.y;
                let (x, y, w, h) = resize_box(anchor, (orig_x, orig_y, orig_w, orig_h), dx, dy, &self.grid);
                let partial =
                    PartialShape { x: Some(x), y: Some(y), width: Some(w), height: Some(h), ..Default::default() };
                Some((id, partial))
            }
        }
    }

    /// Abort an in-progress gesture, restoring the original geometry.
    fn cancel_gesture(&mut self) {
        let restore = match self.input {
            InputState::Idle => None,
            InputState::Dragging { id, orig_x, orig_y, .. } => {
                Some((id, PartialShape { x: Some(orig_x), y: Some(orig_y), ..Default::default() }))
            }
            InputState::Resizing { id, orig_x, orig_y, orig_w, orig_h, .. } => Some((
                id,
                PartialShape {
                    x: Some(orig_x),
                    y: Some(orig_y),
                    width: Some(orig_w),
                    height: Some(orig_h),
                    ..Default::default()
                },
            )),
        };
        if let Some((id, partial)) = restore {
            self.doc.apply_partial(&id, &partial);
        }
        self.input = InputState::Idle;
    }
}

/// New `(x, y, width, height)` after dragging `anchor` by `(dx, dy)`.
///
/// The corner opposite the anchor stays put; the result is snapped to the
/// grid and never smaller than the grid's minimum size.
fn resize_box(anchor: ResizeAnchor, orig: (f64, f64, f64, f64), dx: f64, dy: f64, grid: &Grid) -> (f64, f64, f64, f64) {
    let (ox, oy, ow, oh) = orig;
    let (right, bottom) = (ox + ow, oy + oh);

    let moves_left = matches!(anchor, ResizeAnchor::Nw | ResizeAnchor::Sw);
    let moves_top = matches!(anchor, ResizeAnchor::Nw | ResizeAnchor::Ne);

    let (x, w) = if moves_left {
        let w = grid.snap_size(ow - dx);
        (grid.snap(right - w), w)
    } else {
        (ox, grid.snap_size(ow + dx))
    };
    let (y, h) = if moves_top {
        let h = grid.snap_size(oh - dy);
        (grid.snap(bottom - h), h)
    } else {
        (oy, grid.snap_size(oh + dy))
    };
    (x, y, w, h)
}

impl DrawingSurface for EngineCore {
    fn add_shape(&mut self, spec: &ShapeSpec) -> ShapeId {
        let origin = self.grid.snap_point(Point::new(spec.x, spec.y));
        self.place(ShapeKind::Rect, origin, spec.width, spec.height, String::new()).id
    }

    fn add_label(&mut self, spec: &LabelSpec) -> ShapeId {
        let origin = self.grid.snap_point(Point::new(spec.x, spec.y));
        self.place(ShapeKind::Text, origin, spec.width, spec.height, spec.text.clone()).id
    }

    fn remove_selection(&mut self) -> bool {
        self.delete_selection().iter().any(|a| matches!(a, Action::ShapeDeleted { .. }))
    }

    fn set_zoom(&mut self, zoom: f64) -> f64 {
        self.camera.set_zoom(zoom)
    }

    fn serialize(&self, title: Option<&str>) -> String {
        svg::serialize(self.doc.sorted_shapes(), self.width, self.height, title)
    }
}

/// The browser-bound engine. Wraps `EngineCore` and owns the canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    pub core: EngineCore,
}

impl Engine {
    /// Bind to `canvas` and size it for a `width` × `height` plan.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::Unavailable`] when the canvas has no 2D context.
    pub fn attach(canvas: HtmlCanvasElement, width: f64, height: f64) -> Result<Self, SurfaceError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|_| SurfaceError::Unavailable)?
            .ok_or(SurfaceError::Unavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SurfaceError::Unavailable)?;
        let engine = Self { canvas, ctx, core: EngineCore::new(width, height) };
        engine.resize_canvas();
        Ok(engine)
    }

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::Render`] if a canvas call fails.
    pub fn render(&self) -> Result<(), SurfaceError> {
        render::draw(&self.ctx, &self.core).map_err(|e| SurfaceError::Render(format!("{e:?}")))
    }

    /// Run an action-producing operation, then keep the canvas in sync.
    ///
    /// # Errors
    ///
    /// Propagates render failures.
    pub fn apply<F>(&mut self, op: F) -> Result<Vec<Action>, SurfaceError>
    where
        F: FnOnce(&mut EngineCore) -> Vec<Action>,
    {
        let actions = op(&mut self.core);
        if actions.iter().any(|a| matches!(a, Action::ZoomChanged(_))) {
            self.resize_canvas();
        }
        if actions.iter().any(|a| matches!(a, Action::RenderNeeded | Action::ZoomChanged(_))) {
            self.render()?;
        }
        Ok(actions)
    }

    fn resize_canvas(&self) {
        let (w, h) = self.core.screen_size();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let (w, h) = (w.ceil() as u32, h.ceil() as u32);
        self.canvas.set_width(w);
        self.canvas.set_height(h);
    }
}
