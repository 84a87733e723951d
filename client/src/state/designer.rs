//! Host-side view of a designer session.
//!
//! The engine owns shapes and geometry; this struct mirrors the few values
//! the surrounding toolbar and overlays render (active tool, zoom readout,
//! grid settings, the open text editor) plus save progress. It is refreshed
//! from the engine after every operation and then folded with the actions
//! that operation returned.

#[cfg(test)]
#[path = "designer_test.rs"]
mod designer_test;

use designer::doc::ShapeId;
use designer::engine::{Action, EngineCore};
use designer::input::Tool;
use designer::overlay::TextOverlay;

/// Text box currently being edited in the floating `<textarea>`.
#[derive(Clone, Debug, PartialEq)]
pub struct TextEdit {
    pub id: ShapeId,
    pub text: String,
    pub overlay: TextOverlay,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DesignerView {
    pub tool: Tool,
    pub zoom_percent: u32,
    pub grid_enabled: bool,
    pub grid_size: f64,
    pub selected: Option<ShapeId>,
    pub shape_count: usize,
    pub cursor: String,
    pub editing: Option<TextEdit>,
    /// Set when the canvas cannot be acquired or drawn to.
    pub surface_error: Option<String>,
    pub saving: bool,
    pub save_error: Option<String>,
}

impl Default for DesignerView {
    fn default() -> Self {
        Self::from_core(&EngineCore::default())
    }
}

impl DesignerView {
    pub fn from_core(core: &EngineCore) -> Self {
        let mut view = Self {
            tool: Tool::Select,
            zoom_percent: 100,
            grid_enabled: true,
            grid_size: 0.0,
            selected: None,
            shape_count: 0,
            cursor: "default".to_owned(),
            editing: None,
            surface_error: None,
            saving: false,
            save_error: None,
        };
        view.sync(core);
        view
    }

    /// Copy engine-owned values. An open editor follows its shape through
    /// zoom changes and closes if the shape is gone.
    pub fn sync(&mut self, core: &EngineCore) {
        self.tool = core.ui.tool;
        self.zoom_percent = core.camera.zoom_percent();
        self.grid_enabled = core.grid.enabled;
        self.grid_size = core.grid.size;
        self.selected = core.selection();
        self.shape_count = core.doc.len();
        if let Some(edit) = self.editing.as_mut() {
            match core.text_overlay(&edit.id) {
                Some(overlay) => edit.overlay = overlay,
                None => self.editing = None,
            }
        }
    }

    /// Fold the actions returned by an engine operation.
    pub fn apply(&mut self, actions: &[Action]) {
        for action in actions {
            match action {
                Action::SetCursor(cursor) => self.cursor.clone_from(cursor),
                Action::EditTextRequested { id, text, overlay } => {
                    self.editing = Some(TextEdit { id: *id, text: text.clone(), overlay: *overlay });
                }
                Action::ShapeDeleted { id } => {
                    if self.editing.as_ref().is_some_and(|e| e.id == *id) {
                        self.editing = None;
                    }
                }
                Action::SelectionChanged(selected) => self.selected = *selected,
                Action::ShapeCreated(_)
                | Action::ShapeUpdated { .. }
                | Action::ZoomChanged(_)
                | Action::RenderNeeded => {}
            }
        }
    }

    /// Whether Save should be offered.
    pub fn can_save(&self) -> bool {
        self.surface_error.is_none() && !self.saving
    }
}
