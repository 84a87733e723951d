use designer::camera::Point;
use designer::input::{Button, Modifiers};

use super::*;

#[test]
fn fresh_view_mirrors_engine_defaults() {
    let view = DesignerView::default();
    assert_eq!(view.tool, Tool::Select);
    assert_eq!(view.zoom_percent, 100);
    assert!(view.grid_enabled);
    assert!((view.grid_size - 20.0).abs() < f64::EPSILON);
    assert!(view.can_save());
}

#[test]
fn sync_picks_up_zoom_and_shapes() {
    let mut core = EngineCore::default();
    let mut view = DesignerView::from_core(&core);
    let actions = core.add_rect();
    core.zoom_in();
    view.sync(&core);
    view.apply(&actions);
    assert_eq!(view.zoom_percent, 120);
    assert_eq!(view.shape_count, 1);
    assert!(view.selected.is_some());
}

#[test]
fn double_click_opens_editor_and_zoom_moves_it() {
    let mut core = EngineCore::default();
    core.add_text();
    let mut view = DesignerView::from_core(&core);
    let id = core.selection().unwrap();
    let shape = core.shape(&id).unwrap().clone();

    let actions = core.on_double_click(Point::new(shape.x + 5.0, shape.y + 5.0));
    view.apply(&actions);
    let edit = view.editing.clone().unwrap();
    assert_eq!(edit.id, id);
    assert_eq!(edit.text, shape.text);

    core.zoom_in();
    view.sync(&core);
    let moved = view.editing.as_ref().unwrap().overlay;
    assert!((moved.width - edit.overlay.width * 1.2).abs() < 1e-9);
}

#[test]
fn deleting_edited_shape_closes_editor() {
    let mut core = EngineCore::default();
    core.add_text();
    let id = core.selection().unwrap();
    let shape = core.shape(&id).unwrap().clone();
    let mut view = DesignerView::from_core(&core);
    view.apply(&core.on_double_click(Point::new(shape.x + 1.0, shape.y + 1.0)));

    let actions = core.delete_selection();
    view.apply(&actions);
    view.sync(&core);
    assert_eq!(view.editing, None);
    assert_eq!(view.selected, None);
    assert_eq!(view.shape_count, 0);
}

#[test]
fn tool_reverts_after_placing_a_shape() {
    let mut core = EngineCore::default();
    core.set_tool(Tool::Rect);
    let mut view = DesignerView::from_core(&core);
    assert_eq!(view.tool, Tool::Rect);
    let actions = core.on_pointer_down(Point::new(100.0, 100.0), Button::Primary, Modifiers::default());
    view.sync(&core);
    view.apply(&actions);
    assert_eq!(view.tool, Tool::Select);
    assert_eq!(view.shape_count, 1);
}

#[test]
fn cursor_and_save_flags() {
    let mut view = DesignerView::default();
    view.apply(&[Action::SetCursor("move".to_owned())]);
    assert_eq!(view.cursor, "move");
    view.saving = true;
    assert!(!view.can_save());
    view.saving = false;
    view.surface_error = Some("drawing surface unavailable".to_owned());
    assert!(!view.can_save());
}
