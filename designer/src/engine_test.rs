#![allow(clippy::float_cmp)]

use uuid::Uuid;

use super::*;

// =============================================================
// Helpers
// =============================================================

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn no_modifiers() -> Modifiers {
    Modifiers::default()
}

fn insert(core: &mut EngineCore, kind: ShapeKind, x: f64, y: f64, w: f64, h: f64, text: &str) -> ShapeId {
    let shape = Shape {
        id: Uuid::new_v4(),
        kind,
        x,
        y,
        width: w,
        height: h,
        text: text.to_owned(),
        z_index: core.doc.next_z_index(),
    };
    let id = shape.id;
    core.doc.insert(shape);
    id
}

fn drag(core: &mut EngineCore, from: Point, to: Point) -> Vec<Action> {
    core.on_pointer_down(from, Button::Primary, no_modifiers());
    core.on_pointer_move(to, no_modifiers());
    core.on_pointer_up(to, Button::Primary, no_modifiers())
}

fn geometry(core: &EngineCore, id: ShapeId) -> (f64, f64, f64, f64) {
    let s = core.shape(&id).unwrap();
    (s.x, s.y, s.width, s.height)
}

// =============================================================
// Toolbar
// =============================================================

#[test]
fn default_surface_is_800_by_600() {
    let core = EngineCore::default();
    assert_eq!((core.width, core.height), (800.0, 600.0));
    assert!(core.grid.enabled);
    assert_eq!(core.grid.size, 20.0);
}

#[test]
fn add_rect_creates_and_selects() {
    let mut core = EngineCore::default();
    let actions = core.add_rect();

    let Action::ShapeCreated(shape) = &actions[0] else {
        panic!("expected ShapeCreated, got {actions:?}");
    };
    assert_eq!(shape.kind, ShapeKind::Rect);
    assert_eq!((shape.x, shape.y, shape.width, shape.height), (40.0, 40.0, 120.0, 80.0));
    assert_eq!(actions[1], Action::SelectionChanged(Some(shape.id)));
    assert_eq!(actions[2], Action::RenderNeeded);
    assert_eq!(core.selection(), Some(shape.id));
}

#[test]
fn toolbar_shapes_cascade() {
    let mut core = EngineCore::default();
    core.add_rect();
    let actions = core.add_rect();
    let Action::ShapeCreated(second) = &actions[0] else {
        panic!("expected ShapeCreated");
    };
    assert_eq!((second.x, second.y), (60.0, 60.0));
    assert!(second.z_index > 0);
}

#[test]
fn add_text_uses_placeholder() {
    let mut core = EngineCore::default();
    let actions = core.add_text();
    let Action::ShapeCreated(shape) = &actions[0] else {
        panic!("expected ShapeCreated");
    };
    assert_eq!(shape.kind, ShapeKind::Text);
    assert_eq!(shape.text, DEFAULT_TEXT);
    assert_eq!((shape.width, shape.height), (160.0, 40.0));
}

#[test]
fn rect_tool_places_on_click_then_returns_to_select() {
    let mut core = EngineCore::default();
    core.set_tool(Tool::Rect);
    let actions = core.on_pointer_down(pt(103.0, 57.0), Button::Primary, no_modifiers());
    let Action::ShapeCreated(shape) = &actions[0] else {
        panic!("expected ShapeCreated");
    };
    assert_eq!((shape.x, shape.y), (100.0, 60.0));
    assert_eq!(core.ui.tool, Tool::Select);
}

#[test]
fn text_tool_places_text_box() {
    let mut core = EngineCore::default();
    core.set_tool(Tool::Text);
    let actions = core.on_pointer_down(pt(10.0, 10.0), Button::Primary, no_modifiers());
    assert!(matches!(&actions[0], Action::ShapeCreated(s) if s.kind == ShapeKind::Text));
}

// =============================================================
// Selection
// =============================================================

#[test]
fn click_on_shape_selects_it() {
    let mut core = EngineCore::default();
    let id = insert(&mut core, ShapeKind::Rect, 100.0, 100.0, 120.0, 80.0, "");
    let actions = core.on_pointer_down(pt(150.0, 150.0), Button::Primary, no_modifiers());
    assert!(actions.contains(&Action::SelectionChanged(Some(id))));
    assert_eq!(core.selection(), Some(id));
}

#[test]
fn click_on_empty_surface_clears_selection() {
    let mut core = EngineCore::default();
    core.add_rect();
    let actions = core.on_pointer_down(pt(700.0, 500.0), Button::Primary, no_modifiers());
    assert_eq!(actions, vec![Action::SelectionChanged(None), Action::RenderNeeded]);
    assert_eq!(core.selection(), None);
}

#[test]
fn click_on_empty_surface_without_selection_is_quiet() {
    let mut core = EngineCore::default();
    assert!(core.on_pointer_down(pt(5.0, 5.0), Button::Primary, no_modifiers()).is_empty());
}

#[test]
fn secondary_button_is_ignored() {
    let mut core = EngineCore::default();
    let id = insert(&mut core, ShapeKind::Rect, 0.0, 0.0, 100.0, 100.0, "");
    assert!(core.on_pointer_down(pt(50.0, 50.0), Button::Secondary, no_modifiers()).is_empty());
    assert_ne!(core.selection(), Some(id));
}

// =============================================================
// Move / resize with snapping
// =============================================================

#[test]
fn drag_snaps_position_to_grid() {
    let mut core = EngineCore::default();
    let id = insert(&mut core, ShapeKind::Rect, 100.0, 100.0, 120.0, 80.0, "");
    // Raw result (103, 57) snaps to (100, 60).
    let actions = drag(&mut core, pt(150.0, 150.0), pt(153.0, 107.0));
    assert_eq!(geometry(&core, id), (100.0, 60.0, 120.0, 80.0));
    assert!(actions.contains(&Action::ShapeUpdated {
        id,
        fields: PartialShape { x: Some(100.0), y: Some(60.0), ..Default::default() },
    }));
}

#[test]
fn drag_without_grid_moves_freely() {
    let mut core = EngineCore::default();
    core.toggle_grid();
    let id = insert(&mut core, ShapeKind::Rect, 100.0, 100.0, 120.0, 80.0, "");
    drag(&mut core, pt(150.0, 150.0), pt(153.0, 107.0));
    assert_eq!(geometry(&core, id), (103.0, 57.0, 120.0, 80.0));
}

#[test]
fn pointer_move_snaps_on_every_step() {
    let mut core = EngineCore::default();
    let id = insert(&mut core, ShapeKind::Rect, 100.0, 100.0, 120.0, 80.0, "");
    core.on_pointer_down(pt(150.0, 150.0), Button::Primary, no_modifiers());
    assert_eq!(core.on_pointer_move(pt(159.0, 150.0), no_modifiers()), vec![Action::RenderNeeded]);
    assert_eq!(geometry(&core, id).0, 100.0);
    core.on_pointer_move(pt(161.0, 150.0), no_modifiers());
    assert_eq!(geometry(&core, id).0, 120.0);
}

#[test]
fn resize_from_se_corner_snaps_size() {
    let mut core = EngineCore::default();
    let id = insert(&mut core, ShapeKind::Rect, 100.0, 100.0, 120.0, 80.0, "");
    core.ui.selected_id = Some(id);
    drag(&mut core, pt(220.0, 180.0), pt(263.0, 197.0));
    assert_eq!(geometry(&core, id), (100.0, 100.0, 160.0, 100.0));
}

#[test]
fn resize_from_nw_corner_keeps_opposite_corner() {
    let mut core = EngineCore::default();
    let id = insert(&mut core, ShapeKind::Rect, 100.0, 100.0, 120.0, 80.0, "");
    core.ui.selected_id = Some(id);
    drag(&mut core, pt(100.0, 100.0), pt(60.0, 80.0));
    assert_eq!(geometry(&core, id), (60.0, 80.0, 160.0, 100.0));
}

#[test]
fn resize_never_goes_below_one_grid_unit() {
    let mut core = EngineCore::default();
    let id = insert(&mut core, ShapeKind::Rect, 100.0, 100.0, 120.0, 80.0, "");
    core.ui.selected_id = Some(id);
    drag(&mut core, pt(100.0, 100.0), pt(400.0, 400.0));
    assert_eq!(geometry(&core, id), (200.0, 160.0, 20.0, 20.0));
}

#[test]
fn resize_ne_and_sw_move_one_edge_each_axis() {
    let mut core = EngineCore::default();
    let id = insert(&mut core, ShapeKind::Rect, 100.0, 100.0, 120.0, 80.0, "");
    core.ui.selected_id = Some(id);
    drag(&mut core, pt(220.0, 100.0), pt(240.0, 80.0));
    assert_eq!(geometry(&core, id), (100.0, 80.0, 140.0, 100.0));

    drag(&mut core, pt(100.0, 180.0), pt(120.0, 200.0));
    assert_eq!(geometry(&core, id), (120.0, 80.0, 120.0, 120.0));
}

#[test]
fn pointer_up_without_gesture_is_quiet() {
    let mut core = EngineCore::default();
    assert!(core.on_pointer_up(pt(0.0, 0.0), Button::Primary, no_modifiers()).is_empty());
    assert!(core.on_pointer_move(pt(0.0, 0.0), no_modifiers()).is_empty());
}

#[test]
fn drag_respects_zoom() {
    let mut core = EngineCore::default();
    core.zoom_in();
    core.zoom_in(); // 1.44
    let id = insert(&mut core, ShapeKind::Rect, 100.0, 100.0, 120.0, 80.0, "");
    // 144 screen px at 1.44 = 100 world units.
    drag(&mut core, pt(216.0, 216.0), pt(360.0, 216.0));
    assert_eq!(geometry(&core, id).0, 200.0);
}

// =============================================================
// Text editing
// =============================================================

#[test]
fn double_click_text_requests_editor() {
    let mut core = EngineCore::default();
    let id = insert(&mut core, ShapeKind::Text, 100.0, 100.0, 160.0, 40.0, "Lobby");
    let actions = core.on_double_click(pt(120.0, 110.0));
    assert_eq!(actions[0], Action::SelectionChanged(Some(id)));
    let Action::EditTextRequested { id: edit_id, text, overlay } = &actions[1] else {
        panic!("expected EditTextRequested, got {actions:?}");
    };
    assert_eq!(*edit_id, id);
    assert_eq!(text, "Lobby");
    assert_eq!((overlay.left, overlay.top, overlay.width, overlay.height), (100.0, 100.0, 160.0, 40.0));
}

#[test]
fn editor_overlay_scales_with_zoom() {
    let mut core = EngineCore::default();
    core.set_zoom(2.0);
    let id = insert(&mut core, ShapeKind::Text, 100.0, 100.0, 160.0, 40.0, "Lobby");
    let actions = core.on_double_click(pt(220.0, 220.0));
    let Some(Action::EditTextRequested { overlay, .. }) = actions.last() else {
        panic!("expected EditTextRequested");
    };
    assert_eq!((overlay.left, overlay.top, overlay.width, overlay.height), (200.0, 200.0, 320.0, 80.0));
    assert_eq!(core.text_overlay(&id), Some(*overlay));
}

#[test]
fn double_click_rect_does_nothing() {
    let mut core = EngineCore::default();
    let id = insert(&mut core, ShapeKind::Rect, 0.0, 0.0, 100.0, 100.0, "");
    assert!(core.on_double_click(pt(50.0, 50.0)).is_empty());
    assert_eq!(core.text_overlay(&id), None);
}

#[test]
fn set_text_commits_into_shape() {
    let mut core = EngineCore::default();
    let id = insert(&mut core, ShapeKind::Text, 0.0, 0.0, 160.0, 40.0, "Old");
    let action = core.set_text(&id, "New\nLine".to_owned()).unwrap();
    assert_eq!(
        action,
        Action::ShapeUpdated { id, fields: PartialShape { text: Some("New\nLine".to_owned()), ..Default::default() } }
    );
    assert_eq!(core.shape(&id).unwrap().text, "New\nLine");
    assert!(core.set_text(&Uuid::new_v4(), "x".to_owned()).is_none());
}

// =============================================================
// Keyboard
// =============================================================

#[test]
fn delete_removes_selection() {
    let mut core = EngineCore::default();
    core.add_rect();
    let id = core.selection().unwrap();
    let actions = core.on_key_down(&Key::new("Delete"), false);
    assert_eq!(actions, vec![Action::ShapeDeleted { id }, Action::SelectionChanged(None), Action::RenderNeeded]);
    assert!(core.doc.is_empty());
}

#[test]
fn backspace_removes_selection() {
    let mut core = EngineCore::default();
    core.add_text();
    core.on_key_down(&Key::new("Backspace"), false);
    assert!(core.doc.is_empty());
}

#[test]
fn delete_is_ignored_while_text_field_focused() {
    let mut core = EngineCore::default();
    core.add_rect();
    assert!(core.on_key_down(&Key::new("Backspace"), true).is_empty());
    assert_eq!(core.doc.len(), 1);
}

#[test]
fn delete_without_selection_is_quiet() {
    let mut core = EngineCore::default();
    insert(&mut core, ShapeKind::Rect, 0.0, 0.0, 10.0, 10.0, "");
    assert!(core.on_key_down(&Key::new("Delete"), false).is_empty());
    assert_eq!(core.doc.len(), 1);
}

#[test]
fn escape_cancels_drag_and_clears_selection() {
    let mut core = EngineCore::default();
    let id = insert(&mut core, ShapeKind::Rect, 100.0, 100.0, 120.0, 80.0, "");
    core.on_pointer_down(pt(150.0, 150.0), Button::Primary, no_modifiers());
    core.on_pointer_move(pt(250.0, 250.0), no_modifiers());
    let actions = core.on_key_down(&Key::new("Escape"), false);
    assert_eq!(actions, vec![Action::SelectionChanged(None), Action::RenderNeeded]);
    assert_eq!(geometry(&core, id), (100.0, 100.0, 120.0, 80.0));
    assert!(matches!(core.input, InputState::Idle));
}

#[test]
fn other_keys_are_ignored() {
    let mut core = EngineCore::default();
    core.add_rect();
    assert!(core.on_key_down(&Key::new("a"), false).is_empty());
    assert_eq!(core.doc.len(), 1);
}

// =============================================================
// Zoom / grid
// =============================================================

#[test]
fn zoom_actions_report_applied_value() {
    let mut core = EngineCore::default();
    let Action::ZoomChanged(z) = core.zoom_in() else {
        panic!("expected ZoomChanged");
    };
    assert!((z - 1.2).abs() < 1e-9);
    assert_eq!(core.reset_zoom(), Action::ZoomChanged(1.0));
    for _ in 0..20 {
        core.zoom_out();
    }
    assert_eq!(core.camera().zoom, 0.25);
}

#[test]
fn screen_size_follows_zoom() {
    let mut core = EngineCore::new(400.0, 300.0);
    core.set_zoom(2.0);
    assert_eq!(core.screen_size(), (800.0, 600.0));
}

#[test]
fn grid_size_changes_snapping() {
    let mut core = EngineCore::default();
    assert!(core.set_grid_size(50.0));
    assert!(!core.set_grid_size(0.0));
    let id = insert(&mut core, ShapeKind::Rect, 100.0, 100.0, 100.0, 100.0, "");
    drag(&mut core, pt(150.0, 150.0), pt(170.0, 180.0));
    assert_eq!(geometry(&core, id), (100.0, 150.0, 100.0, 100.0));
}

// =============================================================
// DrawingSurface
// =============================================================

#[test]
fn surface_add_shape_snaps_and_selects() {
    let mut core = EngineCore::default();
    let id = core.add_shape(&ShapeSpec { x: 103.0, y: 57.0, width: 95.0, height: 41.0 });
    assert_eq!(geometry(&core, id), (100.0, 60.0, 100.0, 40.0));
    assert_eq!(core.selection(), Some(id));
}

#[test]
fn surface_add_label_keeps_text() {
    let mut core = EngineCore::default();
    let id = core.add_label(&LabelSpec::at(20.0, 20.0, "Kitchen"));
    assert_eq!(core.shape(&id).unwrap().text, "Kitchen");
}

#[test]
fn surface_remove_selection() {
    let mut core = EngineCore::default();
    assert!(!core.remove_selection());
    core.add_shape(&ShapeSpec::at(0.0, 0.0));
    assert!(core.remove_selection());
    assert!(core.doc.is_empty());
}

#[test]
fn surface_set_zoom_clamps() {
    let mut core = EngineCore::default();
    assert_eq!(DrawingSurface::set_zoom(&mut core, 10.0), 4.0);
    assert_eq!(DrawingSurface::set_zoom(&mut core, 0.1), 0.25);
}

#[test]
fn surface_serialize_includes_title_and_shapes() {
    let mut core = EngineCore::new(640.0, 480.0);
    core.add_shape(&ShapeSpec::at(20.0, 20.0));
    core.add_label(&LabelSpec::at(40.0, 40.0, "A&B"));
    let svg = core.serialize(Some("2F"));
    assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="640" height="480" viewBox="0 0 640 480"><title>2F</title><rect"#));
    assert!(svg.contains("A&amp;B"));
    assert!(svg.ends_with("</svg>"));
}

#[test]
fn serialize_is_unaffected_by_zoom() {
    let mut core = EngineCore::default();
    core.add_shape(&ShapeSpec::at(20.0, 20.0));
    let before = core.serialize(None);
    core.zoom_in();
    assert_eq!(core.serialize(None), before);
}
