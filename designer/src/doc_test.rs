#![allow(clippy::float_cmp)]

use super::*;

fn shape(kind: ShapeKind, x: f64, y: f64, z_index: i64) -> Shape {
    Shape {
        id: Uuid::new_v4(),
        kind,
        x,
        y,
        width: 100.0,
        height: 50.0,
        text: String::new(),
        z_index,
    }
}

// =============================================================
// Shape
// =============================================================

#[test]
fn contains_includes_edges() {
    let s = shape(ShapeKind::Rect, 10.0, 20.0, 0);
    assert!(s.contains(Point::new(10.0, 20.0)));
    assert!(s.contains(Point::new(110.0, 70.0)));
    assert!(s.contains(Point::new(60.0, 45.0)));
    assert!(!s.contains(Point::new(9.9, 45.0)));
    assert!(!s.contains(Point::new(60.0, 70.1)));
}

#[test]
fn shape_kind_serializes_lowercase() {
    assert_eq!(serde_json::to_value(ShapeKind::Rect).unwrap(), serde_json::json!("rect"));
    assert_eq!(serde_json::to_value(ShapeKind::Text).unwrap(), serde_json::json!("text"));
}

// =============================================================
// ShapeStore
// =============================================================

#[test]
fn insert_get_remove() {
    let mut store = ShapeStore::new();
    let s = shape(ShapeKind::Rect, 0.0, 0.0, 0);
    let id = s.id;
    store.insert(s);
    assert_eq!(store.len(), 1);
    assert!(store.get(&id).is_some());
    assert!(store.remove(&id).is_some());
    assert!(store.is_empty());
    assert!(store.remove(&id).is_none());
}

#[test]
fn apply_partial_updates_only_present_fields() {
    let mut store = ShapeStore::new();
    let s = shape(ShapeKind::Text, 0.0, 0.0, 0);
    let id = s.id;
    store.insert(s);

    let partial = PartialShape { x: Some(40.0), text: Some("Lobby".to_owned()), ..Default::default() };
    assert!(store.apply_partial(&id, &partial));

    let updated = store.get(&id).unwrap();
    assert_eq!(updated.x, 40.0);
    assert_eq!(updated.y, 0.0);
    assert_eq!(updated.width, 100.0);
    assert_eq!(updated.text, "Lobby");
}

#[test]
fn apply_partial_missing_shape_returns_false() {
    let mut store = ShapeStore::new();
    assert!(!store.apply_partial(&Uuid::new_v4(), &PartialShape::default()));
}

#[test]
fn sorted_shapes_orders_by_z_index() {
    let mut store = ShapeStore::new();
    let top = shape(ShapeKind::Rect, 0.0, 0.0, 5);
    let bottom = shape(ShapeKind::Rect, 0.0, 0.0, -1);
    let middle = shape(ShapeKind::Text, 0.0, 0.0, 2);
    let (top_id, bottom_id, middle_id) = (top.id, bottom.id, middle.id);
    store.insert(top);
    store.insert(bottom);
    store.insert(middle);

    let ids: Vec<ShapeId> = store.sorted_shapes().iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![bottom_id, middle_id, top_id]);
}

#[test]
fn next_z_index_lands_on_top() {
    let mut store = ShapeStore::new();
    assert_eq!(store.next_z_index(), 0);
    store.insert(shape(ShapeKind::Rect, 0.0, 0.0, 3));
    store.insert(shape(ShapeKind::Rect, 0.0, 0.0, 7));
    assert_eq!(store.next_z_index(), 8);
}

#[test]
fn partial_is_empty() {
    assert!(PartialShape::default().is_empty());
    assert!(!PartialShape { z_index: Some(1), ..Default::default() }.is_empty());
}
