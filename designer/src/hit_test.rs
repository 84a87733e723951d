use uuid::Uuid;

use super::*;
use crate::doc::ShapeKind;

fn rect(x: f64, y: f64, w: f64, h: f64, z_index: i64) -> Shape {
    Shape {
        id: Uuid::new_v4(),
        kind: ShapeKind::Rect,
        x,
        y,
        width: w,
        height: h,
        text: String::new(),
        z_index,
    }
}

fn store_with(shapes: Vec<Shape>) -> ShapeStore {
    let mut store = ShapeStore::new();
    for s in shapes {
        store.insert(s);
    }
    store
}

#[test]
fn empty_store_misses() {
    let store = ShapeStore::new();
    assert_eq!(hit_test(Point::new(10.0, 10.0), &store, &Camera::default(), None), None);
}

#[test]
fn body_hit() {
    let s = rect(0.0, 0.0, 100.0, 100.0, 0);
    let id = s.id;
    let store = store_with(vec![s]);
    let hit = hit_test(Point::new(50.0, 50.0), &store, &Camera::default(), None).unwrap();
    assert_eq!(hit, Hit { shape_id: id, part: HitPart::Body });
}

#[test]
fn topmost_shape_wins() {
    let below = rect(0.0, 0.0, 100.0, 100.0, 0);
    let above = rect(50.0, 50.0, 100.0, 100.0, 1);
    let above_id = above.id;
    let store = store_with(vec![below, above]);
    let hit = hit_test(Point::new(75.0, 75.0), &store, &Camera::default(), None).unwrap();
    assert_eq!(hit.shape_id, above_id);
}

#[test]
fn handles_only_for_selected_shape() {
    let s = rect(0.0, 0.0, 100.0, 100.0, 0);
    let id = s.id;
    let store = store_with(vec![s]);

    let unselected = hit_test(Point::new(100.0, 100.0), &store, &Camera::default(), None).unwrap();
    assert_eq!(unselected.part, HitPart::Body);

    let selected = hit_test(Point::new(102.0, 103.0), &store, &Camera::default(), Some(id)).unwrap();
    assert_eq!(selected.part, HitPart::ResizeHandle(ResizeAnchor::Se));
}

#[test]
fn each_corner_maps_to_its_anchor() {
    let s = rect(10.0, 20.0, 100.0, 50.0, 0);
    let id = s.id;
    let store = store_with(vec![s]);
    let cam = Camera::default();
    let cases = [
        (Point::new(10.0, 20.0), ResizeAnchor::Nw),
        (Point::new(110.0, 20.0), ResizeAnchor::Ne),
        (Point::new(110.0, 70.0), ResizeAnchor::Se),
        (Point::new(10.0, 70.0), ResizeAnchor::Sw),
    ];
    for (pt, anchor) in cases {
        let hit = hit_test(pt, &store, &cam, Some(id)).unwrap();
        assert_eq!(hit.part, HitPart::ResizeHandle(anchor));
    }
}

#[test]
fn handle_slop_shrinks_with_zoom() {
    let s = rect(0.0, 0.0, 100.0, 100.0, 0);
    let id = s.id;
    let store = store_with(vec![s]);
    let cam = Camera { pan_x: 0.0, pan_y: 0.0, zoom: 4.0 };
    // 8px at 4x zoom is 2 world units; 5 units away is body, not handle.
    let hit = hit_test(Point::new(95.0, 95.0), &store, &cam, Some(id)).unwrap();
    assert_eq!(hit.part, HitPart::Body);
}

#[test]
fn handle_outside_body_still_hits() {
    let s = rect(0.0, 0.0, 100.0, 100.0, 0);
    let id = s.id;
    let store = store_with(vec![s]);
    let hit = hit_test(Point::new(-5.0, -5.0), &store, &Camera::default(), Some(id)).unwrap();
    assert_eq!(hit.part, HitPart::ResizeHandle(ResizeAnchor::Nw));
}

#[test]
fn anchor_cursors() {
    assert_eq!(ResizeAnchor::Nw.cursor(), "nwse-resize");
    assert_eq!(ResizeAnchor::Ne.cursor(), "nesw-resize");
}
