//! Document model: floor-plan shapes and the in-memory store.
//!
//! A plan is a flat set of [`Shape`]s (rectangles for rooms, walls and
//! furniture; text boxes for labels). Shapes live only for the duration of an
//! editing session; the serialized SVG is the only thing that survives it.
//! The input engine mutates the store through [`PartialShape`] and the
//! renderer and serializer read it back in draw order via
//! [`ShapeStore::sorted_shapes`].

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::Point;

/// Unique identifier for a shape.
pub type ShapeId = Uuid;

/// The kind of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Outlined rectangle.
    Rect,
    /// Free-standing, editable text box.
    Text,
}

/// A shape on the drawing surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: ShapeId,
    pub kind: ShapeKind,
    /// Left edge in world coordinates.
    pub x: f64,
    /// Top edge in world coordinates.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Label content. Always empty for rectangles created from the toolbar.
    pub text: String,
    /// Stacking order; lower values are drawn beneath higher values.
    pub z_index: i64,
}

impl Shape {
    /// Whether `pt` (world coordinates) falls inside the bounding box.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x && pt.x <= self.x + self.width && pt.y >= self.y && pt.y <= self.y + self.height
    }

    #[must_use]
    pub fn is_text(&self) -> bool {
        self.kind == ShapeKind::Text
    }
}

/// Sparse update for a shape. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialShape {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i64>,
}

impl PartialShape {
    /// True when no field would change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_none()
            && self.y.is_none()
            && self.width.is_none()
            && self.height.is_none()
            && self.text.is_none()
            && self.z_index.is_none()
    }
}

/// In-memory store of shapes.
#[derive(Debug, Default)]
pub struct ShapeStore {
    shapes: HashMap<ShapeId, Shape>,
}

impl ShapeStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a shape.
    pub fn insert(&mut self, shape: Shape) {
        self.shapes.insert(shape.id, shape);
    }

    pub fn remove(&mut self, id: &ShapeId) -> Option<Shape> {
        self.shapes.remove(id)
    }

    #[must_use]
    pub fn get(&self, id: &ShapeId) -> Option<&Shape> {
        self.shapes.get(id)
    }

    /// Apply a partial update. Returns false if the shape doesn't exist.
    pub fn apply_partial(&mut self, id: &ShapeId, partial: &PartialShape) -> bool {
        let Some(shape) = self.shapes.get_mut(id) else {
            return false;
        };
        if let Some(x) = partial.x {
            shape.x = x;
        }
        if let Some(y) = partial.y {
            shape.y = y;
        }
        if let Some(w) = partial.width {
            shape.width = w;
        }
        if let Some(h) = partial.height {
            shape.height = h;
        }
        if let Some(ref text) = partial.text {
            shape.text.clone_from(text);
        }
        if let Some(z) = partial.z_index {
            shape.z_index = z;
        }
        true
    }

    /// All shapes sorted by `(z_index, id)` for draw order.
    #[must_use]
    pub fn sorted_shapes(&self) -> Vec<&Shape> {
        let mut shapes: Vec<&Shape> = self.shapes.values().collect();
        shapes.sort_by(|a, b| a.z_index.cmp(&b.z_index).then_with(|| a.id.cmp(&b.id)));
        shapes
    }

    /// The z-index a newly created shape should take to land on top.
    #[must_use]
    pub fn next_z_index(&self) -> i64 {
        self.shapes.values().map(|s| s.z_index).max().map_or(0, |z| z + 1)
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
