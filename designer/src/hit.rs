#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::{Camera, Point};
use crate::consts::HANDLE_RADIUS_PX;
use crate::doc::{Shape, ShapeId, ShapeStore};

/// Which part of a shape was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    ResizeHandle(ResizeAnchor),
}

/// Corner handle used for resizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeAnchor {
    Nw,
    Ne,
    Se,
    Sw,
}

impl ResizeAnchor {
    pub const ALL: [Self; 4] = [Self::Nw, Self::Ne, Self::Se, Self::Sw];

    /// CSS cursor shown while hovering or dragging this handle.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::Nw | Self::Se => "nwse-resize",
            Self::Ne | Self::Sw => "nesw-resize",
        }
    }
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub shape_id: ShapeId,
    pub part: HitPart,
}

/// World-space position of a corner handle.
#[must_use]
pub fn handle_position(shape: &Shape, anchor: ResizeAnchor) -> Point {
    match anchor {
        ResizeAnchor::Nw => Point::new(shape.x, shape.y),
        ResizeAnchor::Ne => Point::new(shape.x + shape.width, shape.y),
        ResizeAnchor::Se => Point::new(shape.x + shape.width, shape.y + shape.height),
        ResizeAnchor::Sw => Point::new(shape.x, shape.y + shape.height),
    }
}

/// Find the shape under `world_pt`.
///
/// Handles of the selected shape win over everything else; after that the
/// topmost shape whose box contains the point is returned.
#[must_use]
pub fn hit_test(world_pt: Point, doc: &ShapeStore, camera: &Camera, selected_id: Option<ShapeId>) -> Option<Hit> {
    if let Some(id) = selected_id
        && let Some(shape) = doc.get(&id)
    {
        let radius = camera.screen_dist_to_world(HANDLE_RADIUS_PX);
        for anchor in ResizeAnchor::ALL {
            let handle = handle_position(shape, anchor);
            if (world_pt.x - handle.x).abs() <= radius && (world_pt.y - handle.y).abs() <= radius {
                return Some(Hit { shape_id: id, part: HitPart::ResizeHandle(anchor) });
            }
        }
    }

    doc.sorted_shapes()
        .into_iter()
        .rev()
        .find(|shape| shape.contains(world_pt))
        .map(|shape| Hit { shape_id: shape.id, part: HitPart::Body })
}
