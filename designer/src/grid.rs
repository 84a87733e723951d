#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;

use crate::camera::Point;
use crate::consts::{DEFAULT_GRID_SIZE, MIN_SHAPE_SIZE};

/// Grid snapping settings.
///
/// When enabled, every moved or resized shape has its position and size
/// rounded to the nearest multiple of `size`, and no size may drop below one
/// grid unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    pub enabled: bool,
    pub size: f64,
}

impl Default for Grid {
    fn default() -> Self {
        Self { enabled: true, size: DEFAULT_GRID_SIZE }
    }
}

impl Grid {
    /// Round a coordinate to the nearest grid line.
    #[must_use]
    pub fn snap(&self, value: f64) -> f64 {
        if self.enabled {
            (value / self.size).round() * self.size
        } else {
            value
        }
    }

    #[must_use]
    pub fn snap_point(&self, pt: Point) -> Point {
        Point::new(self.snap(pt.x), self.snap(pt.y))
    }

    /// Round a width or height, never going below [`Grid::min_size`].
    #[must_use]
    pub fn snap_size(&self, value: f64) -> f64 {
        self.snap(value).max(self.min_size())
    }

    /// Smallest width/height a resize may produce.
    #[must_use]
    pub fn min_size(&self) -> f64 {
        if self.enabled { self.size } else { MIN_SHAPE_SIZE }
    }

    /// Change the grid unit. Returns false (and keeps the old size) for
    /// values below one pixel or non-finite input.
    pub fn set_size(&mut self, size: f64) -> bool {
        if !size.is_finite() || size < 1.0 {
            return false;
        }
        self.size = size;
        true
    }

    /// Flip snapping on or off. Returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }
}
