//! Geometry and key handling for the in-place text editor.
//!
//! Double-clicking a text box asks the host to float a `<textarea>` over it.
//! The host positions the element with [`TextOverlay`] (screen-space CSS
//! pixels, already scaled by the camera zoom) and routes its key presses
//! through [`overlay_key_action`]. Losing focus commits, like Enter.

#[cfg(test)]
#[path = "overlay_test.rs"]
mod overlay_test;

use crate::camera::{Camera, Point};
use crate::consts::FONT_SIZE;
use crate::doc::Shape;
use crate::input::{Key, Modifiers};

/// Screen-space box for the floating text editor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextOverlay {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub font_size: f64,
}

impl TextOverlay {
    #[must_use]
    pub fn for_shape(shape: &Shape, camera: &Camera) -> Self {
        let origin = camera.world_to_screen(Point::new(shape.x, shape.y));
        Self {
            left: origin.x,
            top: origin.y,
            width: shape.width * camera.zoom,
            height: shape.height * camera.zoom,
            font_size: FONT_SIZE * camera.zoom,
        }
    }

    /// Inline `style` attribute for the editor element.
    #[must_use]
    pub fn css(&self) -> String {
        format!(
            "left: {}px; top: {}px; width: {}px; height: {}px; font-size: {}px;",
            self.left, self.top, self.width, self.height, self.font_size
        )
    }
}

/// What a key press inside the text editor should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKey {
    /// Write the text back to the shape and close the editor.
    Commit,
    /// Close the editor and keep the previous text.
    Discard,
    /// Let the textarea handle the key.
    Pass,
}

/// Enter commits, Shift+Enter inserts a newline, Escape discards.
#[must_use]
pub fn overlay_key_action(key: &Key, modifiers: Modifiers) -> OverlayKey {
    if key.is_escape() {
        OverlayKey::Discard
    } else if key.is_enter() && !modifiers.shift {
        OverlayKey::Commit
    } else {
        OverlayKey::Pass
    }
}
