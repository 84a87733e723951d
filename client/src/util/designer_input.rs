//! DOM input mapping for the floor-plan designer host.

#[cfg(test)]
#[path = "designer_input_test.rs"]
mod designer_input_test;

use designer::input::{Key, Modifiers};

pub fn map_modifiers(shift: bool, ctrl: bool, alt: bool, meta: bool) -> Modifiers {
    Modifiers { shift, ctrl, alt, meta }
}

/// Keys the designer consumes; the browser default is suppressed for these
/// unless a text field has focus.
pub fn should_prevent_default_key(key: &Key, text_field_focused: bool) -> bool {
    !text_field_focused && (key.is_delete() || key.is_escape())
}

/// Parse the grid-size input. Blank, non-numeric and sub-pixel values are rejected.
pub fn parse_grid_size(raw: &str) -> Option<f64> {
    let size: f64 = raw.trim().parse().ok()?;
    (size.is_finite() && size >= 1.0).then_some(size)
}

/// `"125%"` style label for the zoom readout.
pub fn zoom_label(percent: u32) -> String {
    format!("{percent}%")
}

#[cfg(feature = "csr")]
pub fn pointer_point(ev: &leptos::ev::PointerEvent) -> designer::camera::Point {
    designer::camera::Point::new(f64::from(ev.offset_x()), f64::from(ev.offset_y()))
}

#[cfg(feature = "csr")]
pub fn mouse_point(ev: &leptos::ev::MouseEvent) -> designer::camera::Point {
    designer::camera::Point::new(f64::from(ev.offset_x()), f64::from(ev.offset_y()))
}

/// Whether keyboard focus is inside an editable field.
#[cfg(feature = "csr")]
pub fn text_field_focused() -> bool {
    let Some(active) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.active_element())
    else {
        return false;
    };
    matches!(active.tag_name().to_ascii_uppercase().as_str(), "INPUT" | "TEXTAREA")
        || active.get_attribute("contenteditable").is_some_and(|v| v != "false")
}
