//! The `DrawingSurface` capability and declarative layouts.
//!
//! Hosts that only need to build a plan (the command-line composer, tests)
//! talk to the engine through [`DrawingSurface`] rather than through pointer
//! events. A [`Layout`] is the JSON form of such a build script.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_RECT_HEIGHT, DEFAULT_RECT_WIDTH, DEFAULT_SURFACE_HEIGHT, DEFAULT_SURFACE_WIDTH, DEFAULT_TEXT_HEIGHT,
    DEFAULT_TEXT_WIDTH,
};
use crate::doc::ShapeId;

/// Operations every drawing surface supports.
pub trait DrawingSurface {
    /// Add a rectangle and select it.
    fn add_shape(&mut self, spec: &ShapeSpec) -> ShapeId;

    /// Add a text box and select it.
    fn add_label(&mut self, spec: &LabelSpec) -> ShapeId;

    /// Delete the selected shape. Returns false when nothing was selected.
    fn remove_selection(&mut self) -> bool;

    /// Set the zoom factor. Returns the value actually applied after clamping.
    fn set_zoom(&mut self, zoom: f64) -> f64;

    /// Serialize the plan to SVG, injecting `title` when it is non-blank.
    fn serialize(&self, title: Option<&str>) -> String;
}

/// Placement of a rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeSpec {
    pub x: f64,
    pub y: f64,
    #[serde(default = "default_rect_width")]
    pub width: f64,
    #[serde(default = "default_rect_height")]
    pub height: f64,
}

impl ShapeSpec {
    #[must_use]
    pub fn at(x: f64, y: f64) -> Self {
        Self { x, y, width: DEFAULT_RECT_WIDTH, height: DEFAULT_RECT_HEIGHT }
    }
}

/// Placement and content of a text box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelSpec {
    pub x: f64,
    pub y: f64,
    pub text: String,
    #[serde(default = "default_text_width")]
    pub width: f64,
    #[serde(default = "default_text_height")]
    pub height: f64,
}

impl LabelSpec {
    #[must_use]
    pub fn at(x: f64, y: f64, text: impl Into<String>) -> Self {
        Self { x, y, text: text.into(), width: DEFAULT_TEXT_WIDTH, height: DEFAULT_TEXT_HEIGHT }
    }
}

/// One step of a layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LayoutItem {
    Rect(ShapeSpec),
    Label(LabelSpec),
}

/// A complete plan description: surface size, optional title and items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    #[serde(default = "default_surface_width")]
    pub width: f64,
    #[serde(default = "default_surface_height")]
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub items: Vec<LayoutItem>,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            width: DEFAULT_SURFACE_WIDTH,
            height: DEFAULT_SURFACE_HEIGHT,
            title: None,
            items: Vec::new(),
        }
    }
}

/// Replay `items` onto `surface` in order, returning the created ids.
pub fn apply_layout<S: DrawingSurface + ?Sized>(surface: &mut S, items: &[LayoutItem]) -> Vec<ShapeId> {
    items
        .iter()
        .map(|item| match item {
            LayoutItem::Rect(spec) => surface.add_shape(spec),
            LayoutItem::Label(spec) => surface.add_label(spec),
        })
        .collect()
}

fn default_rect_width() -> f64 {
    DEFAULT_RECT_WIDTH
}

fn default_rect_height() -> f64 {
    DEFAULT_RECT_HEIGHT
}

fn default_text_width() -> f64 {
    DEFAULT_TEXT_WIDTH
}

fn default_text_height() -> f64 {
    DEFAULT_TEXT_HEIGHT
}

fn default_surface_width() -> f64 {
    DEFAULT_SURFACE_WIDTH
}

fn default_surface_height() -> f64 {
    DEFAULT_SURFACE_HEIGHT
}
