//! Shared numeric constants for the designer crate.

// ── Surface ─────────────────────────────────────────────────────

/// Default drawing surface width in pixels.
pub const DEFAULT_SURFACE_WIDTH: f64 = 800.0;

/// Default drawing surface height in pixels.
pub const DEFAULT_SURFACE_HEIGHT: f64 = 600.0;

// ── Zoom ────────────────────────────────────────────────────────

/// Multiplier applied per zoom-in step (divided per zoom-out step).
pub const ZOOM_STEP: f64 = 1.2;

/// Smallest allowed zoom factor.
pub const MIN_ZOOM: f64 = 0.25;

/// Largest allowed zoom factor.
pub const MAX_ZOOM: f64 = 4.0;

// ── Grid ────────────────────────────────────────────────────────

/// Default grid unit in world pixels.
pub const DEFAULT_GRID_SIZE: f64 = 20.0;

// ── Shapes ──────────────────────────────────────────────────────

/// Size of a rectangle created by a single click.
pub const DEFAULT_RECT_WIDTH: f64 = 120.0;
pub const DEFAULT_RECT_HEIGHT: f64 = 80.0;

/// Size of a text box created by a single click.
pub const DEFAULT_TEXT_WIDTH: f64 = 160.0;
pub const DEFAULT_TEXT_HEIGHT: f64 = 40.0;

/// Placeholder content of a new text box.
pub const DEFAULT_TEXT: &str = "Text";

/// Minimum width/height a resize may produce, in world pixels.
pub const MIN_SHAPE_SIZE: f64 = 10.0;

/// Label font size in world pixels.
pub const FONT_SIZE: f64 = 16.0;

/// Line height as a multiple of [`FONT_SIZE`].
pub const LINE_HEIGHT: f64 = 1.2;

/// Inset of label text from the top-left corner of its box.
pub const TEXT_PADDING: f64 = 4.0;

pub const FONT_FAMILY: &str = "sans-serif";

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space hit slop in pixels for resize handles.
pub const HANDLE_RADIUS_PX: f64 = 8.0;

// ── Colors ──────────────────────────────────────────────────────

pub const RECT_FILL: &str = "#ffffff";
pub const RECT_STROKE: &str = "#1f2937";
pub const RECT_STROKE_WIDTH: f64 = 2.0;
pub const TEXT_FILL: &str = "#111827";
pub const GRID_STROKE: &str = "#e5e7eb";
pub const SELECTION_STROKE: &str = "#2563eb";
