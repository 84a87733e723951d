//! Rendering: draws the designer scene to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It reads engine state and produces pixels; it never mutates anything.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::consts::{
    FONT_FAMILY, FONT_SIZE, GRID_STROKE, HANDLE_RADIUS_PX, LINE_HEIGHT, RECT_FILL, RECT_STROKE, RECT_STROKE_WIDTH,
    SELECTION_STROKE, TEXT_FILL, TEXT_PADDING,
};
use crate::doc::{Shape, ShapeKind};
use crate::engine::EngineCore;
use crate::hit::{ResizeAnchor, handle_position};

/// Selection dash segment length in screen pixels.
const SELECTION_DASH_PX: f64 = 4.0;

/// Draw the full scene: grid, shapes, then selection UI.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails.
pub fn draw(ctx: &CanvasRenderingContext2d, core: &EngineCore) -> Result<(), JsValue> {
    let zoom = core.camera.zoom;
    let (screen_w, screen_h) = core.screen_size();

    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, screen_w, screen_h);
    ctx.translate(core.camera.pan_x, core.camera.pan_y)?;
    ctx.scale(zoom, zoom)?;

    if core.grid.enabled {
        draw_grid(ctx, core.width, core.height, core.grid.size, zoom);
    }

    for shape in core.doc.sorted_shapes() {
        match shape.kind {
            ShapeKind::Rect => draw_rect(ctx, shape),
            ShapeKind::Text => draw_text(ctx, shape)?,
        }
    }

    if let Some(shape) = core.ui.selected_id.and_then(|id| core.doc.get(&id)) {
        draw_selection(ctx, shape, zoom)?;
    }

    Ok(())
}

fn draw_grid(ctx: &CanvasRenderingContext2d, width: f64, height: f64, size: f64, zoom: f64) {
    ctx.begin_path();
    let mut x = 0.0;
    while x <= width {
        ctx.move_to(x, 0.0);
        ctx.line_to(x, height);
        x += size;
    }
    let mut y = 0.0;
    while y <= height {
        ctx.move_to(0.0, y);
        ctx.line_to(width, y);
        y += size;
    }
    ctx.set_stroke_style_str(GRID_STROKE);
    ctx.set_line_width(1.0 / zoom);
    ctx.stroke();
}

fn draw_rect(ctx: &CanvasRenderingContext2d, shape: &Shape) {
    ctx.set_fill_style_str(RECT_FILL);
    ctx.fill_rect(shape.x, shape.y, shape.width, shape.height);
    ctx.set_stroke_style_str(RECT_STROKE);
    ctx.set_line_width(RECT_STROKE_WIDTH);
    ctx.stroke_rect(shape.x, shape.y, shape.width, shape.height);
}

fn draw_text(ctx: &CanvasRenderingContext2d, shape: &Shape) -> Result<(), JsValue> {
    ctx.set_fill_style_str(TEXT_FILL);
    ctx.set_font(&format!("{FONT_SIZE}px {FONT_FAMILY}"));
    ctx.set_text_baseline("alphabetic");
    let x = shape.x + TEXT_PADDING;
    let mut y = shape.y + TEXT_PADDING + FONT_SIZE;
    for line in shape.text.lines() {
        ctx.fill_text(line, x, y)?;
        y += FONT_SIZE * LINE_HEIGHT;
    }
    Ok(())
}

fn draw_selection(ctx: &CanvasRenderingContext2d, shape: &Shape, zoom: f64) -> Result<(), JsValue> {
    let dash = SELECTION_DASH_PX / zoom;
    let dash_array = js_sys::Array::of2(&JsValue::from_f64(dash), &JsValue::from_f64(dash));

    ctx.set_stroke_style_str(SELECTION_STROKE);
    ctx.set_line_width(1.0 / zoom);
    ctx.set_line_dash(&dash_array)?;
    ctx.stroke_rect(shape.x, shape.y, shape.width, shape.height);
    ctx.set_line_dash(&js_sys::Array::new())?;

    let half = HANDLE_RADIUS_PX * 0.5 / zoom;
    ctx.set_fill_style_str(RECT_FILL);
    for anchor in ResizeAnchor::ALL {
        let p = handle_position(shape, anchor);
        ctx.fill_rect(p.x - half, p.y - half, half * 2.0, half * 2.0);
        ctx.stroke_rect(p.x - half, p.y - half, half * 2.0, half * 2.0);
    }
    Ok(())
}
