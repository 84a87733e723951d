//! SVG serialization of a floor plan.
//!
//! The output is a standalone document whose root carries the surface's
//! `width`, `height` and `viewBox`. Rectangles become `<rect>`, text boxes
//! become `<text>` with one `<tspan>` per line. A non-blank title is inserted
//! as the first child of the root element. All character data is XML-escaped.

#[cfg(test)]
#[path = "svg_test.rs"]
mod svg_test;

use std::borrow::Cow;
use std::fmt;

use crate::consts::{
    FONT_FAMILY, FONT_SIZE, LINE_HEIGHT, RECT_FILL, RECT_STROKE, RECT_STROKE_WIDTH, TEXT_FILL, TEXT_PADDING,
};
use crate::doc::{Shape, ShapeKind};

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// A plan ready to be written as SVG markup.
pub struct SvgDocument<'a> {
    pub width: f64,
    pub height: f64,
    /// Shapes in draw order (bottom first).
    pub shapes: Vec<&'a Shape>,
}

impl fmt::Display for SvgDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (w, h) = (Num(self.width), Num(self.height));
        write!(f, r#"<svg xmlns="{SVG_NAMESPACE}" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#)?;
        for shape in &self.shapes {
            match shape.kind {
                ShapeKind::Rect => write_rect(f, shape)?,
                ShapeKind::Text => write_text(f, shape)?,
            }
        }
        f.write_str("</svg>")
    }
}

/// Serialize shapes to a complete SVG document.
#[must_use]
pub fn serialize(shapes: Vec<&Shape>, width: f64, height: f64, title: Option<&str>) -> String {
    let markup = SvgDocument { width, height, shapes }.to_string();
    match title {
        Some(title) => inject_title(&markup, title),
        None => markup,
    }
}

/// Insert `<title>` as the first child of the root element.
///
/// Blank titles leave the markup untouched, as does markup without a
/// recognizable root start tag.
#[must_use]
pub fn inject_title(markup: &str, title: &str) -> String {
    let title = title.trim();
    if title.is_empty() {
        return markup.to_owned();
    }
    let Some(root_start) = markup.find("<svg") else {
        return markup.to_owned();
    };
    let Some(tag_len) = markup[root_start..].find('>') else {
        return markup.to_owned();
    };
    let tag_end = root_start + tag_len;
    let element = format!("<title>{}</title>", escape_xml(title));

    if markup[..tag_end].ends_with('/') {
        // Self-closing root: open it up so it can hold the title.
        let head = &markup[..tag_end - 1];
        let tail = &markup[tag_end + 1..];
        format!("{}>{element}</svg>{tail}", head.trim_end())
    } else {
        let (head, tail) = markup.split_at(tag_end + 1);
        format!("{head}{element}{tail}")
    }
}

/// Escape the five XML special characters.
#[must_use]
pub fn escape_xml(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

fn write_rect(f: &mut fmt::Formatter<'_>, shape: &Shape) -> fmt::Result {
    write!(
        f,
        r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{RECT_FILL}" stroke="{RECT_STROKE}" stroke-width="{}"/>"#,
        Num(shape.x),
        Num(shape.y),
        Num(shape.width),
        Num(shape.height),
        Num(RECT_STROKE_WIDTH),
    )
}

fn write_text(f: &mut fmt::Formatter<'_>, shape: &Shape) -> fmt::Result {
    if shape.text.trim().is_empty() {
        return Ok(());
    }
    let x = Num(shape.x + TEXT_PADDING);
    let y = Num(shape.y + TEXT_PADDING + FONT_SIZE);
    write!(
        f,
        r#"<text x="{x}" y="{y}" font-family="{FONT_FAMILY}" font-size="{}" fill="{TEXT_FILL}">"#,
        Num(FONT_SIZE)
    )?;
    for (i, line) in shape.text.lines().enumerate() {
        let dy = if i == 0 { Num(0.0) } else { Num(FONT_SIZE * LINE_HEIGHT) };
        write!(f, r#"<tspan x="{x}" dy="{dy}">{}</tspan>"#, escape_xml(line))?;
    }
    f.write_str("</text>")
}

/// Coordinate formatter: at most two decimals, no trailing zeros, no `-0`.
struct Num(f64);

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = (self.0 * 100.0).round() / 100.0;
        if rounded == 0.0 || !rounded.is_finite() {
            f.write_str("0")
        } else {
            write!(f, "{rounded}")
        }
    }
}
