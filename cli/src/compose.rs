//! Headless floor-plan composition.
//!
//! Replays a JSON [`Layout`] onto a fresh designer engine and serializes the
//! result, producing the same markup the browser designer would for the same
//! shapes.

use std::fs;
use std::path::Path;

use designer::engine::EngineCore;
use designer::surface::{DrawingSurface, Layout, apply_layout};

use crate::error::CliError;

/// Build the SVG for `layout`. A `title_override` wins over the layout's title.
#[must_use]
pub fn compose(layout: &Layout, title_override: Option<&str>) -> String {
    let mut core = EngineCore::new(layout.width, layout.height);
    let ids = apply_layout(&mut core, &layout.items);
    tracing::debug!(shapes = ids.len(), width = layout.width, height = layout.height, "layout applied");
    core.serialize(title_override.or(layout.title.as_deref()))
}

/// Read a layout file.
///
/// # Errors
///
/// [`CliError::Io`] when unreadable, [`CliError::InvalidJson`] when malformed.
pub fn read_layout(path: &Path) -> Result<Layout, CliError> {
    let raw = fs::read_to_string(path).map_err(CliError::io(path))?;
    Ok(serde_json::from_str(&raw)?)
}

#[cfg(test)]
mod tests {
    use designer::surface::{LabelSpec, LayoutItem, ShapeSpec};

    use super::*;

    fn layout() -> Layout {
        Layout {
            width: 400.0,
            height: 300.0,
            title: Some("2F West".to_owned()),
            items: vec![
                LayoutItem::Rect(ShapeSpec::at(20.0, 20.0)),
                LayoutItem::Label(LabelSpec::at(40.0, 40.0, "Meeting 201")),
            ],
        }
    }

    #[test]
    fn compose_writes_shapes_and_title() {
        let svg = compose(&layout(), None);
        assert!(svg.contains(r#"width="400" height="300" viewBox="0 0 400 300"><title>2F West</title>"#));
        assert!(svg.contains("<rect"));
        assert!(svg.contains("Meeting 201"));
    }

    #[test]
    fn title_override_wins() {
        let svg = compose(&layout(), Some("Override"));
        assert!(svg.contains("<title>Override</title>"));
        assert!(!svg.contains("2F West"));
    }

    #[test]
    fn read_layout_reports_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");
        fs::write(&path, "[1,2").unwrap();
        assert!(matches!(read_layout(&path), Err(CliError::InvalidJson(_))));
        assert!(matches!(read_layout(&dir.path().join("missing.json")), Err(CliError::Io { .. })));
    }
}
