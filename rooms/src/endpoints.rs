//! REST paths consumed by the rooms workflow, relative to the API base.

use crate::reference::percent_encode;

/// Room collection (`GET`, `POST`).
pub const ROOMS: &str = "/rooms";

/// Floor-map collection (`GET` list, `POST` multipart upload).
pub const FLOOR_MAPS: &str = "/rooms/floormaps";

/// Session refresh (`POST`).
pub const AUTH_REFRESH: &str = "/auth/refresh";

/// Multipart field carrying the uploaded SVG file.
pub const UPLOAD_FIELD: &str = "file";

/// Single room (`GET`, `PUT`, `DELETE`).
#[must_use]
pub fn room(room_id: i64) -> String {
    format!("{ROOMS}/{room_id}")
}

/// Raw markup of a stored floor-map document.
#[must_use]
pub fn floor_map_document(filename: &str) -> String {
    format!("{FLOOR_MAPS}/{}", percent_encode(filename))
}

/// Join an API base (`/api`, `https://host/api/`) with a path from this module.
#[must_use]
pub fn join(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{base}/{path}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_path_includes_id() {
        assert_eq!(room(42), "/rooms/42");
    }

    #[test]
    fn document_path_encodes_filename() {
        assert_eq!(floor_map_document("floor 3.svg"), "/rooms/floormaps/floor%203.svg");
    }

    #[test]
    fn join_handles_slashes() {
        assert_eq!(join("/api", ROOMS), "/api/rooms");
        assert_eq!(join("https://intra.example.com/api/", "/rooms/7"), "https://intra.example.com/api/rooms/7");
        assert_eq!(join("", FLOOR_MAPS), "/rooms/floormaps");
    }
}
