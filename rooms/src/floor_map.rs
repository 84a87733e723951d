//! Stored floor-plan documents as seen by the client.
//!
//! DESIGN
//! ======
//! The backend owns these documents; the client only lists them, fetches
//! their markup, and uploads new ones. Entries are never edited in place.

#[cfg(test)]
#[path = "floor_map_test.rs"]
mod floor_map_test;

use chrono::{DateTime, NaiveDateTime};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// MIME type used for uploads and the `Accept` header on document fetches.
pub const SVG_CONTENT_TYPE: &str = "image/svg+xml";

/// One stored floor-plan document from `GET /rooms/floormaps`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorMapEntry {
    /// Server-assigned filename; the stable identity of the document.
    pub filename: String,
    /// URL the document is served from. May be relative.
    pub url: String,
    /// Title embedded in the SVG, if the server surfaced one.
    #[serde(default)]
    pub title: Option<String>,
    /// Size in bytes.
    #[serde(default)]
    pub size: u64,
    /// Last-modified time in milliseconds since the Unix epoch.
    #[serde(default, deserialize_with = "deserialize_modified_at")]
    pub modified_at: Option<i64>,
}

impl FloorMapEntry {
    /// Title when present and non-blank, else the filename.
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(&self.filename)
    }

    /// Case-insensitive substring match over title and filename.
    /// A blank query matches everything.
    #[must_use]
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.filename.to_lowercase().contains(&needle)
            || self
                .title
                .as_deref()
                .is_some_and(|t| t.to_lowercase().contains(&needle))
    }

    /// Human-readable size, e.g. `"12.4 KB"`.
    #[must_use]
    pub fn size_label(&self) -> String {
        #[allow(clippy::cast_precision_loss)]
        let bytes = self.size as f64;
        if bytes < 1024.0 {
            format!("{} B", self.size)
        } else if bytes < 1024.0 * 1024.0 {
            format!("{:.1} KB", bytes / 1024.0)
        } else {
            format!("{:.1} MB", bytes / (1024.0 * 1024.0))
        }
    }
}

/// Response of `POST /rooms/floormaps`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFloorMap {
    pub url: String,
    pub filename: String,
}

/// Unique upload filename derived from the current time.
#[must_use]
pub fn upload_filename(now_ms: i64) -> String {
    format!("floormap-{now_ms}.svg")
}

/// Accept either epoch milliseconds or an ISO-8601 timestamp.
fn deserialize_modified_at<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::Number(number)) => {
            if let Some(int) = number.as_i64() {
                return Ok(Some(int));
            }
            if let Some(float) = number.as_f64()
                && float.is_finite()
            {
                #[allow(clippy::cast_possible_truncation)]
                let millis = float.round() as i64;
                return Ok(Some(millis));
            }
            Err(D::Error::custom("expected integer-compatible number"))
        }
        Some(serde_json::Value::String(raw)) => parse_timestamp_ms(&raw)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("unrecognized timestamp: {raw}"))),
        Some(_) => Err(D::Error::custom("expected number or timestamp string")),
    }
}

/// Parse RFC 3339, or a zone-less `YYYY-MM-DDTHH:MM:SS[.fff]` taken as UTC.
fn parse_timestamp_ms(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp_millis());
    }
    match NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        Ok(naive) => Some(naive.and_utc().timestamp_millis()),
        Err(_) => None,
    }
}
