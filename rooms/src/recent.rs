//! Bounded most-recent-first list of floor maps the user picked or uploaded.
//!
//! Persisted by the host (browser `localStorage`, a JSON file in the CLI).
//! Stored content is untrusted: [`RecentFloorMaps::from_entries`] re-applies
//! the capacity and de-duplication rules on load.

#[cfg(test)]
#[path = "recent_test.rs"]
mod recent_test;

use serde::{Deserialize, Serialize};

use crate::floor_map::{FloorMapEntry, UploadedFloorMap};
use crate::reference;

/// Maximum number of remembered floor maps.
pub const RECENT_CAPACITY: usize = 8;

/// One remembered floor map.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentFloorMap {
    pub url: String,
    pub filename: String,
    #[serde(default)]
    pub title: Option<String>,
    /// When it was last used, in milliseconds since the Unix epoch.
    #[serde(default)]
    pub used_at: i64,
}

impl RecentFloorMap {
    #[must_use]
    pub fn from_entry(entry: &FloorMapEntry, url: String, used_at: i64) -> Self {
        Self {
            url,
            filename: entry.filename.clone(),
            title: entry.title.clone(),
            used_at,
        }
    }

    /// `url` is the form the host stores in `detailLocation` (absolute in the
    /// browser), so uploads and picks of one document share an entry.
    #[must_use]
    pub fn from_upload(upload: &UploadedFloorMap, url: String, title: Option<String>, used_at: i64) -> Self {
        Self {
            url,
            filename: upload.filename.clone(),
            title,
            used_at,
        }
    }
}

/// Most-recent-first, capped at [`RECENT_CAPACITY`], unique by normalized URL.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecentFloorMaps {
    entries: Vec<RecentFloorMap>,
}

impl RecentFloorMaps {
    /// Rebuild from stored entries, keeping the first occurrence of each URL.
    #[must_use]
    pub fn from_entries(entries: Vec<RecentFloorMap>) -> Self {
        let mut out = Self::default();
        for mut entry in entries {
            entry.url = reference::normalize(&entry.url);
            if entry.url.is_empty() || out.contains(&entry.url) {
                continue;
            }
            if out.entries.len() == RECENT_CAPACITY {
                break;
            }
            out.entries.push(entry);
        }
        out
    }

    /// Move `entry` to the front, dropping any older entry with the same URL
    /// and the oldest entry past capacity.
    pub fn push(&mut self, mut entry: RecentFloorMap) {
        entry.url = reference::normalize(&entry.url);
        if entry.url.is_empty() {
            return;
        }
        self.entries.retain(|existing| existing.url != entry.url);
        self.entries.insert(0, entry);
        self.entries.truncate(RECENT_CAPACITY);
    }

    /// Forget a URL. Returns whether anything was removed.
    pub fn remove(&mut self, url: &str) -> bool {
        let url = reference::normalize(url);
        let before = self.entries.len();
        self.entries.retain(|existing| existing.url != url);
        self.entries.len() != before
    }

    #[must_use]
    pub fn contains(&self, url: &str) -> bool {
        let url = reference::normalize(url);
        self.entries.iter().any(|existing| existing.url == url)
    }

    #[must_use]
    pub fn entries(&self) -> &[RecentFloorMap] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
