//! Persisted recent floor maps (`localStorage["coreflow.recentFloorMaps"]`).

#[cfg(test)]
#[path = "recent_test.rs"]
mod recent_test;

use rooms::UploadedFloorMap;
use rooms::recent::{RecentFloorMap, RecentFloorMaps};
use rooms::reference;

use crate::util::storage;

pub const RECENT_KEY: &str = "coreflow.recentFloorMaps";

pub fn load() -> RecentFloorMaps {
    storage::read(RECENT_KEY).map_or_else(RecentFloorMaps::default, |raw| decode(&raw))
}

pub fn store(recent: &RecentFloorMaps) {
    match serde_json::to_string(recent) {
        Ok(raw) => storage::write(RECENT_KEY, &raw),
        Err(_) => storage::remove(RECENT_KEY),
    }
}

/// Stored entries are re-validated; a corrupt value is an empty list.
fn decode(raw: &str) -> RecentFloorMaps {
    serde_json::from_str::<Vec<RecentFloorMap>>(raw)
        .map(RecentFloorMaps::from_entries)
        .unwrap_or_default()
}

/// Remember a designer upload under the absolute URL the room will store,
/// the same form picker confirmations use. Returns that URL.
pub fn record_upload(
    recent: &mut RecentFloorMaps,
    origin: &str,
    uploaded: &UploadedFloorMap,
    title: Option<String>,
    used_at: i64,
) -> String {
    let url = reference::absolute_url(origin, &uploaded.url);
    recent.push(RecentFloorMap::from_upload(uploaded, url.clone(), title, used_at));
    url
}
