//! Recent floor-map list persisted as a JSON file.
//!
//! A missing file is an empty list. An unreadable or corrupt file is logged
//! and treated as empty so a bad cache never blocks a command; the next
//! successful save overwrites it.

#[cfg(test)]
#[path = "recent_store_test.rs"]
mod recent_store_test;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use rooms::recent::{RecentFloorMap, RecentFloorMaps};

use crate::error::CliError;

pub struct RecentStore {
    path: PathBuf,
}

impl RecentStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn load(&self) -> RecentFloorMaps {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return RecentFloorMaps::default(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "cannot read recent list");
                return RecentFloorMaps::default();
            }
        };
        match serde_json::from_str::<Vec<RecentFloorMap>>(&raw) {
            Ok(entries) => RecentFloorMaps::from_entries(entries),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring corrupt recent list");
                RecentFloorMaps::default()
            }
        }
    }

    /// Write the list, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Io`] if the file cannot be written.
    pub fn save(&self, recent: &RecentFloorMaps) -> Result<(), CliError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(CliError::io(parent))?;
        }
        let json = serde_json::to_string_pretty(recent)?;
        fs::write(&self.path, json).map_err(CliError::io(&self.path))
    }

    /// Load, push `entry` to the front, save, and return the new list.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Io`] if the file cannot be written.
    pub fn record(&self, entry: RecentFloorMap) -> Result<RecentFloorMaps, CliError> {
        let mut recent = self.load();
        recent.push(entry);
        self.save(&recent)?;
        Ok(recent)
    }
}
