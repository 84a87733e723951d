//! Floor-map picker state: list, filter, selection and the selected preview.
//!
//! DESIGN
//! ======
//! Selection is tracked by URL so it survives filtering and list reloads.
//! Every selection change issues a new ticket; a markup response carrying
//! an older ticket is discarded, so a slow response for a previous selection
//! can never overwrite the current preview.

#[cfg(test)]
#[path = "picker_test.rs"]
mod picker_test;

use crate::floor_map::FloorMapEntry;
use crate::preview::{FetchTicket, PreviewState};
use crate::reference;

/// Picker dialog state.
#[derive(Clone, Debug, Default)]
pub struct PickerState {
    entries: Vec<FloorMapEntry>,
    selected_url: Option<String>,
    query: String,
    preview: PreviewState,
    ticket: u64,
}

impl PickerState {
    /// Build from a fetched list, pre-selecting `initial_url` when it names
    /// the same document as an entry (both made absolute against `origin`),
    /// else the first entry.
    #[must_use]
    pub fn new(entries: Vec<FloorMapEntry>, initial_url: Option<&str>, origin: &str) -> Self {
        let selected_url = initial_url
            .and_then(|initial| {
                entries
                    .iter()
                    .find(|entry| reference::same_document(origin, &entry.url, initial))
            })
            .or_else(|| entries.first())
            .map(|entry| entry.url.clone());
        Self {
            entries,
            selected_url,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[FloorMapEntry] {
        &self.entries
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Entries matching the current query, in list order.
    #[must_use]
    pub fn filtered(&self) -> Vec<&FloorMapEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.matches_query(&self.query))
            .collect()
    }

    #[must_use]
    pub fn selected(&self) -> Option<&FloorMapEntry> {
        let url = self.selected_url.as_deref()?;
        self.entries.iter().find(|entry| entry.url == url)
    }

    #[must_use]
    pub fn is_selected(&self, entry: &FloorMapEntry) -> bool {
        self.selected_url.as_deref() == Some(entry.url.as_str())
    }

    #[must_use]
    pub fn preview(&self) -> &PreviewState {
        &self.preview
    }

    /// Select the entry with `url` and plan its markup fetch.
    ///
    /// Returns `None` when no entry has that URL, or when its filename cannot
    /// be resolved (the preview then shows the failure inline).
    pub fn select(&mut self, url: &str) -> Option<FetchTicket> {
        let entry = self.entries.iter().find(|entry| entry.url == url)?.clone();
        self.selected_url = Some(entry.url.clone());
        self.load_preview_for(&entry)
    }

    /// Plan the fetch for the current selection (used right after opening).
    pub fn load_selected_preview(&mut self) -> Option<FetchTicket> {
        let entry = self.selected()?.clone();
        self.load_preview_for(&entry)
    }

    /// Apply a markup response. Returns `false` when the ticket is stale.
    pub fn apply_preview(&mut self, ticket: &FetchTicket, result: Result<String, crate::WorkflowError>) -> bool {
        if ticket.id != self.ticket {
            return false;
        }
        self.preview = PreviewState::from_result(result);
        true
    }

    /// Confirm the selection, returning its absolute URL joined onto `origin`.
    ///
    /// Never returns a bare filename.
    #[must_use]
    pub fn confirm(&self, origin: &str) -> Option<String> {
        let entry = self.selected()?;
        Some(reference::absolute_url(origin, &entry.url))
    }

    fn load_preview_for(&mut self, entry: &FloorMapEntry) -> Option<FetchTicket> {
        self.ticket += 1;
        // The filename is derived from the URL; the listed filename is only a fallback.
        let resolved = reference::resolve(&entry.url).or_else(|_| reference::resolve(&entry.filename));
        match resolved {
            Ok(resolved) => {
                self.preview = PreviewState::Loading;
                Some(FetchTicket {
                    id: self.ticket,
                    path: resolved.document_path(),
                    filename: resolved.filename,
                })
            }
            Err(err) => {
                self.preview = PreviewState::Failed(crate::WorkflowError::from(err).to_string());
                None
            }
        }
    }
}
