//! Rooms page state: the loaded list, its filter, and which dialog is open.
//!
//! DESIGN
//! ======
//! The list is a transient copy of the backend's rooms. Mutations go to the
//! server first; the page then reloads, so this state never invents rooms.
//! At most one dialog is open at a time.

#[cfg(test)]
#[path = "rooms_test.rs"]
mod rooms_test;

use rooms::room::{RoomFilter, StatusFilter};
use rooms::{Room, RoomStatus, WorkflowError};

/// The dialog layered over the rooms list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum RoomDialog {
    #[default]
    Closed,
    Detail(i64),
    Create,
    Edit(i64),
}

#[derive(Clone, Debug, Default)]
pub struct RoomsState {
    pub items: Vec<Room>,
    pub loading: bool,
    pub error: Option<String>,
    pub filter: RoomFilter,
    pub dialog: RoomDialog,
    /// Bumped to request a reload.
    pub reload_seq: u64,
}

impl RoomsState {
    /// Rooms passing the current filter.
    pub fn visible(&self) -> Vec<Room> {
        self.filter.apply(&self.items).into_iter().cloned().collect()
    }

    pub fn room(&self, room_id: i64) -> Option<&Room> {
        self.items.iter().find(|r| r.room_id == room_id)
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Apply a list response. A failure keeps the previous rows.
    pub fn finish_load(&mut self, result: Result<Vec<Room>, WorkflowError>) {
        self.loading = false;
        match result {
            Ok(items) => {
                self.items = items;
                self.error = None;
                if let RoomDialog::Detail(id) | RoomDialog::Edit(id) = self.dialog {
                    if self.room(id).is_none() {
                        self.dialog = RoomDialog::Closed;
                    }
                }
            }
            Err(err) => self.error = Some(err.to_string()),
        }
    }

    pub fn request_reload(&mut self) {
        self.reload_seq += 1;
    }

    pub fn set_query(&mut self, query: String) {
        self.filter.query = query;
    }

    /// Status select value: `""` for all, else a status name.
    pub fn set_status_filter(&mut self, raw: &str) {
        self.filter.status = raw.parse::<RoomStatus>().map_or(StatusFilter::All, StatusFilter::Only);
    }

    pub fn status_filter_value(&self) -> &'static str {
        match self.filter.status {
            StatusFilter::All => "",
            StatusFilter::Only(status) => status.as_str(),
        }
    }

    /// The dialog closed after a successful save or delete: close and reload.
    pub fn mutation_done(&mut self) {
        self.dialog = RoomDialog::Closed;
        self.request_reload();
    }
}
