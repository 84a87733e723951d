//! Room records and the create/update form draft.
//!
//! DESIGN
//! ======
//! Rooms are owned by the backend; the client keeps a transient copy for
//! display and builds a [`RoomDraft`] for create/update. The draft is the
//! only place `detailLocation` is touched before it goes back to the server,
//! and only to trim it and collapse doubled API prefixes.

#[cfg(test)]
#[path = "room_test.rs"]
mod room_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::WorkflowError;
use crate::reference::{self, FloorMapRef, ReferenceError};

/// Whether a room can be booked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RoomStatus {
    #[default]
    Active,
    Inactive,
}

impl RoomStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
        }
    }

    /// Label shown in lists and forms.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomStatus {
    type Err = WorkflowError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(Self::Active),
            "INACTIVE" => Ok(Self::Inactive),
            other => Err(WorkflowError::Invalid(format!("unknown room status: {other}"))),
        }
    }
}

/// A room as returned by `GET /rooms` and `GET /rooms/{id}`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub room_id: i64,
    pub room_name: String,
    #[serde(default)]
    pub building_name: String,
    #[serde(default)]
    pub floor: i32,
    #[serde(default)]
    pub room_no: String,
    #[serde(default)]
    pub capacity: u32,
    #[serde(default)]
    pub status: RoomStatus,
    /// Free text or a floor-plan URL.
    #[serde(default)]
    pub detail_location: Option<String>,
}

impl Room {
    /// Resolve `detailLocation` to a stored floor-plan document.
    ///
    /// # Errors
    ///
    /// [`ReferenceError::Empty`] when the room has no location.
    pub fn floor_map(&self) -> Result<FloorMapRef, ReferenceError> {
        reference::resolve(self.detail_location.as_deref().unwrap_or_default())
    }

    /// `"Building · 3F · 301"`, skipping blank parts.
    #[must_use]
    pub fn location_label(&self) -> String {
        let floor = format!("{}F", self.floor);
        [self.building_name.trim(), floor.as_str(), self.room_no.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" · ")
    }
}

/// Form payload for `POST /rooms` and `PUT /rooms/{id}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDraft {
    pub room_name: String,
    pub building_name: String,
    pub floor: i32,
    pub room_no: String,
    pub capacity: u32,
    pub status: RoomStatus,
    pub detail_location: Option<String>,
}

impl From<&Room> for RoomDraft {
    fn from(room: &Room) -> Self {
        Self {
            room_name: room.room_name.clone(),
            building_name: room.building_name.clone(),
            floor: room.floor,
            room_no: room.room_no.clone(),
            capacity: room.capacity,
            status: room.status,
            detail_location: room.detail_location.clone(),
        }
    }
}

impl RoomDraft {
    /// Check required fields and return the draft ready to send.
    ///
    /// Text fields are trimmed; a blank `detailLocation` becomes `None`.
    ///
    /// # Errors
    ///
    /// [`WorkflowError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<Self, WorkflowError> {
        let room_name = self.room_name.trim();
        if room_name.is_empty() {
            return Err(WorkflowError::Invalid("room name is required".to_owned()));
        }
        let building_name = self.building_name.trim();
        if building_name.is_empty() {
            return Err(WorkflowError::Invalid("building name is required".to_owned()));
        }
        if self.capacity == 0 {
            return Err(WorkflowError::Invalid("capacity must be at least 1".to_owned()));
        }
        Ok(Self {
            room_name: room_name.to_owned(),
            building_name: building_name.to_owned(),
            floor: self.floor,
            room_no: self.room_no.trim().to_owned(),
            capacity: self.capacity,
            status: self.status,
            detail_location: normalize_location(self.detail_location.as_deref()),
        })
    }
}

/// Trim and collapse doubled prefixes; blank becomes `None`.
#[must_use]
pub fn normalize_location(raw: Option<&str>) -> Option<String> {
    let normalized = reference::normalize(raw?);
    if normalized.is_empty() { None } else { Some(normalized) }
}

/// Status filter for the room list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(RoomStatus),
}

/// Client-side filter over the loaded room list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoomFilter {
    pub query: String,
    pub status: StatusFilter,
}

impl RoomFilter {
    /// Case-insensitive match over name, building and room number, plus status.
    #[must_use]
    pub fn matches(&self, room: &Room) -> bool {
        if let StatusFilter::Only(status) = self.status {
            if room.status != status {
                return false;
            }
        }
        let needle = self.query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [&room.room_name, &room.building_name, &room.room_no]
            .into_iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    /// Rooms passing the filter, in their original order.
    #[must_use]
    pub fn apply<'a>(&self, rooms: &'a [Room]) -> Vec<&'a Room> {
        rooms.iter().filter(|room| self.matches(room)).collect()
    }
}
