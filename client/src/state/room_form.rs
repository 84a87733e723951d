//! Create/edit form for a room.
//!
//! Inputs are held as the strings the user typed; [`RoomFormState::to_draft`]
//! parses and validates them in one place so the dialog can show a single
//! inline error.

#[cfg(test)]
#[path = "room_form_test.rs"]
mod room_form_test;

use rooms::{Room, RoomDraft, RoomStatus, WorkflowError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoomFormState {
    /// `None` while creating.
    pub room_id: Option<i64>,
    pub room_name: String,
    pub building_name: String,
    pub floor: String,
    pub room_no: String,
    pub capacity: String,
    pub status: RoomStatus,
    /// Free text or a floor-plan URL set by the picker or designer.
    pub detail_location: String,
}

impl Default for RoomFormState {
    fn default() -> Self {
        Self {
            room_id: None,
            room_name: String::new(),
            building_name: String::new(),
            floor: "1".to_owned(),
            room_no: String::new(),
            capacity: String::new(),
            status: RoomStatus::Active,
            detail_location: String::new(),
        }
    }
}

impl RoomFormState {
    pub fn for_room(room: &Room) -> Self {
        Self {
            room_id: Some(room.room_id),
            room_name: room.room_name.clone(),
            building_name: room.building_name.clone(),
            floor: room.floor.to_string(),
            room_no: room.room_no.clone(),
            capacity: room.capacity.to_string(),
            status: room.status,
            detail_location: room.detail_location.clone().unwrap_or_default(),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.room_id.is_some()
    }

    /// Parse numeric fields and validate the result.
    ///
    /// # Errors
    ///
    /// [`WorkflowError::Invalid`] naming the offending field.
    pub fn to_draft(&self) -> Result<RoomDraft, WorkflowError> {
        let floor = self
            .floor
            .trim()
            .parse::<i32>()
            .map_err(|_| WorkflowError::Invalid("floor must be a whole number".to_owned()))?;
        let capacity = self
            .capacity
            .trim()
            .parse::<u32>()
            .map_err(|_| WorkflowError::Invalid("capacity must be a positive whole number".to_owned()))?;
        RoomDraft {
            room_name: self.room_name.clone(),
            building_name: self.building_name.clone(),
            floor,
            room_no: self.room_no.clone(),
            capacity,
            status: self.status,
            detail_location: Some(self.detail_location.clone()),
        }
        .validate()
    }
}
