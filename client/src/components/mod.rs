//! Reusable UI components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Dialogs and previews used by the rooms page. Each reads the shared session
//! and recent-list signals from context and reports results through
//! callbacks; none of them own the room list.

pub mod confirm_dialog;
pub mod floor_map_picker;
pub mod floor_map_preview;
pub mod floor_plan_designer;
pub mod room_detail_dialog;
pub mod room_form_dialog;
