//! Client state.
//!
//! SYSTEM CONTEXT
//! ==============
//! `rooms` holds the rooms page's list, filter and dialog state; `room_form`
//! the create/edit form; `designer` the toolbar view of a drawing session;
//! `session` and `recent` the values persisted in `localStorage` and shared
//! through context.

pub mod designer;
pub mod recent;
pub mod room_form;
pub mod rooms;
pub mod session;
