//! Shared room and floor-plan model for the CoreFlow rooms workflow.
//!
//! This crate owns the types and pure workflow rules used by both `client`
//! (browser) and `cli` (native). Nothing here performs I/O: transports hand
//! responses in and get decisions back, so every rule is testable without a
//! network or a browser.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`room`] | Room records, form drafts, list filtering |
//! | [`floor_map`] | Stored floor-plan document metadata and upload naming |
//! | [`reference`] | Floor-plan reference normalization and filename extraction |
//! | [`endpoints`] | REST paths relative to the API base |
//! | [`picker`] | Floor-map picker selection, filtering and preview tickets |
//! | [`preview`] | Per-component markup cache for row/detail previews |
//! | [`recent`] | Bounded most-recent-first floor-map list |
//! | [`session`] | Explicit session tokens and the retry-once-on-401 sequence |
//! | [`error`] | Workflow error taxonomy |

pub mod endpoints;
pub mod error;
pub mod floor_map;
pub mod picker;
pub mod preview;
pub mod recent;
pub mod reference;
pub mod room;
pub mod session;

pub use error::WorkflowError;
pub use floor_map::{FloorMapEntry, UploadedFloorMap};
pub use reference::{DocumentKind, FloorMapRef, ReferenceError};
pub use room::{Room, RoomDraft, RoomStatus};
pub use session::Session;
