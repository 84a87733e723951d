//! Route-level screens.

pub mod rooms;
