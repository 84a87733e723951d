//! Native client for the CoreFlow rooms API.
//!
//! The `coreflow` binary is a thin clap front-end over this library so the
//! HTTP client, the recent-list file and headless plan composition can be
//! driven from integration tests against a stub backend.

pub mod api;
pub mod compose;
pub mod error;
pub mod recent_store;

pub use api::ApiClient;
pub use error::CliError;

use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch, or 0 if the clock is before it.
#[must_use]
pub fn now_ms() -> i64 {
    let Ok(duration) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(duration.as_millis()).unwrap_or(0)
}
