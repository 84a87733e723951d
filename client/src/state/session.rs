//! Persisted session tokens (`localStorage["coreflow.session"]`).

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use leptos::prelude::*;
use rooms::Session;

use crate::util::storage;

pub const SESSION_KEY: &str = "coreflow.session";

/// Session from storage; missing or corrupt values give an anonymous session.
pub fn load() -> Session {
    storage::read(SESSION_KEY).map_or_else(Session::default, |raw| decode(&raw))
}

/// Persist `session`; an empty session removes the key.
pub fn store(session: &Session) {
    match encode(session) {
        Some(raw) => storage::write(SESSION_KEY, &raw),
        None => storage::remove(SESSION_KEY),
    }
}

fn decode(raw: &str) -> Session {
    serde_json::from_str::<Session>(raw)
        .map(|s| Session::new(s.access_token, s.refresh_token))
        .unwrap_or_default()
}

fn encode(session: &Session) -> Option<String> {
    if session.access_token.is_none() && session.refresh_token.is_none() {
        return None;
    }
    serde_json::to_string(session).ok()
}

/// Write back the session an API call ended with, if it changed.
pub fn commit(signal: RwSignal<Session>, updated: Session) {
    if signal.get_untracked() != updated {
        signal.set(updated);
    }
}
