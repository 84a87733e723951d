//! Per-component floor-plan markup cache.
//!
//! Each room row and detail view owns one [`PreviewCache`]. Asking it for a
//! reference yields a [`PreviewPlan`]: show a placeholder, show what is
//! already known, or issue exactly one fetch for a filename not seen before.
//! A fetch is identified by a [`FetchTicket`]; completing with a ticket that
//! is no longer active (reference changed, row unmounted) is ignored.

#[cfg(test)]
#[path = "preview_test.rs"]
mod preview_test;

use std::collections::HashMap;

use crate::error::WorkflowError;
use crate::reference::{self, FloorMapRef, ReferenceError};

/// What a preview slot currently shows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum PreviewState {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// Raw SVG markup, ready to inject.
    Ready(String),
    /// Terminal failure for this filename; shown inline.
    Failed(String),
}

impl PreviewState {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub fn markup(&self) -> Option<&str> {
        match self {
            Self::Ready(markup) => Some(markup),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Fold a fetch outcome into a state.
    #[must_use]
    pub fn from_result(result: Result<String, WorkflowError>) -> Self {
        match result {
            Ok(markup) => Self::Ready(markup),
            Err(err) => Self::Failed(err.to_string()),
        }
    }
}

/// Why a reference renders as a placeholder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placeholder {
    /// No reference at all.
    Empty,
    /// The reference has no filename.
    Unresolvable,
    /// The reference points at something other than an SVG (or is free text).
    NotSvg,
}

/// One outstanding markup fetch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    pub id: u64,
    pub filename: String,
    /// Document path relative to the API base.
    pub path: String,
}

/// Decision for a reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PreviewPlan {
    Placeholder(Placeholder),
    /// The filename was requested before; show its state.
    Cached(PreviewState),
    /// Issue this fetch, then call [`PreviewCache::complete`].
    Fetch(FetchTicket),
}

/// Markup cache keyed by filename, with at most one active fetch.
#[derive(Clone, Debug, Default)]
pub struct PreviewCache {
    entries: HashMap<String, PreviewState>,
    active: Option<FetchTicket>,
    next_ticket: u64,
}

impl PreviewCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Plan the preview for a reference.
    ///
    /// Switching to a different filename while a fetch is active cancels it.
    pub fn request(&mut self, raw: Option<&str>) -> PreviewPlan {
        let resolved = match reference::resolve(raw.unwrap_or_default()) {
            Ok(resolved) => resolved,
            Err(ReferenceError::Empty) => {
                self.cancel();
                return PreviewPlan::Placeholder(Placeholder::Empty);
            }
            Err(ReferenceError::NoFilename) => {
                self.cancel();
                return PreviewPlan::Placeholder(Placeholder::Unresolvable);
            }
        };
        if !resolved.is_svg() {
            self.cancel();
            return PreviewPlan::Placeholder(Placeholder::NotSvg);
        }
        if self
            .active
            .as_ref()
            .is_some_and(|ticket| ticket.filename != resolved.filename)
        {
            self.cancel();
        }
        if let Some(state) = self.entries.get(&resolved.filename) {
            return PreviewPlan::Cached(state.clone());
        }
        PreviewPlan::Fetch(self.issue(&resolved))
    }

    /// Record a fetch outcome. Returns `false` for a cancelled or stale ticket.
    pub fn complete(&mut self, ticket: &FetchTicket, result: Result<String, WorkflowError>) -> bool {
        if self.active.as_ref() != Some(ticket) {
            return false;
        }
        self.active = None;
        self.entries
            .insert(ticket.filename.clone(), PreviewState::from_result(result));
        true
    }

    /// Drop the active fetch, if any. Its filename can be requested again.
    pub fn cancel(&mut self) -> Option<FetchTicket> {
        let ticket = self.active.take()?;
        if self
            .entries
            .get(&ticket.filename)
            .is_some_and(PreviewState::is_loading)
        {
            self.entries.remove(&ticket.filename);
        }
        Some(ticket)
    }

    /// Current state for a filename.
    #[must_use]
    pub fn state(&self, filename: &str) -> PreviewState {
        self.entries.get(filename).cloned().unwrap_or_default()
    }

    #[must_use]
    pub fn active(&self) -> Option<&FetchTicket> {
        self.active.as_ref()
    }

    fn issue(&mut self, resolved: &FloorMapRef) -> FetchTicket {
        self.next_ticket += 1;
        let ticket = FetchTicket {
            id: self.next_ticket,
            filename: resolved.filename.clone(),
            path: resolved.document_path(),
        };
        self.entries
            .insert(resolved.filename.clone(), PreviewState::Loading);
        self.active = Some(ticket.clone());
        ticket
    }
}
