//! Explicit session tokens and the retry-once-on-401 sequence.
//!
//! ARCHITECTURE
//! ============
//! A [`Session`] is passed to every request function; there is no global
//! client holding the token. Each request walks a two-state sequence:
//!
//! ```text
//! Initial --401 + refresh token--> refresh --> Retry --any status--> done
//!    |                                           |
//!    +--401, no refresh token--> Unauthorized    +--401--> Unauthorized
//! ```
//!
//! Transports (`gloo-net` in the browser, `reqwest` in the CLI) drive the
//! loop; this module only decides the next step.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use serde::{Deserialize, Serialize};

/// HTTP status that triggers a refresh.
pub const UNAUTHORIZED: u16 = 401;

/// Bearer credentials for the current user.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Body of `POST /auth/refresh`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Response of `POST /auth/refresh`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshedTokens {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl Session {
    #[must_use]
    pub fn new(access_token: Option<String>, refresh_token: Option<String>) -> Self {
        Self {
            access_token: access_token.filter(|t| !t.trim().is_empty()),
            refresh_token: refresh_token.filter(|t| !t.trim().is_empty()),
        }
    }

    /// `Authorization` header value, if a token is held.
    #[must_use]
    pub fn authorization(&self) -> Option<String> {
        self.access_token
            .as_deref()
            .map(|token| format!("Bearer {token}"))
    }

    #[must_use]
    pub fn can_refresh(&self) -> bool {
        self.refresh_token.is_some()
    }

    #[must_use]
    pub fn refresh_request(&self) -> Option<RefreshRequest> {
        self.refresh_token
            .clone()
            .map(|refresh_token| RefreshRequest { refresh_token })
    }

    /// Store refreshed tokens. A response without a new refresh token keeps the old one.
    pub fn apply(&mut self, tokens: RefreshedTokens) {
        self.access_token = Some(tokens.access_token);
        if let Some(refresh) = tokens.refresh_token {
            self.refresh_token = Some(refresh);
        }
    }

    /// Forget both tokens (after a failed refresh).
    pub fn clear(&mut self) {
        self.access_token = None;
        self.refresh_token = None;
    }
}

/// Position in the retry sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthAttempt {
    /// First send with the current token.
    #[default]
    Initial,
    /// The single send after a successful refresh.
    Retry,
}

/// What the transport does with a response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthStep {
    /// Hand the response to the caller (which maps non-2xx to errors).
    Accept,
    /// Refresh the session, then send again as [`AuthAttempt::Retry`].
    RefreshAndRetry,
    /// Give up with [`crate::WorkflowError::Unauthorized`].
    Unauthorized,
}

impl AuthAttempt {
    /// Decide the next step after a response with `status`.
    #[must_use]
    pub fn next_step(self, status: u16, can_refresh: bool) -> AuthStep {
        if status != UNAUTHORIZED {
            return AuthStep::Accept;
        }
        match self {
            Self::Initial if can_refresh => AuthStep::RefreshAndRetry,
            Self::Initial | Self::Retry => AuthStep::Unauthorized,
        }
    }
}
