//! Error taxonomy for the floor-plan workflow.
//!
//! Every variant renders to a short human-readable message; components show
//! that message inline and keep the rest of the UI usable.

use crate::reference::ReferenceError;

/// Failure of a single workflow attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkflowError {
    /// The request never produced a response (network down, CORS, aborted).
    #[error("network error: {0}")]
    Transport(String),
    /// The server answered with a non-2xx status.
    #[error("request failed ({status}): {message}")]
    Status { status: u16, message: String },
    /// The session could not be refreshed, or the retry was rejected again.
    #[error("session expired; sign in again")]
    Unauthorized,
    /// A floor-plan reference did not yield a filename.
    #[error("cannot resolve floor plan: {0}")]
    UnresolvableReference(#[from] ReferenceError),
    /// The drawing surface could not be acquired.
    #[error("drawing surface unavailable")]
    SurfaceUnavailable,
    /// Malformed input or response body.
    #[error("{0}")]
    Invalid(String),
}

impl WorkflowError {
    /// Build a [`WorkflowError::Status`] from a status code and response body.
    ///
    /// Blank bodies fall back to a generic message so the inline error is never empty.
    #[must_use]
    pub fn from_status(status: u16, body: &str) -> Self {
        let trimmed = body.trim();
        let message = if trimmed.is_empty() {
            "no details".to_owned()
        } else {
            trimmed.to_owned()
        };
        Self::Status { status, message }
    }

    /// Whether the failure came from the server rejecting the session.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized | Self::Status { status: 401, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_status_keeps_trimmed_body() {
        let err = WorkflowError::from_status(404, "  not found \n");
        assert_eq!(err, WorkflowError::Status { status: 404, message: "not found".to_owned() });
        assert_eq!(err.to_string(), "request failed (404): not found");
    }

    #[test]
    fn from_status_blank_body_uses_placeholder() {
        let err = WorkflowError::from_status(500, "");
        assert_eq!(err.to_string(), "request failed (500): no details");
    }

    #[test]
    fn unresolvable_reference_wraps_reason() {
        let err = WorkflowError::from(ReferenceError::Empty);
        assert_eq!(err.to_string(), "cannot resolve floor plan: reference is empty");
    }

    #[test]
    fn unauthorized_detection() {
        assert!(WorkflowError::Unauthorized.is_unauthorized());
        assert!(WorkflowError::from_status(401, "").is_unauthorized());
        assert!(!WorkflowError::from_status(403, "").is_unauthorized());
    }
}
