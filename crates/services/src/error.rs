//! Shared error types for the services crate.

use thiserror::Error;

use drill_core::SessionError;

/// Errors emitted by `DrillService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DrillServiceError {
    #[error("set completion reported before the set was complete")]
    NotComplete,
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl DrillServiceError {
    /// True for rejections a UI can silently drop (double clicks, stale buttons).
    #[must_use]
    pub fn is_ignorable(&self) -> bool {
        matches!(self, Self::Session(SessionError::WrongPhase { .. }))
    }
}

/// Errors emitted by `AppState` transitions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AppStateError {
    #[error("sign in or continue as guest first")]
    NotSignedIn,
    #[error("pick a difficulty and operation first")]
    NoSelection,
    #[error("no finished set to show")]
    NoResults,
}
