//! Errors raised while handling a dialog step.

use crate::access::AccessDenied;
use crate::session::SessionError;
use crate::tracker::{ports::StoreError, services::LifecycleError};
use thiserror::Error;

/// Failure of a single dialog step.
#[derive(Debug, Error)]
pub enum DialogError {
    /// The tracker rejected the operation.
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
    /// Session scratch values could not be read or written.
    #[error(transparent)]
    Session(#[from] SessionError),
    /// A scratch value the current position relies on is missing.
    #[error("session value `{0}` is missing")]
    MissingScratch(&'static str),
    /// A reply template failed to render.
    #[error("cannot render `{template}`: {reason}")]
    Render {
        /// Template name.
        template: &'static str,
        /// Renderer message.
        reason: String,
    },
}

impl From<AccessDenied> for DialogError {
    fn from(denied: AccessDenied) -> Self {
        Self::Lifecycle(LifecycleError::Forbidden(denied))
    }
}

/// How a failed step is reported and whether the dialog survives it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    /// The role does not permit the step; the dialog ends.
    Forbidden,
    /// A referenced record no longer resolves or was changed by someone
    /// else; the dialog ends.
    NotFound,
    /// The user has no task in an active sprint; the dialog ends.
    NoActiveSprint,
    /// The input or session is unusable; the dialog ends.
    Invalid,
    /// Storage or rendering failed; the session is kept for a retry.
    Retry,
}

impl Failure {
    /// Returns `true` when the session should be cleared.
    #[must_use]
    pub const fn ends_dialog(self) -> bool {
        !matches!(self, Self::Retry)
    }
}

impl DialogError {
    /// Classifies the error for the reply and session handling.
    #[must_use]
    pub const fn failure(&self) -> Failure {
        match self {
            Self::Lifecycle(LifecycleError::Forbidden(_)) => Failure::Forbidden,
            Self::Lifecycle(
                LifecycleError::NotFound(_)
                | LifecycleError::Store(StoreError::NotFound(_) | StoreError::Conflict(_)),
            ) => Failure::NotFound,
            Self::Lifecycle(LifecycleError::NoActiveSprint(_)) => Failure::NoActiveSprint,
            Self::Lifecycle(LifecycleError::Domain(_))
            | Self::Session(SessionError::Decode { .. })
            | Self::MissingScratch(_) => Failure::Invalid,
            Self::Lifecycle(LifecycleError::Store(_))
            | Self::Session(_)
            | Self::Render { .. } => Failure::Retry,
        }
    }
}

/// Result type for dialog steps.
pub type DialogResult<T> = Result<T, DialogError>;
