//! Stateless authorization guard.

use super::{Action, Role};
use thiserror::Error;

/// Returned when a role may not perform an action.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("role {role} may not {action}")]
pub struct AccessDenied {
    /// Role of the requester at evaluation time.
    pub role: Role,
    /// The action that was refused.
    pub action: Action,
}

/// Returns `true` when `role` may perform `action`.
#[must_use]
pub fn is_allowed(role: Role, action: Action) -> bool {
    action.allowed_roles().contains(&role)
}

/// Checks `role` against the action table.
///
/// # Errors
///
/// Returns [`AccessDenied`] when the role is not listed for the action.
pub fn authorize(role: Role, action: Action) -> Result<(), AccessDenied> {
    if is_allowed(role, action) {
        Ok(())
    } else {
        tracing::debug!(%role, %action, "access denied");
        Err(AccessDenied { role, action })
    }
}
