//! Role-based authorization for every tracker operation.
//!
//! The guard is a pure lookup from a requester's [`Role`] and a named
//! [`Action`] to an allow/deny decision. Nothing is cached: callers evaluate
//! the guard on every dialog step because a role can change mid-conversation
//! (for example after a CEO promotion).

mod action;
mod guard;
mod role;

pub use action::Action;
pub use guard::{AccessDenied, authorize, is_allowed};
pub use role::{ParseRoleError, Role};

#[cfg(test)]
mod tests;
