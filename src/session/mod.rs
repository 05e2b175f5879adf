//! Per-user conversation scratch state.
//!
//! Each chat user owns one [`SessionData`] map of typed keys. The
//! [`SessionRegistry`] hands out exclusive guards so that two events from
//! the same user are never processed at once, while different users proceed
//! in parallel. Sessions live in memory only; a restart abandons in-flight
//! dialogs.

mod data;
mod registry;

pub use data::{SessionData, SessionError, SessionKey};
pub use registry::{SessionGuard, SessionRegistry};
