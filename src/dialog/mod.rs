//! Conversational workflow engine.
//!
//! Each dialog is a finite state machine whose current
//! [`domain::DialogPosition`] lives in the user's session. The engine
//! receives one [`domain::Inbound`] event at a time per user, re-checks the
//! caller's role, runs the step against the tracker and answers with
//! transport-neutral [`domain::Reply`] values.
//!
//! - Vocabulary in [`domain`]
//! - Routing and step handlers in [`services`]

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
