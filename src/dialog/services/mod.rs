//! Workflow engine: routes events to dialog steps and keeps sessions.

mod engine;
mod error;
mod flows;
mod keys;
mod render;
mod step;
mod texts;

pub use engine::{DEFAULT_RECENT_LIMIT, DialogEngine};
pub use error::{DialogError, DialogResult, Failure};
