//! Outcome of handling one input.

use crate::dialog::domain::{DialogPosition, Reply};

/// What the engine does with the session after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Next {
    /// Keep the current position and scratch values.
    Stay,
    /// Move to another position, keeping scratch values.
    Goto(DialogPosition),
    /// End the dialog and clear the session.
    Finish,
}

/// Replies produced by a step and the resulting transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Step {
    pub(crate) replies: Vec<Reply>,
    pub(crate) next: Next,
}

impl Step {
    pub(crate) fn stay(reply: Reply) -> Self {
        Self {
            replies: vec![reply],
            next: Next::Stay,
        }
    }

    pub(crate) fn goto(position: DialogPosition, reply: Reply) -> Self {
        Self {
            replies: vec![reply],
            next: Next::Goto(position),
        }
    }

    pub(crate) fn finish(reply: Reply) -> Self {
        Self::finish_all(vec![reply])
    }

    pub(crate) const fn finish_all(replies: Vec<Reply>) -> Self {
        Self {
            replies,
            next: Next::Finish,
        }
    }
}
