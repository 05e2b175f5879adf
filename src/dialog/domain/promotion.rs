//! Inline-button payloads of the promotion exchange.

use crate::tracker::domain::UserId;

const PREFIX: &str = "promote:";
const CONFIRM: &str = "confirm";
const CANCEL: &str = "cancel";

/// A decoded promotion button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromotionButton {
    /// Promote the given user one step.
    Candidate(UserId),
    /// Confirm the pending CEO handover.
    Confirm,
    /// Abandon the pending CEO handover.
    Cancel,
}

impl PromotionButton {
    /// Encodes the button as payload data.
    #[must_use]
    pub fn data(self) -> String {
        match self {
            Self::Candidate(user) => format!("{PREFIX}{user}"),
            Self::Confirm => format!("{PREFIX}{CONFIRM}"),
            Self::Cancel => format!("{PREFIX}{CANCEL}"),
        }
    }

    /// Decodes payload data, returning `None` for foreign or malformed data.
    #[must_use]
    pub fn parse(data: &str) -> Option<Self> {
        match data.strip_prefix(PREFIX)? {
            CONFIRM => Some(Self::Confirm),
            CANCEL => Some(Self::Cancel),
            id => id.parse().ok().map(|raw| Self::Candidate(UserId::new(raw))),
        }
    }
}
