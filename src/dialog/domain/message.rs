//! Transport-neutral inbound events and outbound replies.

use super::CANCEL;
use crate::tracker::domain::ExternalUserId;
use serde::{Deserialize, Serialize};

/// What the user sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Payload {
    /// Typed text or a reply-keyboard label.
    Text(String),
    /// Data attached to a pressed inline button.
    Button(String),
}

/// One event received from the chat transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inbound {
    /// Sender identity on the transport.
    pub user: ExternalUserId,
    /// Sender display name, used on registration.
    pub display_name: String,
    /// Message content.
    pub payload: Payload,
}

impl Inbound {
    /// Builds a text event.
    #[must_use]
    pub fn text(user: ExternalUserId, display_name: &str, text: impl Into<String>) -> Self {
        Self {
            user,
            display_name: display_name.to_owned(),
            payload: Payload::Text(text.into()),
        }
    }

    /// Builds a button event.
    #[must_use]
    pub fn button(user: ExternalUserId, display_name: &str, data: impl Into<String>) -> Self {
        Self {
            user,
            display_name: display_name.to_owned(),
            payload: Payload::Button(data.into()),
        }
    }
}

/// An inline button and the data it sends back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    /// Visible caption.
    pub label: String,
    /// Payload delivered as [`Payload::Button`] when pressed.
    pub data: String,
}

impl Button {
    /// Creates a button.
    #[must_use]
    pub fn new(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            data: data.into(),
        }
    }
}

/// Choice set attached to a reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "rows", rename_all = "snake_case")]
pub enum Keyboard {
    /// Rows of labels sent back verbatim as text.
    Menu(Vec<Vec<String>>),
    /// Rows of buttons carrying payloads.
    Inline(Vec<Vec<Button>>),
}

impl Keyboard {
    /// One label per row followed by a cancel row.
    #[must_use]
    pub fn choices<I>(labels: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut rows: Vec<Vec<String>> = labels.into_iter().map(|label| vec![label]).collect();
        rows.push(vec![CANCEL.to_owned()]);
        Self::Menu(rows)
    }

    /// A keyboard holding only the cancel label.
    #[must_use]
    pub fn cancel_only() -> Self {
        Self::Menu(vec![vec![CANCEL.to_owned()]])
    }

    /// Returns every label or button caption, row by row.
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        match self {
            Self::Menu(rows) => rows.iter().flatten().map(String::as_str).collect(),
            Self::Inline(rows) => rows
                .iter()
                .flatten()
                .map(|button| button.label.as_str())
                .collect(),
        }
    }
}

/// One outbound message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    /// Plain message text.
    pub text: String,
    /// Optional choices rendered by the transport.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyboard: Option<Keyboard>,
}

impl Reply {
    /// A reply without choices.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
        }
    }

    /// A reply with choices.
    #[must_use]
    pub fn with_keyboard(text: impl Into<String>, keyboard: Keyboard) -> Self {
        Self {
            text: text.into(),
            keyboard: Some(keyboard),
        }
    }
}
