//! Vocabulary of the conversational interface: triggers, positions,
//! inbound events and replies.

mod menu;
mod message;
mod position;
mod promotion;
mod trigger;

pub use menu::{home_menu, home_triggers};
pub use message::{Button, Inbound, Keyboard, Payload, Reply};
pub use position::DialogPosition;
pub use promotion::PromotionButton;
pub use trigger::{APPROVE, CANCEL, CHANGE_PROJECT, Command, DONE, REJECT, Trigger, is_done};
