//! The role-filtered home menu.

use super::{Keyboard, Trigger};
use crate::access::{Role, is_allowed};

const ROW_WIDTH: usize = 2;

/// Triggers available to `role`, in menu order.
#[must_use]
pub fn home_triggers(role: Role) -> Vec<Trigger> {
    Trigger::ALL
        .into_iter()
        .filter(|trigger| is_allowed(role, trigger.action()))
        .collect()
}

/// Builds the home keyboard for `role`, two entries per row.
#[must_use]
pub fn home_menu(role: Role) -> Keyboard {
    let labels: Vec<String> = home_triggers(role)
        .into_iter()
        .map(|trigger| trigger.label().to_owned())
        .collect();
    Keyboard::Menu(labels.chunks(ROW_WIDTH).map(<[String]>::to_vec).collect())
}
