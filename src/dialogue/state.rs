//! Conversation state identifiers
//!
//! The directed graph is
//! `greeting → dine_type → menu_item ⇄ {temp, size, options} → confirm →
//! payment → {card, coupon} → done`, with `menu_item` doubling as the
//! "order more or pay" hub after each committed item.

use serde::{Deserialize, Serialize};

/// Current position in the conversation graph
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    #[default]
    Greeting,
    DineType,
    MenuItem,
    Temp,
    Size,
    Options,
    Confirm,
    Payment,
    Card,
    Coupon,
    Done,
}

impl Step {
    /// Terminal state check
    #[must_use]
    pub const fn is_done(self) -> bool {
        matches!(self, Self::Done)
    }
}
