//! Private messages exchanged between characters.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An outgoing message attached to a submitted action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    #[serde(alias = "to")]
    pub to_character: String,
    pub content: String,
}

impl OutgoingMessage {
    pub fn new(to_character: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            to_character: to_character.into(),
            content: content.into(),
        }
    }
}

/// A delivered message, immutable once it lands in an inbox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub from_character: String,
    pub to_character: String,
    pub content: String,
    /// Simulated date of delivery
    pub timestamp: NaiveDate,
    pub round_number: u32,
}
