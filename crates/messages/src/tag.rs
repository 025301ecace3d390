//! Message routing tags.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Routing tag attached to every message.
///
/// The numeric values are the wire contract and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum MessageTag {
    /// "Is anyone with a higher id alive?"
    Election = 1,

    /// "Yes, stand down; I outrank you."
    Ok = 2,

    /// "Election is over; this id is the new leader."
    Coordinator = 3,
}

impl MessageTag {
    /// Decode a tag from its wire value.
    pub fn from_wire(value: u8) -> Option<Self> {
        match value {
            1 => Some(MessageTag::Election),
            2 => Some(MessageTag::Ok),
            3 => Some(MessageTag::Coordinator),
            _ => None,
        }
    }

    /// Encode this tag to its wire value.
    pub fn to_wire(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for MessageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MessageTag::Election => "ELECTION",
            MessageTag::Ok => "OK",
            MessageTag::Coordinator => "COORDINATOR",
        };
        f.write_str(name)
    }
}
