//! ELECTION probe message.

use crate::{MessageTag, WireMessage};
use serde::{Deserialize, Serialize};
use stampede_types::ProcessId;

/// Probe from a lower-ranked process challenging its superiors.
///
/// Sent to every live process outranking the challenger. Any receiver
/// silences the challenger with an [`crate::OkReply`] and starts its
/// own campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionCall {
    /// The challenging process.
    pub from: ProcessId,
}

impl ElectionCall {
    /// Create a new election probe.
    pub fn new(from: ProcessId) -> Self {
        Self { from }
    }
}

impl WireMessage for ElectionCall {
    fn tag() -> MessageTag {
        MessageTag::Election
    }
}
