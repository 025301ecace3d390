//! OK stand-down message.

use crate::{MessageTag, WireMessage};
use serde::{Deserialize, Serialize};
use stampede_types::ProcessId;

/// Reply from a superior telling a challenger to stand down.
///
/// Receipt outside an active wait is defined as a no-op: replies can
/// arrive after the waiter has already conceded to a different
/// superior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OkReply {
    /// The outranking process that answered.
    pub responder: ProcessId,
}

impl OkReply {
    /// Create a new stand-down reply.
    pub fn new(responder: ProcessId) -> Self {
        Self { responder }
    }
}

impl WireMessage for OkReply {
    fn tag() -> MessageTag {
        MessageTag::Ok
    }
}
