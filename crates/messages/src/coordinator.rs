//! COORDINATOR victory announcement.

use crate::{MessageTag, WireMessage};
use serde::{Deserialize, Serialize};
use stampede_types::ProcessId;

/// Announcement from the election winner to every other live process.
///
/// This is the only message that terminates a participant: on receipt
/// the leader id is recorded and the node is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordinatorAnnouncement {
    /// The newly elected leader.
    pub leader: ProcessId,
}

impl CoordinatorAnnouncement {
    /// Create a new victory announcement.
    pub fn new(leader: ProcessId) -> Self {
        Self { leader }
    }
}

impl WireMessage for CoordinatorAnnouncement {
    fn tag() -> MessageTag {
        MessageTag::Coordinator
    }
}
