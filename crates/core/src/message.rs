//! Outbound message types for network communication.

use stampede_messages::{CoordinatorAnnouncement, ElectionCall, MessageTag, OkReply, WireMessage};

/// Outbound network messages.
///
/// These are the messages a node can send to other nodes. The runner
/// handles the actual network I/O.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutboundMessage {
    /// Probe to a live superior.
    Election(ElectionCall),

    /// Stand-down reply to a lower challenger.
    Ok(OkReply),

    /// Victory announcement to a live peer.
    Coordinator(CoordinatorAnnouncement),
}

impl OutboundMessage {
    /// Get a human-readable name for this message type.
    pub fn type_name(&self) -> &'static str {
        match self {
            OutboundMessage::Election(_) => "Election",
            OutboundMessage::Ok(_) => "Ok",
            OutboundMessage::Coordinator(_) => "Coordinator",
        }
    }

    /// The routing tag this message travels under.
    pub fn tag(&self) -> MessageTag {
        match self {
            OutboundMessage::Election(_) => ElectionCall::tag(),
            OutboundMessage::Ok(_) => OkReply::tag(),
            OutboundMessage::Coordinator(_) => CoordinatorAnnouncement::tag(),
        }
    }

    /// Convert into the event the receiving node processes.
    pub fn into_event(self) -> crate::Event {
        match self {
            OutboundMessage::Election(call) => crate::Event::ElectionReceived { from: call.from },
            OutboundMessage::Ok(reply) => crate::Event::OkReceived {
                responder: reply.responder,
            },
            OutboundMessage::Coordinator(ann) => crate::Event::CoordinatorReceived {
                leader: ann.leader,
            },
        }
    }
}
