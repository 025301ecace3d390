//! Wire messages for the election protocol.
//!
//! Three message kinds, each carrying a small payload plus an implicit
//! sender. The tag identifies the semantic kind so a receiver can route
//! a message without inspecting the payload.

mod coordinator;
mod election;
mod ok;
mod tag;

pub use coordinator::CoordinatorAnnouncement;
pub use election::ElectionCall;
pub use ok::OkReply;
pub use tag::MessageTag;

/// A message that travels over the transport.
pub trait WireMessage {
    /// The routing tag for this message kind.
    fn tag() -> MessageTag;
}
