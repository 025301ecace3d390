//! Core abstractions for the election architecture.
//!
//! All protocol logic lives in synchronous state machines that consume
//! [`Event`]s and return [`Action`]s. The runner (deterministic
//! simulation or live tokio cluster) performs every piece of actual
//! I/O on the state machine's behalf.

mod action;
mod error;
mod event;
mod message;
mod traits;

pub use action::Action;
pub use error::ProtocolViolation;
pub use event::Event;
pub use message::OutboundMessage;
pub use traits::StateMachine;
