//! Actions emitted by state machines for the runner to execute.

use crate::{Event, OutboundMessage};
use stampede_types::ProcessId;

/// Side effects requested by a state machine.
///
/// State machines never perform I/O directly; they return actions and
/// the runner executes them in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Send a message to a single live process.
    Send {
        /// Destination process. Must be live: the engine filters the
        /// roster before emitting this action.
        to: ProcessId,
        /// The message to deliver.
        message: OutboundMessage,
    },

    /// Feed an event back into this node's own queue.
    ///
    /// Internal events are processed before any further network
    /// delivery to this node.
    EnqueueInternal {
        /// The event to re-process locally.
        event: Event,
    },
}
