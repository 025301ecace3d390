//! Inbound events for the node state machine.

use stampede_types::ProcessId;

/// Events a node processes.
///
/// Network messages arrive as the first three variants; the runner
/// decodes an envelope by tag and hands the engine the corresponding
/// event. `ElectionRequested` is the internal cascade trigger: handling
/// an election probe enqueues it instead of recursing into a fresh
/// campaign from inside the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A lower-ranked process sent an ELECTION probe.
    ElectionReceived {
        /// The challenger.
        from: ProcessId,
    },

    /// A superior answered one of our probes with OK.
    OkReceived {
        /// The outranking responder.
        responder: ProcessId,
    },

    /// The election winner announced itself.
    CoordinatorReceived {
        /// The new leader.
        leader: ProcessId,
    },

    /// Start (or restart) a campaign against our live superiors.
    ///
    /// Seeded once at the initiator, and re-emitted internally every
    /// time this node silences a lower challenger.
    ElectionRequested,
}

impl Event {
    /// Get a human-readable name for this event type.
    pub fn type_name(&self) -> &'static str {
        match self {
            Event::ElectionReceived { .. } => "ElectionReceived",
            Event::OkReceived { .. } => "OkReceived",
            Event::CoordinatorReceived { .. } => "CoordinatorReceived",
            Event::ElectionRequested => "ElectionRequested",
        }
    }
}
