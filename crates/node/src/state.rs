//! Per-process state machine: event routing.
//!
//! The runner owns the single inbound stream for a process and hands
//! every event here; this is the dispatch point the baseline design
//! expressed as a blocking receive loop. Routing by event (decoded from
//! the message tag) replaces the competing wildcard receives: there is
//! exactly one consumer, so a stray OK can only ever reach the engine's
//! own discard path.

use stampede_core::{Action, Event, StateMachine};
use stampede_election::ElectionState;
use stampede_types::{Phase, ProcessId, Roster};
use tracing::trace;

/// The complete state machine for one participant.
#[derive(Debug)]
pub struct NodeStateMachine {
    election: ElectionState,
}

impl NodeStateMachine {
    /// Create the state machine for process `id` over the given roster.
    pub fn new(id: ProcessId, roster: Roster) -> Self {
        Self {
            election: ElectionState::new(id, roster),
        }
    }

    /// Our own rank.
    pub fn id(&self) -> ProcessId {
        self.election.id()
    }

    /// Current election phase.
    pub fn phase(&self) -> Phase {
        self.election.phase()
    }

    /// Whether this participant has terminated.
    ///
    /// True once a coordinator announcement was recorded, or once this
    /// node won and finished announcing. The runner stops delivering to
    /// a done node.
    pub fn is_done(&self) -> bool {
        self.election.is_done()
    }

    /// The recorded leader, once known.
    pub fn leader(&self) -> Option<ProcessId> {
        self.election.leader()
    }

    /// Whether this participant won the election.
    pub fn is_leader(&self) -> bool {
        self.election.is_leader()
    }

    /// The membership roster this node runs over.
    pub fn roster(&self) -> &Roster {
        self.election.roster()
    }
}

impl StateMachine for NodeStateMachine {
    fn handle(&mut self, event: Event) -> Vec<Action> {
        trace!(id = %self.id(), event = event.type_name(), "dispatching event");

        match event {
            Event::ElectionRequested => self.election.on_election_requested(),
            Event::ElectionReceived { from } => self.election.on_election(from),
            Event::OkReceived { responder } => self.election.on_ok(responder),
            Event::CoordinatorReceived { leader } => self.election.on_coordinator(leader),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stampede_types::LivenessSet;
    use tracing_test::traced_test;

    fn node(count: u32, downed: &[u32], id: u32) -> NodeStateMachine {
        let roster = Roster::new(
            count,
            LivenessSet::with_downed(downed.iter().copied().map(ProcessId)),
        );
        NodeStateMachine::new(ProcessId(id), roster)
    }

    #[traced_test]
    #[test]
    fn test_routes_challenge_to_engine() {
        let mut n = node(4, &[2], 1);
        let actions = n.handle(Event::ElectionReceived {
            from: ProcessId(0),
        });

        // Ok reply plus the internal cascade event.
        assert_eq!(actions.len(), 2);
        assert!(actions.contains(&Action::EnqueueInternal {
            event: Event::ElectionRequested
        }));
    }

    #[traced_test]
    #[test]
    fn test_coordinator_event_terminates_node() {
        let mut n = node(4, &[2], 0);
        assert!(!n.is_done());

        n.handle(Event::CoordinatorReceived {
            leader: ProcessId(3),
        });

        assert!(n.is_done());
        assert!(!n.is_leader());
        assert_eq!(n.leader(), Some(ProcessId(3)));
    }

    #[traced_test]
    #[test]
    fn test_top_rank_wins_on_request() {
        let mut n = node(4, &[2], 3);
        let actions = n.handle(Event::ElectionRequested);

        // Announces to 0 and 1, skipping the downed 2.
        assert_eq!(actions.len(), 2);
        assert!(n.is_leader());
    }
}
