//! Election engine component.
//!
//! Implements the Bully rule: a process that suspects the coordinator
//! failed probes every live process outranking it. Whoever finds no
//! live superior wins and announces itself; everyone else stands down
//! when told to and waits for the announcement.
//!
//! # Cascading as events
//!
//! Handling an ELECTION probe never starts a nested campaign inline.
//! The handler replies OK and emits `Action::EnqueueInternal` with
//! `Event::ElectionRequested`, so deep cascades cost queue entries, not
//! stack frames, and the handler stays non-blocking.

use indexmap::IndexSet;
use stampede_core::{Action, Event, OutboundMessage};
use stampede_messages::{CoordinatorAnnouncement, ElectionCall, OkReply};
use stampede_types::{Phase, ProcessId, Roster};
use tracing::{debug, info, warn};

/// Election state for a single participant.
///
/// Exclusively owned by its node; never shared across processes. The
/// roster is the only liveness knowledge the engine has, and every
/// enumeration of destinations goes through it, so a message addressed
/// to a downed process cannot be produced.
#[derive(Debug)]
pub struct ElectionState {
    /// Our own rank.
    id: ProcessId,

    /// Static membership and liveness knowledge.
    roster: Roster,

    /// Current protocol phase.
    phase: Phase,

    /// The leader we have recorded, once announced.
    leader: Option<ProcessId>,

    /// Superiors probed in the campaign currently in flight, in probe
    /// order. Cleared on concession so a later challenge starts a
    /// fresh probe round.
    outstanding: IndexSet<ProcessId>,
}

impl ElectionState {
    /// Create an engine for process `id` over the given roster.
    pub fn new(id: ProcessId, roster: Roster) -> Self {
        Self {
            id,
            roster,
            phase: Phase::Idle,
            leader: None,
            outstanding: IndexSet::new(),
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Accessors
    // ═══════════════════════════════════════════════════════════════════════

    /// Our own rank.
    pub fn id(&self) -> ProcessId {
        self.id
    }

    /// Current protocol phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The recorded leader, if the election has concluded for us.
    pub fn leader(&self) -> Option<ProcessId> {
        self.leader
    }

    /// Whether this participant has terminated.
    pub fn is_done(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Whether this participant won the election.
    pub fn is_leader(&self) -> bool {
        self.is_done() && self.leader == Some(self.id)
    }

    /// The membership roster this engine runs over.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Event handlers
    // ═══════════════════════════════════════════════════════════════════════

    /// Start (or restart) a campaign against our live superiors.
    ///
    /// Idempotent after termination, and a no-op while probes from the
    /// current campaign are still outstanding: silencing several lower
    /// challengers in a row must not multiply identical probes.
    pub fn on_election_requested(&mut self) -> Vec<Action> {
        if self.phase.is_terminal() {
            debug!(id = %self.id, "election requested after termination, ignoring");
            return vec![];
        }

        self.phase = Phase::Electing;

        let fresh: Vec<ProcessId> = self
            .roster
            .live_superiors_of(self.id)
            .filter(|p| !self.outstanding.contains(p))
            .collect();

        if fresh.is_empty() && self.outstanding.is_empty() {
            return self.claim_victory();
        }

        if fresh.is_empty() {
            debug!(
                id = %self.id,
                outstanding = self.outstanding.len(),
                "campaign already in flight, not re-probing"
            );
            self.phase = Phase::AwaitingOk;
            return vec![];
        }

        let mut actions = Vec::with_capacity(fresh.len());
        for superior in fresh {
            debug!(id = %self.id, to = %superior, "probing superior");
            self.outstanding.insert(superior);
            actions.push(Action::Send {
                to: superior,
                message: OutboundMessage::Election(ElectionCall::new(self.id)),
            });
        }

        self.phase = Phase::AwaitingOk;
        actions
    }

    /// A lower-ranked challenger probed us: silence it, then campaign
    /// upward ourselves via an internal event.
    pub fn on_election(&mut self, from: ProcessId) -> Vec<Action> {
        // Probes only travel upward.
        if from >= self.id {
            warn!(id = %self.id, from = %from, "election probe from non-inferior, dropping");
            return vec![];
        }

        if !self.roster.is_live(from) {
            warn!(id = %self.id, from = %from, "election probe from downed process, dropping");
            return vec![];
        }

        if self.phase.is_terminal() {
            debug!(id = %self.id, from = %from, "late election probe after termination, ignoring");
            return vec![];
        }

        debug!(id = %self.id, from = %from, "silencing lower challenger");

        vec![
            Action::Send {
                to: from,
                message: OutboundMessage::Ok(OkReply::new(self.id)),
            },
            Action::EnqueueInternal {
                event: Event::ElectionRequested,
            },
        ]
    }

    /// A superior answered one of our probes.
    ///
    /// Outside `AwaitingOk` this is a stray reply arriving after we
    /// already stood down; it is discarded without error.
    pub fn on_ok(&mut self, responder: ProcessId) -> Vec<Action> {
        if !responder.outranks(self.id) {
            warn!(id = %self.id, responder = %responder, "OK from non-superior, dropping");
            return vec![];
        }

        if self.phase != Phase::AwaitingOk {
            debug!(
                id = %self.id,
                responder = %responder,
                phase = %self.phase,
                "stray OK, discarding"
            );
            return vec![];
        }

        info!(id = %self.id, responder = %responder, "outranked, standing down");
        self.outstanding.clear();
        self.phase = Phase::Idle;
        vec![]
    }

    /// The winner announced itself: record it and terminate.
    ///
    /// Once terminal, duplicates are discarded without state change.
    pub fn on_coordinator(&mut self, leader: ProcessId) -> Vec<Action> {
        if !self.roster.is_live(leader) {
            warn!(id = %self.id, leader = %leader, "coordinator announcement for non-live id, dropping");
            return vec![];
        }

        if self.phase.is_terminal() {
            match self.leader {
                Some(recorded) if recorded != leader => warn!(
                    id = %self.id,
                    recorded = %recorded,
                    announced = %leader,
                    "conflicting coordinator announcement after termination"
                ),
                _ => debug!(id = %self.id, leader = %leader, "duplicate coordinator announcement"),
            }
            return vec![];
        }

        info!(id = %self.id, leader = %leader, "recognizing new coordinator");
        self.leader = Some(leader);
        self.outstanding.clear();
        self.phase = Phase::Done;
        vec![]
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Victory path
    // ═══════════════════════════════════════════════════════════════════════

    /// No live superior exists: we win, announce to every live peer,
    /// and terminate.
    fn claim_victory(&mut self) -> Vec<Action> {
        self.phase = Phase::Leader;
        self.leader = Some(self.id);

        info!(id = %self.id, "no live superior, claiming coordinator role");

        let actions: Vec<Action> = self
            .roster
            .live_peers_of(self.id)
            .map(|peer| Action::Send {
                to: peer,
                message: OutboundMessage::Coordinator(CoordinatorAnnouncement::new(self.id)),
            })
            .collect();

        self.phase = Phase::Done;
        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stampede_types::LivenessSet;
    use tracing_test::traced_test;

    fn engine(count: u32, downed: &[u32], id: u32) -> ElectionState {
        let roster = Roster::new(
            count,
            LivenessSet::with_downed(downed.iter().copied().map(ProcessId)),
        );
        ElectionState::new(ProcessId(id), roster)
    }

    fn sent_to(actions: &[Action]) -> Vec<(u32, &'static str)> {
        actions
            .iter()
            .filter_map(|a| match a {
                Action::Send { to, message } => Some((to.0, message.type_name())),
                _ => None,
            })
            .collect()
    }

    #[traced_test]
    #[test]
    fn test_probes_all_live_superiors() {
        let mut state = engine(5, &[4], 0);
        let actions = state.on_election_requested();

        assert_eq!(
            sent_to(&actions),
            vec![(1, "Election"), (2, "Election"), (3, "Election")]
        );
        assert_eq!(state.phase(), Phase::AwaitingOk);
    }

    #[traced_test]
    #[test]
    fn test_probe_skips_dead_superior() {
        let mut state = engine(4, &[2], 0);
        let actions = state.on_election_requested();

        assert_eq!(sent_to(&actions), vec![(1, "Election"), (3, "Election")]);
    }

    #[traced_test]
    #[test]
    fn test_zero_probe_shortcut() {
        // Highest live id claims victory with no probes at all.
        let mut state = engine(5, &[4], 3);
        let actions = state.on_election_requested();

        assert_eq!(
            sent_to(&actions),
            vec![(0, "Coordinator"), (1, "Coordinator"), (2, "Coordinator")]
        );
        assert!(state.is_leader());
        assert_eq!(state.leader(), Some(ProcessId(3)));
        assert_eq!(state.phase(), Phase::Done);
    }

    #[traced_test]
    #[test]
    fn test_challenge_replies_ok_and_cascades() {
        let mut state = engine(5, &[4], 2);
        let actions = state.on_election(ProcessId(0));

        assert_eq!(sent_to(&actions), vec![(0, "Ok")]);
        assert!(actions.contains(&Action::EnqueueInternal {
            event: Event::ElectionRequested
        }));
    }

    #[traced_test]
    #[test]
    fn test_challenge_from_non_inferior_dropped() {
        let mut state = engine(5, &[4], 2);
        assert!(state.on_election(ProcessId(3)).is_empty());
        assert!(state.on_election(ProcessId(2)).is_empty());
    }

    #[traced_test]
    #[test]
    fn test_concede_returns_to_idle() {
        let mut state = engine(5, &[4], 0);
        state.on_election_requested();
        assert_eq!(state.phase(), Phase::AwaitingOk);

        let actions = state.on_ok(ProcessId(3));
        assert!(actions.is_empty());
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.leader(), None);
    }

    #[traced_test]
    #[test]
    fn test_stray_ok_is_noop() {
        let mut state = engine(5, &[4], 0);
        assert_eq!(state.phase(), Phase::Idle);

        let actions = state.on_ok(ProcessId(2));
        assert!(actions.is_empty());
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[traced_test]
    #[test]
    fn test_second_ok_after_concession_is_stray() {
        let mut state = engine(5, &[4], 0);
        state.on_election_requested();
        state.on_ok(ProcessId(1));
        assert_eq!(state.phase(), Phase::Idle);

        // The other probed superiors answer too; nothing changes.
        state.on_ok(ProcessId(2));
        state.on_ok(ProcessId(3));
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[traced_test]
    #[test]
    fn test_coordinator_terminates_from_any_phase() {
        let mut state = engine(5, &[4], 0);
        state.on_election_requested();
        assert_eq!(state.phase(), Phase::AwaitingOk);

        state.on_coordinator(ProcessId(3));
        assert!(state.is_done());
        assert!(!state.is_leader());
        assert_eq!(state.leader(), Some(ProcessId(3)));
    }

    #[traced_test]
    #[test]
    fn test_idempotent_after_termination() {
        let mut state = engine(5, &[4], 0);
        state.on_coordinator(ProcessId(3));

        assert!(state.on_coordinator(ProcessId(3)).is_empty());
        assert!(state.on_ok(ProcessId(2)).is_empty());
        assert!(state.on_election_requested().is_empty());

        assert_eq!(state.leader(), Some(ProcessId(3)));
        assert_eq!(state.phase(), Phase::Done);
    }

    #[traced_test]
    #[test]
    fn test_repeat_challenge_does_not_duplicate_probes() {
        let mut state = engine(5, &[4], 1);

        // Challenged by 0: reply, then campaign.
        state.on_election(ProcessId(0));
        let first = state.on_election_requested();
        assert_eq!(sent_to(&first), vec![(2, "Election"), (3, "Election")]);

        // Challenged again before any superior answers: no new probes.
        let again = state.on_election_requested();
        assert!(sent_to(&again).is_empty());
        assert_eq!(state.phase(), Phase::AwaitingOk);
    }

    #[traced_test]
    #[test]
    fn test_fresh_probe_round_after_concession() {
        let mut state = engine(5, &[4], 1);
        state.on_election_requested();
        state.on_ok(ProcessId(3));
        assert_eq!(state.phase(), Phase::Idle);

        // A later challenge starts a full new probe round.
        let actions = state.on_election_requested();
        assert_eq!(sent_to(&actions), vec![(2, "Election"), (3, "Election")]);
    }

    #[traced_test]
    #[test]
    fn test_coordinator_for_downed_id_dropped() {
        let mut state = engine(5, &[4], 0);
        state.on_coordinator(ProcessId(4));
        assert!(!state.is_done());
        assert_eq!(state.leader(), None);
    }
}
