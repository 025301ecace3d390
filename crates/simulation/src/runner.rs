//! Deterministic election runner.

use crate::{EventKey, EventPriority, NetworkConfig, SimulatedNetwork};
use stampede_core::{Action, Event, ProtocolViolation, StateMachine};
use stampede_messages::MessageTag;
use stampede_node::NodeStateMachine;
use stampede_types::{ConfigError, ProcessId, Roster, Scenario};
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Errors from a simulated election run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    /// Scenario rejected before any process was started.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A state machine emitted a misaddressed send.
    #[error(transparent)]
    Protocol(#[from] ProtocolViolation),

    /// The network went quiet before this node learned the leader.
    #[error("{node} never observed a coordinator announcement")]
    Stalled { node: ProcessId },

    /// More than one process claimed victory.
    #[error("both {first} and {second} claimed the coordinator role")]
    MultipleLeaders { first: ProcessId, second: ProcessId },

    /// A process recorded a different leader than the winner.
    #[error("{node} recorded leader {recorded}, but {elected} won")]
    Disagreement {
        node: ProcessId,
        recorded: ProcessId,
        elected: ProcessId,
    },
}

/// Message and event counters for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulationStats {
    /// Events handled across all nodes.
    pub events_processed: u64,

    /// ELECTION probes sent.
    pub elections_sent: u64,

    /// OK stand-down replies sent.
    pub oks_sent: u64,

    /// COORDINATOR announcements sent.
    pub coordinators_sent: u64,
}

/// Result of a completed run: the agreed leader plus run statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElectionOutcome {
    /// The unique elected coordinator.
    pub leader: ProcessId,

    /// Virtual time at quiescence.
    pub elapsed: Duration,

    /// Message and event counters.
    pub stats: SimulationStats,
}

/// Deterministic runner: drives every node's state machine from a
/// single time-ordered event queue until the protocol terminates.
///
/// The runner plays the role of the transport. `Send` actions become
/// delivery events at jittered future instants; internal events are
/// re-queued at the current instant ahead of network traffic. The
/// process designated dead is represented by an empty slot and never
/// handles an event.
#[derive(Debug)]
pub struct SimulationRunner {
    roster: Roster,
    nodes: Vec<Option<NodeStateMachine>>,
    network: SimulatedNetwork,
    queue: BTreeMap<EventKey, Event>,
    now: Duration,
    seq: u64,
    stats: SimulationStats,
}

impl SimulationRunner {
    /// Set up a run: validate the scenario, build the live nodes, and
    /// seed the initiator's first campaign.
    ///
    /// Validation happens here, before any node exists or any event is
    /// queued: a bad scenario aborts the whole run with no election
    /// having occurred.
    pub fn new(
        count: u32,
        dead: ProcessId,
        initiator: ProcessId,
        config: NetworkConfig,
        seed: u64,
    ) -> Result<Self, SimulationError> {
        let scenario = Scenario::new(count, dead, initiator)?;
        let roster = scenario.roster(count);

        let nodes = (0..count)
            .map(ProcessId)
            .map(|id| {
                if id == scenario.dead {
                    debug!(%id, "process designated dead, exits at startup");
                    None
                } else {
                    Some(NodeStateMachine::new(id, roster.clone()))
                }
            })
            .collect();

        let mut runner = Self {
            roster,
            nodes,
            network: SimulatedNetwork::new(config, seed),
            queue: BTreeMap::new(),
            now: Duration::ZERO,
            seq: 0,
            stats: SimulationStats::default(),
        };

        info!(%initiator, %dead, count, "scenario distributed, seeding election");
        runner.schedule(
            scenario.initiator,
            Event::ElectionRequested,
            Duration::ZERO,
            EventPriority::Internal,
        );

        Ok(runner)
    }

    fn schedule(&mut self, node: ProcessId, event: Event, at: Duration, priority: EventPriority) {
        let key = EventKey {
            at,
            priority,
            node: node.0,
            seq: self.seq,
        };
        self.seq += 1;
        self.queue.insert(key, event);
    }

    /// Execute one node's actions, scheduling the events they imply.
    fn execute(&mut self, from: ProcessId, actions: Vec<Action>) -> Result<(), SimulationError> {
        for action in actions {
            match action {
                Action::Send { to, message } => {
                    if !self.roster.contains(to) {
                        return Err(ProtocolViolation::SendToUnknown(to).into());
                    }
                    if !self.roster.is_live(to) {
                        return Err(ProtocolViolation::SendToDowned(to).into());
                    }

                    match message.tag() {
                        MessageTag::Election => self.stats.elections_sent += 1,
                        MessageTag::Ok => self.stats.oks_sent += 1,
                        MessageTag::Coordinator => self.stats.coordinators_sent += 1,
                    }

                    let at = self.network.delivery_time(self.now, from, to);
                    debug!(%from, %to, kind = message.type_name(), ?at, "scheduling delivery");
                    self.schedule(to, message.into_event(), at, EventPriority::Network);
                }
                Action::EnqueueInternal { event } => {
                    self.schedule(from, event, self.now, EventPriority::Internal);
                }
            }
        }
        Ok(())
    }

    /// Run until the queue drains, then check the protocol's outcome:
    /// every live node terminated, exactly one claimed victory, and all
    /// recorded the same leader.
    pub fn run(&mut self) -> Result<ElectionOutcome, SimulationError> {
        while let Some((key, event)) = self.queue.pop_first() {
            self.now = key.at;

            let id = ProcessId(key.node);
            let node = self.nodes[key.node as usize]
                .as_mut()
                // Delivery to the dead slot means a filter upstream failed.
                .ok_or(ProtocolViolation::SendToDowned(id))?;

            let actions = node.handle(event);
            self.stats.events_processed += 1;
            self.execute(id, actions)?;
        }

        self.verify()
    }

    fn verify(&self) -> Result<ElectionOutcome, SimulationError> {
        let live = self.nodes.iter().flatten();

        let mut elected: Option<ProcessId> = None;
        for node in live.clone() {
            if node.is_leader() {
                if let Some(first) = elected {
                    return Err(SimulationError::MultipleLeaders {
                        first,
                        second: node.id(),
                    });
                }
                elected = Some(node.id());
            }
        }

        let elected = elected.ok_or_else(|| {
            // No winner: report whichever node is still waiting.
            let node = self
                .nodes
                .iter()
                .flatten()
                .find(|n| !n.is_done())
                .map(|n| n.id())
                .unwrap_or(ProcessId(0));
            SimulationError::Stalled { node }
        })?;

        for node in live {
            match node.leader() {
                Some(recorded) if recorded == elected => {}
                Some(recorded) => {
                    return Err(SimulationError::Disagreement {
                        node: node.id(),
                        recorded,
                        elected,
                    })
                }
                None => return Err(SimulationError::Stalled { node: node.id() }),
            }
        }

        info!(leader = %elected, elapsed = ?self.now, "election concluded");

        Ok(ElectionOutcome {
            leader: elected,
            elapsed: self.now,
            stats: self.stats,
        })
    }

    /// The roster this run is using.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    fn run(count: u32, dead: u32, initiator: u32) -> ElectionOutcome {
        SimulationRunner::new(
            count,
            ProcessId(dead),
            ProcessId(initiator),
            NetworkConfig::default(),
            12345,
        )
        .unwrap()
        .run()
        .unwrap()
    }

    #[traced_test]
    #[test]
    fn test_scenario_a() {
        // N=5, dead=4, initiator=0: 0 probes 1,2,3; cascades end with
        // 3 winning and announcing to the three other live nodes.
        let outcome = run(5, 4, 0);
        assert_eq!(outcome.leader, ProcessId(3));
        assert_eq!(outcome.stats.coordinators_sent, 3);
    }

    #[traced_test]
    #[test]
    fn test_scenario_b() {
        // N=4, dead=2, initiator=0: probes skip the dead 2; 3 wins and
        // announces to 0 and 1.
        let outcome = run(4, 2, 0);
        assert_eq!(outcome.leader, ProcessId(3));
        assert_eq!(outcome.stats.coordinators_sent, 2);
    }

    #[traced_test]
    #[test]
    fn test_zero_probe_shortcut() {
        // Initiator is already the maximum live id: no ELECTION probes,
        // no OK replies, straight to the announcement.
        let outcome = run(5, 4, 3);
        assert_eq!(outcome.leader, ProcessId(3));
        assert_eq!(outcome.stats.elections_sent, 0);
        assert_eq!(outcome.stats.oks_sent, 0);
        assert_eq!(outcome.stats.coordinators_sent, 3);
    }

    #[traced_test]
    #[test]
    fn test_rejects_bad_scenario_before_running() {
        let err = SimulationRunner::new(
            4,
            ProcessId(7),
            ProcessId(0),
            NetworkConfig::default(),
            0,
        )
        .unwrap_err();
        assert!(matches!(err, SimulationError::Config(_)));
    }

    #[traced_test]
    #[test]
    fn test_determinism_across_runs() {
        let a = run(5, 4, 0);
        let b = run(5, 4, 0);
        assert_eq!(a, b);
    }
}
