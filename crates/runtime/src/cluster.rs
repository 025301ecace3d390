//! Cluster orchestration: task-per-process election over channels.

use stampede_core::{Action, Event, OutboundMessage, ProtocolViolation, StateMachine};
use stampede_node::NodeStateMachine;
use stampede_types::{ConfigError, ProcessId, Scenario};
use std::collections::{HashMap, VecDeque};
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

/// Errors from a live election run.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Scenario rejected before any task was spawned.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A state machine emitted a misaddressed send.
    #[error(transparent)]
    Protocol(#[from] ProtocolViolation),

    /// The scenario broadcast channel was torn down early.
    #[error("scenario broadcast never reached {0}")]
    BroadcastLost(ProcessId),

    /// A node's inbound stream closed before it learned the leader.
    #[error("{0} lost its inbound stream before termination")]
    InboundClosed(ProcessId),

    /// A node task panicked or was cancelled.
    #[error("node task failed: {0}")]
    Task(String),

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

    /// No process claimed victory.
    #[error("no process claimed the coordinator role")]
    NoLeader,
}

/// Outcome of a live run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterReport {
    /// The unique elected coordinator.
    pub leader: ProcessId,

    /// Live processes that terminated holding the leader, in rank order.
    pub finishers: Vec<ProcessId>,
}

/// A message in flight between two tasks.
#[derive(Debug, Clone, Copy)]
struct Envelope {
    from: ProcessId,
    message: OutboundMessage,
}

/// What a node task reports back when it exits.
#[derive(Debug, Clone, Copy)]
struct NodeExit {
    id: ProcessId,
    /// `None` for the process designated dead.
    leader: Option<ProcessId>,
    won: bool,
}

/// Run a full election over a task-per-process cluster.
///
/// The caller plays the distinguished origin: the scenario is validated
/// here and then broadcast to every task, none of which proceeds past
/// the broadcast until it has the value.
pub async fn run_cluster(
    count: u32,
    dead: ProcessId,
    initiator: ProcessId,
) -> Result<ClusterReport, RuntimeError> {
    let scenario = Scenario::new(count, dead, initiator)?;

    // One inbound channel per process. Senders for every id are handed
    // to every task; the roster filter decides who may actually be
    // addressed.
    let mut senders = HashMap::new();
    let mut receivers = HashMap::new();
    for id in (0..count).map(ProcessId) {
        let (tx, rx) = mpsc::unbounded_channel::<Envelope>();
        senders.insert(id, tx);
        receivers.insert(id, rx);
    }

    let (scenario_tx, scenario_rx) = watch::channel(None::<Scenario>);

    let mut handles = Vec::with_capacity(count as usize);
    for id in (0..count).map(ProcessId) {
        let rx = receivers.remove(&id).expect("receiver for every id");
        handles.push(tokio::spawn(node_task(
            id,
            count,
            rx,
            senders.clone(),
            scenario_rx.clone(),
        )));
    }

    // The barrier: nothing above ran election logic yet. Dropping the
    // origin's sender copies matters too, or conceded nodes would wait
    // on a stream that can never close.
    drop(senders);
    info!(%dead, %initiator, count, "broadcasting scenario");
    scenario_tx
        .send(Some(scenario))
        .map_err(|_| RuntimeError::BroadcastLost(initiator))?;

    let mut exits = Vec::with_capacity(count as usize);
    for handle in handles {
        let exit = handle
            .await
            .map_err(|e| RuntimeError::Task(e.to_string()))??;
        exits.push(exit);
    }

    summarize(exits)
}

/// One participant: receive the scenario, then run the dispatch loop
/// until the election has terminated locally.
async fn node_task(
    id: ProcessId,
    count: u32,
    mut rx: mpsc::UnboundedReceiver<Envelope>,
    senders: HashMap<ProcessId, mpsc::UnboundedSender<Envelope>>,
    mut scenario_rx: watch::Receiver<Option<Scenario>>,
) -> Result<NodeExit, RuntimeError> {
    let scenario = *scenario_rx
        .wait_for(|s| s.is_some())
        .await
        .map_err(|_| RuntimeError::BroadcastLost(id))?;
    let scenario = scenario.expect("wait_for guarantees a value");

    if id == scenario.dead {
        info!(%id, "designated dead, exiting at startup");
        return Ok(NodeExit {
            id,
            leader: None,
            won: false,
        });
    }

    let roster = scenario.roster(count);
    let mut node = NodeStateMachine::new(id, roster);
    let mut internal: VecDeque<Event> = VecDeque::new();

    if id == scenario.initiator {
        info!(%id, dead = %scenario.dead, "noticed coordinator failure, initiating election");
        internal.push_back(Event::ElectionRequested);
    }

    while !node.is_done() {
        // Internal cascades complete before new network traffic.
        let event = match internal.pop_front() {
            Some(event) => event,
            None => match rx.recv().await {
                Some(envelope) => {
                    debug!(%id, from = %envelope.from, kind = envelope.message.type_name(), "received");
                    envelope.message.into_event()
                }
                None => return Err(RuntimeError::InboundClosed(id)),
            },
        };

        for action in node.handle(event) {
            match action {
                Action::Send { to, message } => {
                    if !node.roster().is_live(to) {
                        return Err(ProtocolViolation::SendToDowned(to).into());
                    }
                    let tx = senders
                        .get(&to)
                        .ok_or(ProtocolViolation::SendToUnknown(to))?;
                    if tx.send(Envelope { from: id, message }).is_err() {
                        // Receiver already terminated; late traffic to a
                        // finished process is stray by definition.
                        debug!(%id, %to, "peer already exited, dropping message");
                    }
                }
                Action::EnqueueInternal { event } => internal.push_back(event),
            }
        }
    }

    let won = node.is_leader();
    if won {
        info!(%id, "exiting as coordinator");
    } else {
        info!(%id, leader = ?node.leader(), "exiting as follower");
    }

    Ok(NodeExit {
        id,
        leader: node.leader(),
        won,
    })
}

/// Check uniqueness and agreement across the collected exits.
fn summarize(mut exits: Vec<NodeExit>) -> Result<ClusterReport, RuntimeError> {
    exits.sort_by_key(|e| e.id);

    let mut elected: Option<ProcessId> = None;
    for exit in exits.iter().filter(|e| e.won) {
        if let Some(first) = elected {
            return Err(RuntimeError::MultipleLeaders {
                first,
                second: exit.id,
            });
        }
        elected = Some(exit.id);
    }
    let elected = elected.ok_or(RuntimeError::NoLeader)?;

    let mut finishers = Vec::new();
    for exit in exits.iter().filter(|e| e.leader.is_some()) {
        let recorded = exit.leader.expect("filtered on leader presence");
        if recorded != elected {
            return Err(RuntimeError::Disagreement {
                node: exit.id,
                recorded,
                elected,
            });
        }
        finishers.push(exit.id);
    }

    Ok(ClusterReport {
        leader: elected,
        finishers,
    })
}
