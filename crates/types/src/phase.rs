//! Election engine phase.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Protocol phase of a single participant.
///
/// The only mutable state owned by the election engine. Transitions:
///
/// ```text
/// Idle ──► Electing ──► AwaitingOk ──► Idle   (conceded, awaiting winner)
///              │
///              └───────► Leader ─────► Done   (zero-probe victory)
///
/// any non-Done phase ──► Done on coordinator announcement
/// ```
///
/// A conceding participant returns to `Idle` rather than `Done`: it has
/// abandoned its own candidacy but still owes the protocol a recorded
/// leader, which only the coordinator announcement supplies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Not currently campaigning.
    Idle,

    /// Enumerating and probing live superiors.
    Electing,

    /// Probes sent, waiting for a superior to answer.
    AwaitingOk,

    /// Won the election, announcing to all live peers.
    Leader,

    /// Terminal: leader known, no further transitions.
    Done,
}

impl Phase {
    /// Terminal phases admit no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Done)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Electing => "electing",
            Phase::AwaitingOk => "awaiting_ok",
            Phase::Leader => "leader",
            Phase::Done => "done",
        };
        f.write_str(name)
    }
}
