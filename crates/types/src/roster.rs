//! Static membership roster and liveness knowledge.

use crate::ProcessId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Set of processes presumed failed and unreachable.
///
/// Immutable once distributed. This stands in for a real failure
/// detector: the engine consults it before every send, so no message is
/// ever addressed to a downed process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LivenessSet {
    downed: BTreeSet<ProcessId>,
}

impl LivenessSet {
    /// Empty set: every process is presumed live.
    pub fn all_live() -> Self {
        Self::default()
    }

    /// Build from the ids presumed failed.
    pub fn with_downed(downed: impl IntoIterator<Item = ProcessId>) -> Self {
        Self {
            downed: downed.into_iter().collect(),
        }
    }

    /// Check whether an id is presumed failed.
    pub fn is_downed(&self, id: ProcessId) -> bool {
        self.downed.contains(&id)
    }

    /// Number of processes presumed failed.
    pub fn downed_count(&self) -> usize {
        self.downed.len()
    }
}

/// Static cluster membership: total process count plus liveness.
///
/// Single source of truth for "who can I talk to". All enumeration the
/// engine does (superiors to probe, peers to announce to) goes through
/// here, which is what makes send-to-dead impossible by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    count: u32,
    liveness: LivenessSet,
}

impl Roster {
    /// Create a roster of `count` processes with the given liveness.
    pub fn new(count: u32, liveness: LivenessSet) -> Self {
        Self { count, liveness }
    }

    /// Total number of processes, live or not.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Check whether an id is a valid member, live or not.
    pub fn contains(&self, id: ProcessId) -> bool {
        id.0 < self.count
    }

    /// Check whether an id is a live member.
    pub fn is_live(&self, id: ProcessId) -> bool {
        self.contains(id) && !self.liveness.is_downed(id)
    }

    /// Live processes strictly outranking `id`, in ascending order.
    pub fn live_superiors_of(&self, id: ProcessId) -> impl Iterator<Item = ProcessId> + '_ {
        (id.0 + 1..self.count)
            .map(ProcessId)
            .filter(|p| self.is_live(*p))
    }

    /// All live processes other than `id`, in ascending order.
    pub fn live_peers_of(&self, id: ProcessId) -> impl Iterator<Item = ProcessId> + '_ {
        (0..self.count)
            .map(ProcessId)
            .filter(move |p| *p != id && self.is_live(*p))
    }

    /// Highest-ranked live process, if any process is live at all.
    pub fn max_live(&self) -> Option<ProcessId> {
        (0..self.count).rev().map(ProcessId).find(|p| self.is_live(*p))
    }

    /// Number of live processes.
    pub fn live_count(&self) -> u32 {
        self.count - self.liveness.downed_count() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(count: u32, downed: &[u32]) -> Roster {
        Roster::new(
            count,
            LivenessSet::with_downed(downed.iter().copied().map(ProcessId)),
        )
    }

    #[test]
    fn test_live_superiors_skip_downed() {
        let r = roster(5, &[4]);
        let sup: Vec<u32> = r.live_superiors_of(ProcessId(0)).map(|p| p.0).collect();
        assert_eq!(sup, vec![1, 2, 3]);
    }

    #[test]
    fn test_max_live_skips_downed_maximum() {
        let r = roster(5, &[4]);
        assert_eq!(r.max_live(), Some(ProcessId(3)));

        let r = roster(4, &[2]);
        assert_eq!(r.max_live(), Some(ProcessId(3)));
    }

    #[test]
    fn test_top_rank_has_no_superiors() {
        let r = roster(4, &[2]);
        assert_eq!(r.live_superiors_of(ProcessId(3)).count(), 0);
    }

    #[test]
    fn test_live_peers_exclude_self_and_downed() {
        let r = roster(4, &[2]);
        let peers: Vec<u32> = r.live_peers_of(ProcessId(3)).map(|p| p.0).collect();
        assert_eq!(peers, vec![0, 1]);
    }

    #[test]
    fn test_all_downed_has_no_max() {
        let r = roster(2, &[0, 1]);
        assert_eq!(r.max_live(), None);
        assert_eq!(r.live_count(), 0);
    }
}
