//! Ordering key for the simulation event queue.

use crate::NodeIndex;
use std::time::Duration;

/// Scheduling class for an event.
///
/// Internal events sort before network deliveries at the same instant:
/// a node finishes reacting to what it already consumed before new
/// traffic reaches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EventPriority {
    /// Event a node enqueued to itself.
    Internal = 0,

    /// Message delivery from the simulated network.
    Network = 1,
}

/// Total ordering key for queued events.
///
/// Field order matters: `BTreeMap<EventKey, _>` iterates by time, then
/// priority, then destination node, then insertion sequence. The
/// sequence is globally monotonic, which keeps equal-time deliveries
/// between a fixed pair in send order (per-pair FIFO).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct EventKey {
    /// Virtual delivery time.
    pub at: Duration,

    /// Scheduling class.
    pub priority: EventPriority,

    /// Destination node.
    pub node: NodeIndex,

    /// Global insertion sequence, breaks all remaining ties.
    pub seq: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orders_by_time_first() {
        let early = EventKey {
            at: Duration::from_millis(1),
            priority: EventPriority::Network,
            node: 9,
            seq: 100,
        };
        let late = EventKey {
            at: Duration::from_millis(2),
            priority: EventPriority::Internal,
            node: 0,
            seq: 0,
        };
        assert!(early < late);
    }

    #[test]
    fn test_internal_beats_network_at_same_instant() {
        let internal = EventKey {
            at: Duration::from_millis(5),
            priority: EventPriority::Internal,
            node: 3,
            seq: 7,
        };
        let network = EventKey {
            at: Duration::from_millis(5),
            priority: EventPriority::Network,
            node: 0,
            seq: 1,
        };
        assert!(internal < network);
    }

    #[test]
    fn test_sequence_breaks_final_ties() {
        let first = EventKey {
            at: Duration::from_millis(5),
            priority: EventPriority::Network,
            node: 2,
            seq: 1,
        };
        let second = EventKey {
            at: Duration::from_millis(5),
            priority: EventPriority::Network,
            node: 2,
            seq: 2,
        };
        assert!(first < second);
    }
}
