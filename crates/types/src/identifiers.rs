//! Domain-specific identifier types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Process identifier (rank).
///
/// Unique per participant, totally ordered. Ordering is the sole
/// election criterion: the highest live id wins.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ProcessId(pub u32);

impl ProcessId {
    /// Create a new process id.
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw id value.
    pub fn as_u32(&self) -> u32 {
        self.0
    }

    /// Check whether this id outranks another.
    pub fn outranks(&self, other: ProcessId) -> bool {
        self.0 > other.0
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Process({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_is_by_rank() {
        assert!(ProcessId(3) > ProcessId(2));
        assert!(ProcessId(3).outranks(ProcessId(0)));
        assert!(!ProcessId(1).outranks(ProcessId(1)));
    }
}
