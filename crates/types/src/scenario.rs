//! Operator-supplied failure scenario.

use crate::{LivenessSet, ProcessId, Roster};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors in the operator-supplied scenario.
///
/// All of these are fatal before any election message is sent: no
/// partial election with unknown parameters is permitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{field} id {id} is out of range for a cluster of {count} processes")]
    OutOfRange {
        field: &'static str,
        id: u32,
        count: u32,
    },

    #[error("initiator {0} cannot be the process designated dead")]
    DeadInitiator(ProcessId),

    #[error("cluster needs at least 2 processes, got {0}")]
    ClusterTooSmall(u32),
}

/// The failure scenario distributed once before the election begins:
/// which process is presumed dead, and which one notices and starts
/// the election.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// The former coordinator, presumed failed.
    pub dead: ProcessId,

    /// The process that notices the failure and initiates the election.
    pub initiator: ProcessId,
}

impl Scenario {
    /// Validate a scenario against the cluster size.
    ///
    /// Out-of-range ids and a dead initiator are rejected here, before
    /// any process is started or any message sent.
    pub fn new(count: u32, dead: ProcessId, initiator: ProcessId) -> Result<Self, ConfigError> {
        if count < 2 {
            return Err(ConfigError::ClusterTooSmall(count));
        }
        if dead.0 >= count {
            return Err(ConfigError::OutOfRange {
                field: "dead",
                id: dead.0,
                count,
            });
        }
        if initiator.0 >= count {
            return Err(ConfigError::OutOfRange {
                field: "initiator",
                id: initiator.0,
                count,
            });
        }
        if dead == initiator {
            return Err(ConfigError::DeadInitiator(initiator));
        }
        Ok(Self { dead, initiator })
    }

    /// Build the roster implied by this scenario for `count` processes.
    pub fn roster(&self, count: u32) -> Roster {
        Roster::new(count, LivenessSet::with_downed([self.dead]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_scenario() {
        let s = Scenario::new(5, ProcessId(4), ProcessId(0)).unwrap();
        assert_eq!(s.dead, ProcessId(4));
        assert_eq!(s.initiator, ProcessId(0));

        let roster = s.roster(5);
        assert!(!roster.is_live(ProcessId(4)));
        assert_eq!(roster.max_live(), Some(ProcessId(3)));
    }

    #[test]
    fn test_out_of_range_dead() {
        let err = Scenario::new(4, ProcessId(4), ProcessId(0)).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { field: "dead", .. }));
    }

    #[test]
    fn test_out_of_range_initiator() {
        let err = Scenario::new(4, ProcessId(1), ProcessId(9)).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OutOfRange {
                field: "initiator",
                ..
            }
        ));
    }

    #[test]
    fn test_dead_initiator_rejected() {
        let err = Scenario::new(4, ProcessId(1), ProcessId(1)).unwrap_err();
        assert_eq!(err, ConfigError::DeadInitiator(ProcessId(1)));
    }

    #[test]
    fn test_cluster_too_small() {
        let err = Scenario::new(1, ProcessId(0), ProcessId(0)).unwrap_err();
        assert_eq!(err, ConfigError::ClusterTooSmall(1));
    }
}
