//! Core types for the Stampede leader election protocol.
//!
//! These are the shared vocabulary types: process identity, the static
//! liveness roster, the engine phase, and the operator-supplied failure
//! scenario.

mod identifiers;
mod phase;
mod roster;
mod scenario;

pub use identifiers::ProcessId;
pub use phase::Phase;
pub use roster::{LivenessSet, Roster};
pub use scenario::{ConfigError, Scenario};
