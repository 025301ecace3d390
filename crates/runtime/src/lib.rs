//! Live cluster runner.
//!
//! Runs one tokio task per process and wires them together with
//! channels. The same state machines the deterministic simulation
//! drives run here unchanged; only the transport differs:
//!
//! - each live process owns a single mpsc receiver, the one consumer of
//!   its inbound stream;
//! - a one-shot watch broadcast distributes the failure scenario to
//!   every task before any election logic runs (a logical barrier);
//! - the process designated dead observes the broadcast and exits
//!   immediately with success.
//!
//! Internal events are drained ahead of network receives, so a cascade
//! triggered by a challenge completes before new traffic is consumed.

mod cluster;

pub use cluster::{run_cluster, ClusterReport, RuntimeError};
