//! Deterministic simulation runner.
//!
//! This crate provides a fully deterministic environment for running
//! elections. Given the same seed, it produces identical results every
//! run.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                  SimulationRunner                       │
//! │                                                         │
//! │  ┌────────────────────────────────────────────────────┐ │
//! │  │     Event Queue (BTreeMap<EventKey, Event>)        │ │
//! │  │     Ordered by: time, priority, node, sequence     │ │
//! │  └────────────────────────┬───────────────────────────┘ │
//! │                           │                             │
//! │                           ▼                             │
//! │  ┌────────────────────────────────────────────────────┐ │
//! │  │     nodes: Vec<Option<NodeStateMachine>>           │ │
//! │  │     Each processes events sequentially             │ │
//! │  │     (None = the process designated dead)           │ │
//! │  └────────────────────────┬───────────────────────────┘ │
//! │                           │                             │
//! │                           ▼                             │
//! │  ┌────────────────────────────────────────────────────┐ │
//! │  │     Actions → schedule new events                  │ │
//! │  └────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! The queue is the transport: a `Send` action becomes a delivery event
//! at a jittered future time, with per-pair FIFO preserved. There is one
//! delivery stream per node, so the baseline's competing-receive race
//! cannot occur.

mod event_queue;
mod network;
mod runner;

pub use event_queue::{EventKey, EventPriority};
pub use network::{NetworkConfig, SimulatedNetwork};
pub use runner::{ElectionOutcome, SimulationError, SimulationRunner, SimulationStats};

/// Type alias for deterministic node indexing in simulation.
pub type NodeIndex = u32;
