//! Combined node state machine.
//!
//! This crate composes the election engine into the complete
//! per-process state machine driven by a runner.

mod state;

pub use state::NodeStateMachine;
