//! Core trait for state machines.

use crate::{Action, Event};

/// A state machine that processes events.
///
/// All election logic is implemented as state machines that are:
///
/// - **Synchronous**: no async, no `.await`
/// - **Deterministic**: same state + event = same actions
/// - **Pure-ish**: mutates self, but performs no I/O
///
/// The same state machine runs unchanged under the deterministic
/// simulation and under the live tokio cluster; only the runner
/// differs.
pub trait StateMachine {
    /// Process an event, returning actions for the runner to execute.
    ///
    /// This method never blocks. Actions may include sending network
    /// messages and enqueueing internal events.
    fn handle(&mut self, event: Event) -> Vec<Action>;
}
