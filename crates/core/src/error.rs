//! Protocol violation errors.

use stampede_types::ProcessId;
use thiserror::Error;

/// Violations of the protocol's send discipline.
///
/// The engine filters the roster before every send, so none of these
/// should ever be produced by correct code. Runners surface them
/// instead of silently dropping misaddressed traffic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolViolation {
    #[error("message addressed to downed process {0}")]
    SendToDowned(ProcessId),

    #[error("message addressed to unknown process {0}")]
    SendToUnknown(ProcessId),
}
