//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

use crate::ids::{CaseId, NodeId};

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A scene graph failed referential-integrity validation at
    /// construction. Fatal: the graph is never usable.
    #[error("invalid scene graph: {0}")]
    InvalidGraph(String),

    /// A node id was not present in a validated graph. Indicates a
    /// programming defect, not a user error.
    #[error("unknown scene node: {0}")]
    UnknownNode(NodeId),

    /// A choice index outside the current node's choice list. Recoverable:
    /// the playback state is unchanged and the caller should re-prompt.
    #[error("invalid choice index {index}: node offers {available} choices")]
    InvalidChoice {
        /// The rejected index.
        index: usize,
        /// How many choices the current node offers.
        available: usize,
    },

    /// An operation invoked outside its valid playback state. Recoverable:
    /// the playback state is unchanged.
    #[error("operation {operation} is not valid in state {state}")]
    InvalidState {
        /// The rejected operation.
        operation: &'static str,
        /// The state the controller was in.
        state: &'static str,
    },

    /// A case id absent from the loaded case pack.
    #[error("unknown case: {0}")]
    UnknownCase(CaseId),

    /// A case whose unlock dependency has not been completed.
    #[error("case {0} is locked: complete the preceding case first")]
    CaseLocked(CaseId),

    /// A session id absent from the registry.
    #[error("session not found: {0}")]
    SessionNotFound(Uuid),

    /// A case pack that could not be loaded or failed validation.
    #[error("content error: {0}")]
    Content(String),
}
