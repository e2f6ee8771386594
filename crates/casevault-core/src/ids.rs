//! Identifier newtypes shared across bounded contexts.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 1-based ordinal identifier of a case file.
///
/// The ordinal expresses the linear unlock dependency: case `N` is
/// accessible iff `N == 1` or case `N - 1` has been completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseId(pub u32);

impl CaseId {
    /// The first case, which is always unlocked.
    pub const FIRST: CaseId = CaseId(1);

    /// The case that must be completed before this one unlocks, if any.
    #[must_use]
    pub fn previous(self) -> Option<CaseId> {
        (self.0 > 1).then(|| CaseId(self.0 - 1))
    }
}

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Data-defined identifier of a scene node within one case's graph.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Creates a node id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}
