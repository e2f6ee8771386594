//! The case catalog: descriptive metadata for each playable case file.

use std::fmt;

use serde::{Deserialize, Serialize};

use casevault_core::ids::CaseId;

/// Classification tag stamped on catalog entries and archive documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    #[serde(rename = "DECLASSIFIED")]
    Declassified,
    #[serde(rename = "PARTIALLY REDACTED")]
    PartiallyRedacted,
    #[serde(rename = "UNCLASSIFIED")]
    Unclassified,
    #[serde(rename = "ONGOING")]
    Ongoing,
    #[serde(rename = "RESTRICTED")]
    Restricted,
    #[serde(rename = "UNVERIFIED")]
    Unverified,
    #[serde(rename = "CLASSIFIED")]
    Classified,
}

impl Classification {
    /// The display form, as stamped on the original documents.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Classification::Declassified => "DECLASSIFIED",
            Classification::PartiallyRedacted => "PARTIALLY REDACTED",
            Classification::Unclassified => "UNCLASSIFIED",
            Classification::Ongoing => "ONGOING",
            Classification::Restricted => "RESTRICTED",
            Classification::Unverified => "UNVERIFIED",
            Classification::Classified => "CLASSIFIED",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Descriptive metadata for one case file.
///
/// Completion state is never stored here; it is derived from the session's
/// completed-case set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseEntry {
    /// 1-based ordinal; expresses the linear unlock dependency.
    pub id: CaseId,
    /// Display title.
    pub title: String,
    /// External case number, e.g. `UAP-1947-001`.
    pub case_number: String,
    /// Date or date range of the underlying events.
    pub date: String,
    /// Where the events took place.
    pub location: String,
    /// Classification tag.
    pub classification: Classification,
    /// One-line summary.
    pub summary: String,
}
