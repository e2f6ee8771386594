//! Session-scoped progress: the completed-case set and the unlock rule.

use std::collections::BTreeSet;

use serde::Serialize;

use casevault_core::ids::CaseId;

/// Derived per-case status shown in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CaseStatus {
    /// The case's terminal node has been acknowledged.
    Completed,
    /// Unlocked and playable.
    Available,
    /// Gated behind the preceding case.
    Locked,
}

/// Which cases a session has finished. Membership is all that matters;
/// nothing here is persisted beyond the process.
#[derive(Debug, Default)]
pub struct Progress {
    completed: BTreeSet<CaseId>,
}

impl Progress {
    /// An empty progress record, as at session start.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a completed case. Idempotent: returns true only the first
    /// time a given case is recorded.
    pub fn record_completion(&mut self, case_id: CaseId) -> bool {
        self.completed.insert(case_id)
    }

    /// Whether the case has been completed.
    #[must_use]
    pub fn is_completed(&self, case_id: CaseId) -> bool {
        self.completed.contains(&case_id)
    }

    /// The linear unlock rule: case `N` is accessible iff `N == 1` or case
    /// `N - 1` has been completed.
    #[must_use]
    pub fn is_unlocked(&self, case_id: CaseId) -> bool {
        case_id
            .previous()
            .is_none_or(|previous| self.completed.contains(&previous))
    }

    /// Derived status for the catalog view.
    #[must_use]
    pub fn status_of(&self, case_id: CaseId) -> CaseStatus {
        if self.is_completed(case_id) {
            CaseStatus::Completed
        } else if self.is_unlocked(case_id) {
            CaseStatus::Available
        } else {
            CaseStatus::Locked
        }
    }

    /// Number of completed cases.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_case_is_always_unlocked() {
        let progress = Progress::new();
        assert!(progress.is_unlocked(CaseId::FIRST));
        assert_eq!(progress.status_of(CaseId::FIRST), CaseStatus::Available);
    }

    #[test]
    fn test_case_k_unlocks_iff_previous_completed() {
        let mut progress = Progress::new();
        for k in 2..=8 {
            assert!(!progress.is_unlocked(CaseId(k)));
        }

        progress.record_completion(CaseId(1));
        assert!(progress.is_unlocked(CaseId(2)));
        assert!(!progress.is_unlocked(CaseId(3)));

        progress.record_completion(CaseId(2));
        assert!(progress.is_unlocked(CaseId(3)));
    }

    #[test]
    fn test_record_completion_is_idempotent() {
        let mut progress = Progress::new();
        assert!(progress.record_completion(CaseId(1)));
        assert!(!progress.record_completion(CaseId(1)));
        assert_eq!(progress.completed_count(), 1);
    }

    #[test]
    fn test_status_transitions() {
        let mut progress = Progress::new();
        assert_eq!(progress.status_of(CaseId(2)), CaseStatus::Locked);

        progress.record_completion(CaseId(1));
        assert_eq!(progress.status_of(CaseId(1)), CaseStatus::Completed);
        assert_eq!(progress.status_of(CaseId(2)), CaseStatus::Available);
        assert_eq!(progress.status_of(CaseId(3)), CaseStatus::Locked);
    }

    #[test]
    fn test_status_serializes_in_badge_form() {
        let json = serde_json::to_string(&CaseStatus::Locked).unwrap();
        assert_eq!(json, "\"LOCKED\"");
    }
}
