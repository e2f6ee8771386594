//! Test sinks — mock `UnlockSink` implementations for tests.

use std::sync::Mutex;

use uuid::Uuid;

use casevault_playback::controller::CaseCompleted;
use casevault_session::session::UnlockSink;

/// An unlock sink that records every completion it is handed.
#[derive(Debug, Default)]
pub struct RecordingUnlockSink {
    completions: Mutex<Vec<(Uuid, CaseCompleted)>>,
}

impl RecordingUnlockSink {
    /// Returns a snapshot of all recorded completions.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn completions(&self) -> Vec<(Uuid, CaseCompleted)> {
        self.completions.lock().unwrap().clone()
    }
}

impl UnlockSink for RecordingUnlockSink {
    fn case_completed(&self, session_id: Uuid, completed: &CaseCompleted) {
        self.completions
            .lock()
            .unwrap()
            .push((session_id, completed.clone()));
    }
}
