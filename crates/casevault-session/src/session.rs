//! The archive session: one reader's progress plus at most one active
//! playback, consolidated into an explicit object passed to the view layer
//! instead of ambient per-page state.

use std::sync::{Mutex, MutexGuard, PoisonError, Weak};

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use casevault_content::pack::CasePack;
use casevault_core::error::DomainError;
use casevault_core::ids::CaseId;
use casevault_playback::controller::{CaseCompleted, PlaybackController, RenderState};
use casevault_playback::reveal::{RevealHandle, RevealScheduler};

use crate::progress::{CaseStatus, Progress};

/// Collaborator notified whenever a case's terminal node is acknowledged.
pub trait UnlockSink: Send + Sync {
    /// Called once per acknowledgement, after progress is updated.
    fn case_completed(&self, session_id: Uuid, completed: &CaseCompleted);
}

/// Production sink: records completions in the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingUnlockSink;

impl UnlockSink for TracingUnlockSink {
    fn case_completed(&self, session_id: Uuid, completed: &CaseCompleted) {
        info!(
            %session_id,
            case_id = %completed.case_id,
            unlock_reward = %completed.unlock_reward,
            "case completed"
        );
    }
}

/// One reader's session. Lives for the process; nothing is persisted.
#[derive(Debug)]
pub struct ArchiveSession {
    /// Session identifier.
    pub id: Uuid,
    /// When the session was created.
    pub started_at: DateTime<Utc>,
    progress: Progress,
    controller: PlaybackController,
    reveal: RevealHandle,
    unlocked_rewards: Vec<String>,
}

impl ArchiveSession {
    /// Creates an empty session.
    #[must_use]
    pub fn new(id: Uuid, started_at: DateTime<Utc>) -> Self {
        Self {
            id,
            started_at,
            progress: Progress::new(),
            controller: PlaybackController::new(),
            reveal: RevealHandle::new(),
            unlocked_rewards: Vec::new(),
        }
    }

    /// Opens a case for playback, enforcing the unlock gate.
    ///
    /// Opening always resets: any active playback and its pending reveal
    /// timer are discarded first.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownCase` for an id outside the pack,
    /// `DomainError::CaseLocked` when the preceding case is incomplete, and
    /// `DomainError::Content` for a metadata-only case.
    pub fn open_case(&mut self, pack: &CasePack, case_id: CaseId) -> Result<(), DomainError> {
        let case = pack.case(case_id)?;
        if !self.progress.is_unlocked(case_id) {
            return Err(DomainError::CaseLocked(case_id));
        }
        let graph = case.graph()?;

        self.reveal.cancel();
        self.controller.start(case_id, graph)?;
        info!(session_id = %self.id, %case_id, "case opened");
        Ok(())
    }

    /// Follows a choice out of the current node.
    ///
    /// A rejected call must not disturb a running reveal, so the timer is
    /// only cancelled after the controller accepts the transition.
    ///
    /// # Errors
    ///
    /// Propagates `DomainError::InvalidChoice` / `DomainError::InvalidState`
    /// from the controller; the session is unchanged on error.
    pub fn select_choice(&mut self, index: usize) -> Result<(), DomainError> {
        self.controller.select_choice(index)?;
        self.reveal.cancel();
        Ok(())
    }

    /// Acknowledges a revealed ending: updates progress (idempotently),
    /// records the unlocked reward, notifies the sink, and returns the
    /// controller to idle.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidState` when no ending is showing.
    pub fn acknowledge_ending(
        &mut self,
        sink: &dyn UnlockSink,
    ) -> Result<CaseCompleted, DomainError> {
        let completed = self.controller.acknowledge_ending()?;
        self.reveal.cancel();
        if self.progress.record_completion(completed.case_id) {
            self.unlocked_rewards.push(completed.unlock_reward.clone());
        }
        sink.case_completed(self.id, &completed);
        Ok(completed)
    }

    /// Closes the active case without completing it. Cancels the pending
    /// reveal timer and discards partial progress.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidState` when no case is open.
    pub fn abort(&mut self) -> Result<(), DomainError> {
        self.controller.abort()?;
        self.reveal.cancel();
        Ok(())
    }

    /// One reveal step, called only by the armed timer task. Returns false
    /// once ticking should stop — because the reveal finished, the session
    /// moved on to a newer reveal generation, or playback ended.
    pub fn advance_reveal(&mut self, generation: u64) -> bool {
        if self.controller.generation() != generation || !self.controller.is_revealing() {
            return false;
        }
        self.controller.tick().unwrap_or(false)
    }

    /// Arms the reveal timer for the controller's current reveal, replacing
    /// (and thereby cancelling) any previously armed timer. A no-op unless
    /// the controller is revealing.
    ///
    /// `slot` must be the shared handle this session lives in; the task
    /// stands down if the session is dropped.
    pub fn arm_reveal(&mut self, scheduler: &RevealScheduler, slot: Weak<Mutex<ArchiveSession>>) {
        if !self.controller.is_revealing() {
            return;
        }
        let generation = self.controller.generation();
        let task = scheduler.spawn(move || {
            let Some(slot) = slot.upgrade() else {
                return false;
            };
            let mut session = lock_session(&slot);
            session.advance_reveal(generation)
        });
        self.reveal.replace(task);
    }

    /// Render snapshot of the active playback.
    ///
    /// # Errors
    ///
    /// Propagates node-resolution failures, which a validated graph rules
    /// out.
    pub fn render(&self) -> Result<RenderState, DomainError> {
        self.controller.render()
    }

    /// Derived status of a case for the catalog view.
    #[must_use]
    pub fn status_of(&self, case_id: CaseId) -> CaseStatus {
        self.progress.status_of(case_id)
    }

    /// Number of completed cases.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.progress.completed_count()
    }

    /// Rewards unlocked so far, in completion order.
    #[must_use]
    pub fn unlocked_rewards(&self) -> &[String] {
        &self.unlocked_rewards
    }

    /// The controller's current reveal generation.
    #[must_use]
    pub fn reveal_generation(&self) -> u64 {
        self.controller.generation()
    }
}

/// Locks a session slot, recovering from poisoning: the session is the only
/// copy of the reader's progress, and every operation leaves it valid even
/// on early return.
pub fn lock_session(slot: &Mutex<ArchiveSession>) -> MutexGuard<'_, ArchiveSession> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}
