//! Integration tests for the archive session.
//!
//! These live outside the crate so that `RecordingUnlockSink` from
//! `casevault-test-support` and the session under test agree on a single
//! build of `casevault-session` (unit tests would link two copies).

use std::sync::Mutex;

use uuid::Uuid;

use casevault_core::clock::Clock;
use casevault_core::error::DomainError;
use casevault_core::ids::CaseId;
use casevault_playback::controller::RenderState;
use casevault_playback::reveal::RevealScheduler;
use casevault_session::progress::CaseStatus;
use casevault_session::session::{ArchiveSession, lock_session};
use casevault_test_support::{RecordingUnlockSink, fixed_clock, mini_pack};


fn session() -> ArchiveSession {
    ArchiveSession::new(Uuid::new_v4(), fixed_clock().now())
}

fn tick_until_settled(session: &mut ArchiveSession) {
    let generation = session.reveal_generation();
    while session.advance_reveal(generation) {}
}

#[test]
fn test_open_case_one_starts_revealing() {
    let pack = mini_pack();
    let mut session = session();

    session.open_case(&pack, CaseId(1)).unwrap();
    match session.render().unwrap() {
        RenderState::Revealing { case_id, revealed_text, .. } => {
            assert_eq!(case_id, CaseId(1));
            assert_eq!(revealed_text, "");
        }
        other => panic!("expected Revealing, got {other:?}"),
    }
}

#[test]
fn test_locked_case_cannot_be_opened() {
    let pack = mini_pack();
    let mut session = session();

    match session.open_case(&pack, CaseId(2)).unwrap_err() {
        DomainError::CaseLocked(id) => assert_eq!(id, CaseId(2)),
        other => panic!("expected CaseLocked, got {other:?}"),
    }
    assert_eq!(session.render().unwrap(), RenderState::Idle);
}

#[test]
fn test_unknown_case_is_rejected() {
    let pack = mini_pack();
    let mut session = session();
    assert!(matches!(
        session.open_case(&pack, CaseId(99)),
        Err(DomainError::UnknownCase(_))
    ));
}

#[test]
fn test_complete_case_unlocks_the_next_and_records_reward() {
    let pack = mini_pack();
    let sink = RecordingUnlockSink::default();
    let mut session = session();

    session.open_case(&pack, CaseId(1)).unwrap();
    tick_until_settled(&mut session);
    session.select_choice(0).unwrap();
    tick_until_settled(&mut session);

    let completed = session.acknowledge_ending(&sink).unwrap();
    assert_eq!(completed.case_id, CaseId(1));
    assert_eq!(completed.unlock_reward, "Field Reports");

    assert_eq!(session.status_of(CaseId(1)), CaseStatus::Completed);
    assert_eq!(session.status_of(CaseId(2)), CaseStatus::Available);
    assert_eq!(session.completed_count(), 1);
    assert_eq!(session.unlocked_rewards(), ["Field Reports"]);
    assert_eq!(sink.completions().len(), 1);

    // The second case is now playable.
    session.open_case(&pack, CaseId(2)).unwrap();
}

#[test]
fn test_acknowledging_twice_never_duplicates_progress() {
    let pack = mini_pack();
    let sink = RecordingUnlockSink::default();
    let mut session = session();

    for _ in 0..2 {
        session.open_case(&pack, CaseId(1)).unwrap();
        tick_until_settled(&mut session);
        session.select_choice(0).unwrap();
        tick_until_settled(&mut session);
        session.acknowledge_ending(&sink).unwrap();
    }

    assert_eq!(session.completed_count(), 1);
    assert_eq!(session.unlocked_rewards(), ["Field Reports"]);
    assert_eq!(sink.completions().len(), 2);
}

#[test]
fn test_abort_does_not_complete() {
    let pack = mini_pack();
    let mut session = session();

    session.open_case(&pack, CaseId(1)).unwrap();
    session.abort().unwrap();

    assert_eq!(session.render().unwrap(), RenderState::Idle);
    assert_eq!(session.completed_count(), 0);
    assert_eq!(session.status_of(CaseId(2)), CaseStatus::Locked);
}

#[test]
fn test_stale_generation_ticks_are_ignored() {
    let pack = mini_pack();
    let mut session = session();

    session.open_case(&pack, CaseId(1)).unwrap();
    let stale = session.reveal_generation();
    session.open_case(&pack, CaseId(1)).unwrap();

    assert!(!session.advance_reveal(stale));
    match session.render().unwrap() {
        RenderState::Revealing { revealed_text, .. } => assert_eq!(revealed_text, ""),
        other => panic!("expected Revealing, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn test_armed_reveal_ticks_to_completion_under_the_timer() {
    let pack = mini_pack();
    let scheduler = RevealScheduler::from_chars_per_second(100);
    let slot = std::sync::Arc::new(Mutex::new(session()));

    {
        let mut session = lock_session(&slot);
        session.open_case(&pack, CaseId(1)).unwrap();
        session.arm_reveal(&scheduler, std::sync::Arc::downgrade(&slot));
    }

    // "OPEN FILE." is 10 characters.
    tokio::time::sleep(scheduler.period() * 30).await;
    match lock_session(&slot).render().unwrap() {
        RenderState::AwaitingChoice { text, .. } => assert_eq!(text, "OPEN FILE."),
        other => panic!("expected AwaitingChoice, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn test_abort_cancels_a_running_reveal() {
    let pack = mini_pack();
    let scheduler = RevealScheduler::from_chars_per_second(100);
    let slot = std::sync::Arc::new(Mutex::new(session()));

    {
        let mut session = lock_session(&slot);
        session.open_case(&pack, CaseId(1)).unwrap();
        session.arm_reveal(&scheduler, std::sync::Arc::downgrade(&slot));
    }
    tokio::time::sleep(scheduler.period() * 3 + scheduler.period() / 2).await;
    lock_session(&slot).abort().unwrap();

    tokio::time::sleep(scheduler.period() * 30).await;
    assert_eq!(lock_session(&slot).render().unwrap(), RenderState::Idle);
}
