//! Shared application state.

use std::sync::Arc;

use casevault_content::pack::CasePack;
use casevault_core::clock::Clock;
use casevault_playback::reveal::RevealScheduler;
use casevault_session::registry::SessionRegistry;
use casevault_session::session::UnlockSink;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The loaded, validated case pack.
    pub pack: Arc<CasePack>,
    /// In-memory session registry.
    pub registry: Arc<SessionRegistry>,
    /// Time source for session timestamps.
    pub clock: Arc<dyn Clock>,
    /// Cadence for reveal timers armed by playback handlers.
    pub scheduler: RevealScheduler,
    /// Notified whenever a session completes a case.
    pub unlock_sink: Arc<dyn UnlockSink>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        pack: Arc<CasePack>,
        registry: Arc<SessionRegistry>,
        clock: Arc<dyn Clock>,
        scheduler: RevealScheduler,
        unlock_sink: Arc<dyn UnlockSink>,
    ) -> Self {
        Self {
            pack,
            registry,
            clock,
            scheduler,
            unlock_sink,
        }
    }
}
