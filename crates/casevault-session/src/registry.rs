//! In-memory session registry.
//!
//! Sessions live for the process; there is deliberately no persistence
//! behind this map.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tracing::info;
use uuid::Uuid;

use casevault_core::clock::Clock;
use casevault_core::error::DomainError;

use crate::session::ArchiveSession;

/// Registry of live sessions, keyed by session id.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, Arc<Mutex<ArchiveSession>>>>,
}

impl SessionRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fresh session and returns its id and shared slot.
    pub fn create(&self, clock: &dyn Clock) -> (Uuid, Arc<Mutex<ArchiveSession>>) {
        let id = Uuid::new_v4();
        let slot = Arc::new(Mutex::new(ArchiveSession::new(id, clock.now())));
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, Arc::clone(&slot));
        info!(session_id = %id, "session created");
        (id, slot)
    }

    /// Looks up a session by id.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::SessionNotFound` for an unknown id.
    pub fn get(&self, id: Uuid) -> Result<Arc<Mutex<ArchiveSession>>, DomainError> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
            .ok_or(DomainError::SessionNotFound(id))
    }

    /// Number of live sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the registry holds no sessions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
