use crate::profile::CandidateProfile;
use crate::session_state::{ConnectionId, Session};
use dashmap::DashMap;

/// In-memory map from connection to interview session.
///
/// Each operation is atomic per key. The store lives as long as its owner
/// (the server's shared state); nothing is persisted.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<ConnectionId, Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a fresh session, replacing any existing one for the connection.
    pub fn create(&self, connection_id: ConnectionId, profile: CandidateProfile) -> Session {
        let session = Session::new(connection_id, profile);
        if self
            .sessions
            .insert(connection_id, session.clone())
            .is_some()
        {
            tracing::debug!(%connection_id, "Replaced existing session");
        }
        session
    }

    /// Returns a snapshot of the session, if any.
    pub fn get(&self, connection_id: &ConnectionId) -> Option<Session> {
        self.sessions.get(connection_id).map(|s| s.value().clone())
    }

    /// Runs `f` against the live session while holding its entry lock.
    pub fn with_session_mut<T>(
        &self,
        connection_id: &ConnectionId,
        f: impl FnOnce(&mut Session) -> T,
    ) -> Option<T> {
        self.sessions
            .get_mut(connection_id)
            .map(|mut entry| f(entry.value_mut()))
    }

    /// Removes the session. Returns whether one existed.
    pub fn delete(&self, connection_id: &ConnectionId) -> bool {
        self.sessions.remove(connection_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
