//! SessionManager: per-session wizard snapshots in a concurrent map.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use tracing::{debug, info};
use uuid::Uuid;

use metlab_core::config::defaults::DEFAULT_SESSION_CAPACITY;
use metlab_core::errors::SessionError;

use super::snapshot::SessionSnapshot;
use crate::wizard::Wizard;

#[derive(Debug, Clone)]
struct StoredSession {
    /// Serialized envelope, as a browser session store would hold it.
    payload: String,
    last_activity: DateTime<Utc>,
}

/// Thread-safe store of wizard sessions keyed by session id.
///
/// When full, saving a new session evicts the least recently touched one.
pub struct SessionManager {
    sessions: Arc<DashMap<String, StoredSession>>,
    capacity: usize,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_SESSION_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            capacity: capacity.max(1),
        }
    }

    /// Starts a fresh wizard under a new id.
    pub fn create_session(&self) -> Result<String, SessionError> {
        let session_id = Uuid::new_v4().to_string();
        self.save(&session_id, &Wizard::new())?;
        Ok(session_id)
    }

    pub fn save(&self, session_id: &str, wizard: &Wizard) -> Result<(), SessionError> {
        self.save_snapshot(session_id, &wizard.snapshot())
    }

    pub fn save_snapshot(&self, session_id: &str, snapshot: &SessionSnapshot) -> Result<(), SessionError> {
        let payload = snapshot.to_json()?;
        self.store_payload(session_id, payload);
        Ok(())
    }

    /// Stores an already-serialized envelope, e.g. one carried over from an
    /// older client. It is validated on load, not here.
    pub fn store_payload(&self, session_id: &str, payload: String) {
        if !self.sessions.contains_key(session_id) && self.sessions.len() >= self.capacity {
            self.evict_oldest();
        }
        self.sessions.insert(
            session_id.to_string(),
            StoredSession {
                payload,
                last_activity: Utc::now(),
            },
        );
    }

    pub fn load_snapshot(&self, session_id: &str) -> Result<SessionSnapshot, SessionError> {
        let payload = match self.sessions.get_mut(session_id) {
            Some(mut entry) => {
                entry.last_activity = Utc::now();
                entry.payload.clone()
            }
            None => {
                return Err(SessionError::NotFound {
                    session_id: session_id.to_string(),
                })
            }
        };
        SessionSnapshot::from_json(&payload)
    }

    pub fn load(&self, session_id: &str) -> Result<Wizard, SessionError> {
        self.load_snapshot(session_id).map(Wizard::from_snapshot)
    }

    /// Start Over: drops the saved state. Returns whether anything was saved.
    pub fn clear(&self, session_id: &str) -> bool {
        let removed = self.sessions.remove(session_id).is_some();
        if removed {
            debug!(session_id, "session cleared");
        }
        removed
    }

    /// Removes sessions idle for longer than `max_idle`.
    pub fn cleanup_idle(&self, max_idle: Duration) -> usize {
        let cutoff = Utc::now() - max_idle;
        let before = self.sessions.len();
        self.sessions.retain(|_, s| s.last_activity >= cutoff);
        let removed = before.saturating_sub(self.sessions.len());
        if removed > 0 {
            info!(removed, "idle sessions removed");
        }
        removed
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn session_ids(&self) -> Vec<String> {
        self.sessions.iter().map(|r| r.key().clone()).collect()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn evict_oldest(&self) {
        let oldest = self
            .sessions
            .iter()
            .min_by_key(|r| r.value().last_activity)
            .map(|r| r.key().clone());
        if let Some(id) = oldest {
            self.sessions.remove(&id);
            debug!(session_id = %id, "session evicted at capacity");
        }
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}
