use crate::application::ApplicationResult;
use crate::application::dto::SessionData;
use crate::application::ports::{ClockPort, session::SessionStore};
use crate::infrastructure::time::SystemClock;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

struct Entry {
    data: SessionData,
    last_seen: DateTime<Utc>,
}

/// Process-local session storage.
///
/// With a TTL, a session expires once it has been neither loaded nor saved for that
/// long. Every load or save restarts the idle window, and every save sweeps out all
/// expired sessions so abandoned ones do not accumulate.
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<String, Entry>>,
    ttl: Option<Duration>,
    clock: Arc<ClockPort>,
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl: None,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_ttl(ttl: Duration, clock: Arc<ClockPort>) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl: Some(ttl),
            clock,
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Entry>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn expired(&self, entry: &Entry, now: DateTime<Utc>) -> bool {
        self.ttl.is_some_and(|ttl| {
            chrono::Duration::from_std(ttl).is_ok_and(|ttl| entry.last_seen + ttl <= now)
        })
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, session_id: &str) -> ApplicationResult<Option<SessionData>> {
        let now = self.clock.now();
        let mut guard = self.lock();
        match guard.get_mut(session_id) {
            Some(entry) if self.expired(entry, now) => {
                guard.remove(session_id);
                tracing::debug!("session expired");
                Ok(None)
            }
            Some(entry) => {
                entry.last_seen = now;
                Ok(Some(entry.data.clone()))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, session_id: &str, data: SessionData) -> ApplicationResult<()> {
        let now = self.clock.now();
        let mut guard = self.lock();

        let before = guard.len();
        guard.retain(|_, entry| !self.expired(entry, now));
        let swept = before - guard.len();
        if swept > 0 {
            tracing::debug!(swept, "expired sessions removed");
        }

        guard.insert(
            session_id.to_string(),
            Entry {
                data,
                last_seen: now,
            },
        );
        Ok(())
    }

    async fn destroy(&self, session_id: &str) -> ApplicationResult<()> {
        self.lock().remove(session_id);
        Ok(())
    }
}
