//! Session registry: id-keyed slot stores with TTL and turn-cap eviction
//!
//! Eviction is lazy: expired entries are dropped when the map is next
//! touched, so no background sweeper task is needed. Callers hold the
//! registry behind a `tokio::sync::Mutex`, which also serializes turns on
//! the same session.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::dialogue::slots::SlotStore;

struct SessionEntry {
    store: SlotStore,
    last_active: Instant,
}

/// Outcome of admitting one more turn on a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnAdmission {
    Admitted,
    /// Turn cap reached; the session has been evicted
    LimitReached,
}

/// In-memory store of live ordering sessions
pub struct SessionRegistry {
    sessions: HashMap<String, SessionEntry>,
    ttl: Duration,
    max_turns: u32,
}

impl SessionRegistry {
    #[must_use]
    pub fn new(ttl: Duration, max_turns: u32) -> Self {
        Self {
            sessions: HashMap::new(),
            ttl,
            max_turns,
        }
    }

    fn evict_expired(&mut self) {
        let ttl = self.ttl;
        let before = self.sessions.len();
        self.sessions
            .retain(|_, entry| entry.last_active.elapsed() < ttl);
        let evicted = before - self.sessions.len();
        if evicted > 0 {
            tracing::debug!(evicted, live = self.sessions.len(), "expired sessions dropped");
        }
    }

    /// Look up an existing session or start a fresh one
    ///
    /// `None` or an unknown/expired id yields a new session with a generated
    /// id. Returns the effective id and the store.
    pub fn get_or_create(&mut self, id: Option<&str>) -> (String, &mut SlotStore) {
        self.evict_expired();

        let id = match id {
            Some(id) if self.sessions.contains_key(id) => id.to_string(),
            _ => {
                let id = Uuid::new_v4().to_string();
                tracing::info!(session = %id, "session started");
                id
            }
        };

        let entry = self.sessions.entry(id.clone()).or_insert_with(|| SessionEntry {
            store: SlotStore::new(),
            last_active: Instant::now(),
        });
        entry.last_active = Instant::now();
        (id, &mut entry.store)
    }

    /// Read-only view of a session, never creates
    #[must_use]
    pub fn peek(&mut self, id: &str) -> Option<&SlotStore> {
        self.evict_expired();
        self.sessions.get(id).map(|entry| &entry.store)
    }

    /// Count one more turn against the session's cap
    ///
    /// On `LimitReached` the session is gone; the caller answers with the
    /// closing line and stops processing.
    pub fn begin_turn(&mut self, id: &str) -> TurnAdmission {
        let Some(entry) = self.sessions.get_mut(id) else {
            return TurnAdmission::LimitReached;
        };
        entry.store.turn_count += 1;
        if entry.store.turn_count > self.max_turns {
            self.sessions.remove(id);
            tracing::info!(session = %id, "turn limit reached, session closed");
            return TurnAdmission::LimitReached;
        }
        entry.last_active = Instant::now();
        TurnAdmission::Admitted
    }

    /// Mutable access to a live session's store, never creates
    pub fn store_mut(&mut self, id: &str) -> Option<&mut SlotStore> {
        let entry = self.sessions.get_mut(id)?;
        entry.last_active = Instant::now();
        Some(&mut entry.store)
    }

    /// Drop a session explicitly
    pub fn remove(&mut self, id: &str) -> bool {
        self.sessions.remove(id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
