//! In-memory session store.
//!
//! Keyed map behind an async RwLock, plus one mutex per session id to
//! serialize whole conversation turns. Sessions live for the process
//! lifetime unless the idle-TTL sweep evicts them.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

use crate::domain::foundation::{SessionId, Timestamp};
use crate::domain::session::Session;
use crate::ports::{SessionStore, SessionStoreError};

/// In-memory storage for conversation sessions.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, Session>>>,
    turn_locks: Arc<Mutex<HashMap<SessionId, Arc<Mutex<()>>>>>,
}

impl InMemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions (useful for tests and the eviction log).
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    async fn lock_for(&self, id: SessionId) -> Arc<Mutex<()>> {
        let mut locks = self.turn_locks.lock().await;
        locks.entry(id).or_default().clone()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self) -> Session {
        let session = Session::new();
        self.sessions
            .write()
            .await
            .insert(session.id(), session.clone());
        session
    }

    async fn get(&self, id: SessionId) -> Result<Session, SessionStoreError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(SessionStoreError::NotFound(id))
    }

    async fn update(&self, mut session: Session) -> Result<(), SessionStoreError> {
        session.touch();
        self.sessions.write().await.insert(session.id(), session);
        Ok(())
    }

    async fn turn_lock(&self, id: SessionId) -> Result<OwnedMutexGuard<()>, SessionStoreError> {
        if !self.sessions.read().await.contains_key(&id) {
            return Err(SessionStoreError::NotFound(id));
        }
        let lock = self.lock_for(id).await;
        Ok(lock.lock_owned().await)
    }

    async fn evict_idle(&self, ttl_secs: i64) -> usize {
        let cutoff = Timestamp::now().minus_seconds(ttl_secs);
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| session.updated_at() > cutoff);
        let evicted = before - sessions.len();

        if evicted > 0 {
            let mut locks = self.turn_locks.lock().await;
            locks.retain(|id, _| sessions.contains_key(id));
            tracing::debug!(evicted, remaining = sessions.len(), "evicted idle sessions");
        }

        evicted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::ConversationStage;
    use std::time::Duration;

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let store = InMemorySessionStore::new();
        let created = store.create().await;

        let loaded = store.get(created.id()).await.unwrap();
        assert_eq!(loaded.id(), created.id());
        assert_eq!(loaded.stage(), ConversationStage::DataCollection);
    }

    #[tokio::test]
    async fn get_unknown_id_is_a_typed_not_found() {
        let store = InMemorySessionStore::new();
        let id = SessionId::new();

        let result = store.get(id).await;
        assert_eq!(result, Err(SessionStoreError::NotFound(id)));
    }

    #[tokio::test]
    async fn update_refreshes_the_timestamp() {
        let store = InMemorySessionStore::new();
        let session = store.create().await;
        let before = session.updated_at();

        store.update(session.clone()).await.unwrap();

        let loaded = store.get(session.id()).await.unwrap();
        assert!(loaded.updated_at() >= before);
    }

    #[tokio::test]
    async fn update_persists_stage_changes() {
        let store = InMemorySessionStore::new();
        let mut session = store.create().await;
        session.advance_stage().unwrap();

        store.update(session.clone()).await.unwrap();

        let loaded = store.get(session.id()).await.unwrap();
        assert_eq!(loaded.stage(), ConversationStage::Analysis);
    }

    #[tokio::test]
    async fn turn_lock_on_unknown_id_is_not_found() {
        let store = InMemorySessionStore::new();
        let id = SessionId::new();
        assert!(matches!(
            store.turn_lock(id).await,
            Err(SessionStoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn turn_lock_serializes_same_session() {
        let store = InMemorySessionStore::new();
        let session = store.create().await;
        let id = session.id();

        let guard = store.turn_lock(id).await.unwrap();

        // A second lock attempt must block while the guard is held.
        let store2 = store.clone();
        let second = tokio::spawn(async move { store2.turn_lock(id).await.unwrap() });
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!second.is_finished());

        drop(guard);
        second.await.unwrap();
    }

    #[tokio::test]
    async fn turn_locks_on_different_sessions_are_independent() {
        let store = InMemorySessionStore::new();
        let first = store.create().await;
        let second = store.create().await;

        let _guard = store.turn_lock(first.id()).await.unwrap();
        // Locking a different session must not block.
        let other = tokio::time::timeout(
            Duration::from_millis(100),
            store.turn_lock(second.id()),
        )
        .await
        .expect("independent session lock should not block");
        assert!(other.is_ok());
    }

    #[tokio::test]
    async fn evict_idle_removes_only_stale_sessions() {
        let store = InMemorySessionStore::new();
        let stale = store.create().await;
        let fresh = store.create().await;

        // Only sessions idle longer than the TTL go away; with a generous
        // TTL nothing is evicted.
        assert_eq!(store.evict_idle(3600).await, 0);
        assert_eq!(store.session_count().await, 2);

        // A zero TTL makes everything stale.
        tokio::time::sleep(Duration::from_millis(5)).await;
        assert_eq!(store.evict_idle(0).await, 2);
        assert!(store.get(stale.id()).await.is_err());
        assert!(store.get(fresh.id()).await.is_err());
    }
}
