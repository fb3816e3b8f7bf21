//! Session store port: keyed storage and lifecycle of conversation state.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::OwnedMutexGuard;

use crate::domain::foundation::SessionId;
use crate::domain::session::Session;

/// Session storage failures.
///
/// `NotFound` is deliberately its own variant so callers can surface a
/// missing session distinctly from infrastructure failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionStoreError {
    #[error("session not found: {0}")]
    NotFound(SessionId),
}

/// Port for session storage.
///
/// The reference adapter is an in-memory map; the trait exists so a durable
/// backend can be injected without touching the orchestrator.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Creates and stores a fresh session, returning a copy.
    async fn create(&self) -> Session;

    /// Loads a session copy by id.
    async fn get(&self, id: SessionId) -> Result<Session, SessionStoreError>;

    /// Persists a session, refreshing its update timestamp.
    async fn update(&self, session: Session) -> Result<(), SessionStoreError>;

    /// Acquires this session's turn lock.
    ///
    /// Turns against the same session id must not interleave; the
    /// orchestrator holds the returned guard for the whole
    /// load-run-persist transaction. Turns against different ids are
    /// independent.
    async fn turn_lock(&self, id: SessionId) -> Result<OwnedMutexGuard<()>, SessionStoreError>;

    /// Removes sessions idle for longer than `ttl_secs`, returning how many
    /// were evicted.
    async fn evict_idle(&self, ttl_secs: i64) -> usize;
}
