//! Batch sessions
//!
//! Items that need a caller decision (a replacement SKU or a conflict choice)
//! are staged in a [`BatchSession`] keyed by their index in the batch. Sessions
//! live in a [`SessionRegistry`] until resolved or expired.

use chrono::{DateTime, Duration, Utc};
use skulink_core::models::{PendingConflict, PendingRename, UploadItem};
use std::collections::{BTreeMap, HashMap};
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Unknown or expired batch: {0}")]
    UnknownBatch(Uuid),

    #[error("Resolve pending renames before resolving conflicts")]
    RenamesOutstanding,
}

/// Staged state of one batch
#[derive(Debug, Clone)]
pub struct BatchSession {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    renames: BTreeMap<usize, PendingRename>,
    conflicts: BTreeMap<usize, PendingConflict>,
    items: HashMap<usize, UploadItem>,
}

impl BatchSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            renames: BTreeMap::new(),
            conflicts: BTreeMap::new(),
            items: HashMap::new(),
        }
    }

    pub fn stage_rename(&mut self, item: UploadItem, pending: PendingRename) {
        self.items.insert(pending.index, item);
        self.renames.insert(pending.index, pending);
    }

    pub fn stage_conflict(&mut self, item: UploadItem, pending: PendingConflict) {
        self.items.insert(pending.index, item);
        self.conflicts.insert(pending.index, pending);
    }

    /// Remove a pending rename together with its staged item
    pub fn take_rename(&mut self, index: usize) -> Option<(PendingRename, UploadItem)> {
        let pending = self.renames.remove(&index)?;
        let item = self.items.remove(&index)?;
        Some((pending, item))
    }

    /// Remove a pending conflict together with its staged item
    pub fn take_conflict(&mut self, index: usize) -> Option<(PendingConflict, UploadItem)> {
        let pending = self.conflicts.remove(&index)?;
        let item = self.items.remove(&index)?;
        Some((pending, item))
    }

    pub fn pending_renames(&self) -> Vec<PendingRename> {
        self.renames.values().cloned().collect()
    }

    pub fn pending_conflicts(&self) -> Vec<PendingConflict> {
        self.conflicts.values().cloned().collect()
    }

    pub fn has_pending_renames(&self) -> bool {
        !self.renames.is_empty()
    }

    pub fn is_resolved(&self) -> bool {
        self.renames.is_empty() && self.conflicts.is_empty()
    }

    pub fn is_expired(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        now - self.created_at > ttl
    }
}

impl Default for BatchSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Open batch sessions, expiring after a fixed time-to-live
pub struct SessionRegistry {
    ttl: Duration,
    sessions: Mutex<HashMap<Uuid, BatchSession>>,
}

impl SessionRegistry {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_secs(ttl_secs: u64) -> Self {
        Self::new(Duration::seconds(ttl_secs.min(i64::MAX as u64 / 1000) as i64))
    }

    /// Store a session; resolved sessions are dropped instead.
    pub async fn insert(&self, session: BatchSession) {
        if session.is_resolved() {
            return;
        }
        self.sessions.lock().await.insert(session.id, session);
    }

    /// Take a session out for resolution. Expired sessions are purged first.
    pub async fn take(&self, id: Uuid) -> Result<BatchSession, SessionError> {
        let mut sessions = self.sessions.lock().await;
        let now = Utc::now();
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(self.ttl, now));
        let purged = before - sessions.len();
        if purged > 0 {
            tracing::debug!(purged, "Expired batch sessions purged");
        }
        sessions.remove(&id).ok_or(SessionError::UnknownBatch(id))
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }
}
