//! Durable join-request ledger.
//!
//! A flat set of `(user_id, chat_ref)` pairs persisted as one JSON
//! document. Every mutation rewrites the whole document atomically, so
//! the in-memory set and the file never diverge; the mutex serializes
//! concurrent gating passes. No await happens while the lock is held.

use std::collections::HashSet;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{info, warn};

use turnstile_core::{JoinRequestLedger, StorageError};

use crate::atomic::{atomic_write_json, read_json_optional};

/// One persisted pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
struct LedgerEntry {
    user_id: i64,
    chat_ref: String,
}

/// File-backed implementation of [`JoinRequestLedger`].
pub struct FileLedger {
    path: PathBuf,
    entries: Mutex<HashSet<(i64, String)>>,
}

impl FileLedger {
    /// Opens the ledger at `path`, loading any existing document.
    ///
    /// A missing file starts an empty ledger. A document that fails to
    /// parse is logged and replaced on the next write rather than
    /// blocking startup.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();

        let entries = match read_json_optional::<Vec<LedgerEntry>>(&path) {
            Ok(Some(list)) => {
                let set: HashSet<(i64, String)> =
                    list.into_iter().map(|e| (e.user_id, e.chat_ref)).collect();
                info!(count = set.len(), path = %path.display(), "Loaded join-request ledger");
                set
            }
            Ok(None) => HashSet::new(),
            Err(StorageError::Serialize(e)) => {
                warn!(error = %e, path = %path.display(), "Join-request ledger is corrupt, starting empty");
                HashSet::new()
            }
            Err(e) => return Err(e),
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Number of live records.
    pub async fn count(&self) -> usize {
        self.entries.lock().await.len()
    }

    fn persist(&self, entries: &HashSet<(i64, String)>) -> Result<(), StorageError> {
        let mut list: Vec<LedgerEntry> = entries
            .iter()
            .map(|(user_id, chat_ref)| LedgerEntry {
                user_id: *user_id,
                chat_ref: chat_ref.clone(),
            })
            .collect();
        list.sort_by(|a, b| (a.user_id, &a.chat_ref).cmp(&(b.user_id, &b.chat_ref)));
        atomic_write_json(&self.path, &list)
    }
}

#[async_trait]
impl JoinRequestLedger for FileLedger {
    async fn has(&self, user_id: i64, chat_ref: &str) -> Result<bool, StorageError> {
        let entries = self.entries.lock().await;
        Ok(entries.contains(&(user_id, chat_ref.to_string())))
    }

    async fn add(&self, user_id: i64, chat_ref: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().await;
        if entries.insert((user_id, chat_ref.to_string())) {
            self.persist(&entries)?;
        }
        Ok(())
    }

    async fn remove(&self, user_id: i64, chat_ref: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().await;
        if entries.remove(&(user_id, chat_ref.to_string())) {
            self.persist(&entries)?;
        }
        Ok(())
    }
}
