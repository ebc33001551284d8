//! Error types shared across the storage and gating layers.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from the registry, ledger, or user store.
///
/// A storage failure is fatal to a gating pass: the engine cannot safely
/// decide "user is compliant" without its collaborators, so these surface
/// to the caller instead of being recovered locally.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database query or connection failure.
    #[error("database error: {0}")]
    Database(String),

    /// Failed to read from the file system.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write to the file system.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create a directory.
    #[error("failed to create directory {path}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON (de)serialization failure.
    #[error("failed to serialize: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Row not found.
    #[error("{kind} not found: {id}")]
    NotFound { kind: String, id: String },
}

/// Failure to create a join-request invite link.
///
/// Recovered locally by the gating engine: the target is logged and
/// omitted from that pass, never aborting the pass.
#[derive(Debug, Error)]
#[error("could not create invite link for {chat_ref}: {message}")]
pub struct LinkError {
    pub chat_ref: String,
    pub message: String,
}

impl LinkError {
    pub fn new(chat_ref: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            chat_ref: chat_ref.into(),
            message: message.into(),
        }
    }
}
