//! Collaborator traits the gating engine is written against.
//!
//! Storage lives in `turnstile-persistence`; the platform adapter lives
//! in the bot crate. Tests substitute in-memory implementations.

use async_trait::async_trait;

use crate::error::{LinkError, StorageError};
use crate::membership::MembershipStatus;
use crate::target::SubscriptionTarget;

/// Catalog of required chats.
#[async_trait]
pub trait SubscriptionRegistry: Send + Sync {
    /// Active targets with the given openness, in insertion order.
    async fn list_active(&self, is_open: bool) -> Result<Vec<SubscriptionTarget>, StorageError>;
}

/// Durable set of outstanding join requests, keyed by (user, chat).
///
/// All three operations are idempotent: `add` on a present pair and
/// `remove` on an absent pair are no-ops.
#[async_trait]
pub trait JoinRequestLedger: Send + Sync {
    /// True iff a live record exists for the pair.
    async fn has(&self, user_id: i64, chat_ref: &str) -> Result<bool, StorageError>;

    /// Records the pair. No-op if already present.
    async fn add(&self, user_id: i64, chat_ref: &str) -> Result<(), StorageError>;

    /// Deletes the pair. No-op if absent.
    async fn remove(&self, user_id: i64, chat_ref: &str) -> Result<(), StorageError>;
}

/// Queries the platform for a user's membership in a chat.
#[async_trait]
pub trait MembershipProbe: Send + Sync {
    /// Classifies the user's membership in the chat.
    ///
    /// Never fails: transport-level errors are logged by the
    /// implementation and reported as [`MembershipStatus::Unknown`].
    async fn probe(&self, chat_ref: &str, user_id: i64) -> MembershipStatus;
}

/// Creates approval-gated invite links for closed chats.
#[async_trait]
pub trait InviteIssuer: Send + Sync {
    /// Requests a join-request invite link scoped to the chat.
    async fn create_join_request_link(&self, chat_ref: &str) -> Result<String, LinkError>;
}
