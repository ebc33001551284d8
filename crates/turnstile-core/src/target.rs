//! Subscription target types.
//!
//! A target identifies one chat a user must join before the bot serves
//! them. Open targets carry a static public link; closed targets require
//! a bot-generated join-request invite link instead.

use serde::{Deserialize, Serialize};

/// One chat a user must join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionTarget {
    /// Database-assigned identifier.
    pub id: i64,

    /// Platform chat identifier: a numeric id (`-100…`) or a public
    /// `@handle`. Immutable once created.
    pub chat_ref: String,

    /// Link a human can follow to join. For closed targets this is a
    /// fallback; the engine generates a per-request link instead.
    pub join_link: String,

    /// Whether the chat is publicly joinable (no approval step).
    pub is_open: bool,

    /// Inactive targets are skipped by the gating engine.
    pub is_active: bool,
}

/// Payload for creating a new subscription target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSubscriptionTarget {
    pub chat_ref: String,
    pub join_link: String,
    pub is_open: bool,
}

impl NewSubscriptionTarget {
    /// Creates an open target: anyone can join via the public link.
    pub fn open(chat_ref: impl Into<String>, join_link: impl Into<String>) -> Self {
        Self {
            chat_ref: chat_ref.into(),
            join_link: join_link.into(),
            is_open: true,
        }
    }

    /// Creates a closed target: joining requires bot-mediated approval.
    pub fn closed(chat_ref: impl Into<String>, join_link: impl Into<String>) -> Self {
        Self {
            chat_ref: chat_ref.into(),
            join_link: join_link.into(),
            is_open: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_target_constructors() {
        let open = NewSubscriptionTarget::open("@channel", "https://t.me/channel");
        assert!(open.is_open);
        assert_eq!(open.chat_ref, "@channel");

        let closed = NewSubscriptionTarget::closed("-1001234", "https://t.me/+abc");
        assert!(!closed.is_open);
        assert_eq!(closed.join_link, "https://t.me/+abc");
    }
}
