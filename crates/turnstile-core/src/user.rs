//! Persisted user types.
//!
//! Users are recorded on first contact. The gating engine never reads
//! them; they exist for the surrounding bot (admin flags, block flags).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user known to the bot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Database-assigned identifier.
    pub id: i64,

    /// Telegram user id.
    pub tg_id: i64,

    /// Telegram username or display name at registration time.
    pub username: String,

    /// Admin privileges within the bot.
    pub is_admin: bool,

    /// Whether the bot refuses to serve this user.
    pub is_chat_blocked: bool,

    /// When the user first contacted the bot.
    pub registered_at: DateTime<Utc>,
}

/// Payload for registering a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub tg_id: i64,
    pub username: String,
}

impl NewUser {
    pub fn new(tg_id: i64, username: impl Into<String>) -> Self {
        Self {
            tg_id,
            username: username.into(),
        }
    }
}
