//! Platform adapter: membership probing and invite-link creation.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ChatId, ChatMemberStatus, Recipient, UserId};
use tracing::warn;

use turnstile_core::{InviteIssuer, LinkError, MembershipProbe, MembershipStatus};

/// Display name attached to generated join-request links.
const INVITE_LINK_NAME: &str = "Join via bot approval";

/// Telegram-backed implementation of [`MembershipProbe`] and
/// [`InviteIssuer`].
#[derive(Clone)]
pub struct TelegramChats {
    bot: Bot,
}

impl TelegramChats {
    /// Create a new adapter over an injected bot client.
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

/// Parses a stored `chat_ref` into an addressable recipient.
///
/// Numeric refs (`-1001234…`) address the chat by id; anything else is
/// treated as a public handle, with the `@` prefix added if missing.
fn recipient(chat_ref: &str) -> Recipient {
    if let Ok(id) = chat_ref.parse::<i64>() {
        Recipient::Id(ChatId(id))
    } else if chat_ref.starts_with('@') {
        Recipient::ChannelUsername(chat_ref.to_string())
    } else {
        Recipient::ChannelUsername(format!("@{chat_ref}"))
    }
}

/// Classifies the platform's member status into the domain set.
fn classify(status: ChatMemberStatus) -> MembershipStatus {
    match status {
        ChatMemberStatus::Owner => MembershipStatus::Creator,
        ChatMemberStatus::Administrator => MembershipStatus::Administrator,
        ChatMemberStatus::Member => MembershipStatus::Member,
        ChatMemberStatus::Restricted => MembershipStatus::Restricted,
        ChatMemberStatus::Left => MembershipStatus::Left,
        ChatMemberStatus::Banned => MembershipStatus::Kicked,
    }
}

#[async_trait]
impl MembershipProbe for TelegramChats {
    async fn probe(&self, chat_ref: &str, user_id: i64) -> MembershipStatus {
        match self
            .bot
            .get_chat_member(recipient(chat_ref), UserId(user_id as u64))
            .await
        {
            Ok(member) => classify(member.status()),
            Err(e) => {
                // Unreachable probe reads as not-subscribed downstream.
                warn!(chat_ref = %chat_ref, user_id = %user_id, error = %e, "Membership probe failed");
                MembershipStatus::Unknown
            }
        }
    }
}

#[async_trait]
impl InviteIssuer for TelegramChats {
    async fn create_join_request_link(&self, chat_ref: &str) -> Result<String, LinkError> {
        self.bot
            .create_chat_invite_link(recipient(chat_ref))
            .name(INVITE_LINK_NAME.to_string())
            .creates_join_request(true)
            .await
            .map(|link| link.invite_link)
            .map_err(|e| LinkError::new(chat_ref, e.to_string()))
    }
}
