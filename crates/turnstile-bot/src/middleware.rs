//! Access guards invoked at the top of every handler.

use teloxide::prelude::*;
use teloxide::types::{ChatId, User as TgUser};
use tracing::{error, info};

use turnstile_core::i18n::{text, Text};

use crate::keyboards::subscribe_keyboard;
use crate::state::AppState;

/// Runs the gating pass for the interacting user.
///
/// Returns `true` when the downstream handler may run. Otherwise the
/// user has already been answered: with the subscribe prompt when links
/// are outstanding, or with a generic retry message when storage is
/// unreachable — access is never granted on a failed pass.
pub async fn check_access(
    bot: &Bot,
    state: &AppState,
    user: &TgUser,
    chat_id: ChatId,
) -> ResponseResult<bool> {
    let lang = user.language_code.as_deref();

    match state.gate.unsubscribed_links(user.id.0 as i64).await {
        Ok(links) if links.is_empty() => Ok(true),
        Ok(links) => {
            info!(user_id = %user.id, pending = links.len(), "Blocking user behind subscribe prompt");
            bot.send_message(chat_id, text(lang, Text::SubscribePrompt))
                .reply_markup(subscribe_keyboard(&links, lang))
                .await?;
            Ok(false)
        }
        Err(e) => {
            error!(user_id = %user.id, error = %e, "Gating pass failed, refusing access");
            bot.send_message(chat_id, text(lang, Text::TryAgainLater))
                .await?;
            Ok(false)
        }
    }
}

/// Restricts interactive commands to private chats.
///
/// Sends a localized warning and returns `false` elsewhere.
pub async fn require_private(bot: &Bot, msg: &Message) -> ResponseResult<bool> {
    if msg.chat.is_private() {
        return Ok(true);
    }

    let lang = msg
        .from
        .as_ref()
        .and_then(|u| u.language_code.as_deref());
    bot.send_message(msg.chat.id, text(lang, Text::PrivateOnly))
        .await?;
    Ok(false)
}
