//! Command and update handlers.

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::ChatJoinRequest;
use teloxide::utils::command::BotCommands;
use tracing::{error, info, warn};

use turnstile_core::i18n::{text, Text};
use turnstile_core::NewUser;

use crate::keyboards::subscribe_keyboard;
use crate::middleware::{check_access, require_private};
use crate::state::AppState;

/// Bot commands that can be invoked with /.
#[derive(BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "Start the bot")]
    Start,

    #[command(description = "Show help message")]
    Help,

    #[command(description = "Show this chat's id")]
    Id,
}

/// Dispatches a parsed command.
pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    match cmd {
        // /id works everywhere and is never gated: it is how admins
        // discover chat_ref values for channels the bot sits in.
        Command::Id => {
            bot.send_message(msg.chat.id, msg.chat.id.to_string())
                .await?;
            Ok(())
        }
        Command::Start => {
            if !require_private(&bot, &msg).await? {
                return Ok(());
            }
            handle_start(bot, msg, state).await
        }
        Command::Help => {
            if !require_private(&bot, &msg).await? {
                return Ok(());
            }
            let Some(user) = msg.from.clone() else {
                return Ok(());
            };
            if !check_access(&bot, &state, &user, msg.chat.id).await? {
                return Ok(());
            }
            bot.send_message(msg.chat.id, Command::descriptions().to_string())
                .await?;
            Ok(())
        }
    }
}

/// Handle the /start command.
///
/// Registers the user and greets them; when subscriptions are
/// outstanding, the greeting itself carries the subscribe keyboard
/// instead of a separate blocking prompt.
pub async fn handle_start(bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(user) = msg.from.clone() else {
        return Ok(());
    };
    let lang = user.language_code.as_deref();

    let display_name = user
        .username
        .as_ref()
        .map(|u| format!("@{u}"))
        .unwrap_or_else(|| user.full_name());

    if let Err(e) = state
        .users
        .upsert(&NewUser::new(user.id.0 as i64, display_name.trim_start_matches('@')))
        .await
    {
        warn!(user_id = %user.id, error = %e, "Could not register user");
    }

    match state.gate.unsubscribed_links(user.id.0 as i64).await {
        Ok(links) if links.is_empty() => {
            bot.send_message(
                msg.chat.id,
                format!("{}, {}!", text(lang, Text::Greeting), display_name),
            )
            .await?;
        }
        Ok(links) => {
            let greeting = format!(
                "{}, {}!\n{}",
                text(lang, Text::Greeting),
                display_name,
                text(lang, Text::SubscribePrompt)
            );
            bot.send_message(msg.chat.id, greeting)
                .reply_markup(subscribe_keyboard(&links, lang))
                .await?;
        }
        Err(e) => {
            error!(user_id = %user.id, error = %e, "Gating pass failed on /start");
            bot.send_message(msg.chat.id, text(lang, Text::TryAgainLater))
                .await?;
        }
    }

    info!(chat_id = %msg.chat.id, user = %display_name, "User started bot");
    Ok(())
}

/// Handle a gated non-command message: copy it back to the sender.
pub async fn handle_message(bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(user) = msg.from.clone() else {
        return Ok(());
    };

    if !check_access(&bot, &state, &user, msg.chat.id).await? {
        return Ok(());
    }

    bot.copy_message(msg.chat.id, msg.chat.id, msg.id).await?;
    Ok(())
}

/// Handle a callback query: same gate as messages, then acknowledge.
pub async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    if let Some(message) = &q.message {
        let allowed = check_access(&bot, &state, &q.from, message.chat().id).await?;
        if allowed {
            info!(user_id = %q.from.id, data = ?q.data, "Callback accepted");
        }
    }

    // Always acknowledge so the client stops its spinner.
    bot.answer_callback_query(q.id).await?;
    Ok(())
}

/// Handle a chat-join-request event: remember the pending pair so the
/// next gating pass does not spam a fresh invite.
pub async fn handle_join_request(req: ChatJoinRequest, state: Arc<AppState>) -> ResponseResult<()> {
    let user_id = req.from.id.0 as i64;
    let chat_ref = req.chat.id.to_string();

    match state.ledger.add(user_id, &chat_ref).await {
        Ok(()) => {
            info!(user_id, chat_ref = %chat_ref, "Recorded join request");
        }
        Err(e) => {
            error!(user_id, chat_ref = %chat_ref, error = %e, "Could not record join request");
        }
    }

    Ok(())
}
