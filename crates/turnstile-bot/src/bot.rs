//! Dispatcher wiring and the polling loop.

use std::sync::Arc;

use teloxide::dispatching::UpdateFilterExt;
use teloxide::prelude::*;
use teloxide::types::ChatJoinRequest;
use tracing::{debug, info};

use crate::error::{BotError, Result};
use crate::handlers::{
    handle_callback, handle_command, handle_join_request, handle_message, Command,
};
use crate::state::AppState;

/// The subscription-gating Telegram bot.
pub struct TurnstileBot {
    /// The teloxide bot instance, constructed by the entry point.
    bot: Bot,
    /// Shared state across handlers.
    state: Arc<AppState>,
}

impl TurnstileBot {
    /// Create a new bot over an injected client and shared state.
    pub fn new(bot: Bot, state: Arc<AppState>) -> Self {
        Self { bot, state }
    }

    /// Get the bot's username.
    pub async fn get_me(&self) -> Result<String> {
        let me = self
            .bot
            .get_me()
            .await
            .map_err(|e| BotError::BotStartFailed(e.to_string()))?;
        Ok(me.username().to_string())
    }

    /// Start the bot in long-polling mode.
    pub async fn start_polling(&self) -> Result<()> {
        info!("Starting bot in polling mode...");

        let state_for_join_requests = Arc::clone(&self.state);
        let state_for_commands = Arc::clone(&self.state);
        let state_for_callbacks = Arc::clone(&self.state);
        let state_for_messages = Arc::clone(&self.state);

        let handler = dptree::entry()
            .branch(Update::filter_chat_join_request().endpoint(
                move |req: ChatJoinRequest| {
                    let state = Arc::clone(&state_for_join_requests);
                    async move { handle_join_request(req, state).await }
                },
            ))
            .branch(Update::filter_callback_query().endpoint(
                move |bot: Bot, q: CallbackQuery| {
                    let state = Arc::clone(&state_for_callbacks);
                    async move { handle_callback(bot, q, state).await }
                },
            ))
            .branch(
                Update::filter_message()
                    .filter_command::<Command>()
                    .endpoint(move |bot: Bot, msg: Message, cmd: Command| {
                        let state = Arc::clone(&state_for_commands);
                        debug!(chat_id = %msg.chat.id, "Command matched: {:?}", cmd);
                        async move { handle_command(bot, msg, cmd, state).await }
                    }),
            )
            .branch(
                Update::filter_message()
                    .filter(|msg: Message| {
                        // Non-command traffic is echoed only in private
                        // chats; group chatter is left alone.
                        msg.chat.is_private()
                            && msg.text().map(|t| !t.starts_with('/')).unwrap_or(true)
                    })
                    .endpoint(move |bot: Bot, msg: Message| {
                        let state = Arc::clone(&state_for_messages);
                        async move { handle_message(bot, msg, state).await }
                    }),
            );

        info!("Bot is running! Send /start to begin.");

        Dispatcher::builder(self.bot.clone(), handler)
            .default_handler(|upd| async move {
                debug!("Unhandled update: {:?}", upd);
            })
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        Ok(())
    }
}
