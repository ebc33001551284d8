//! Subscription-gated Telegram bot.
//!
//! Every inbound interaction runs through a gating pass: the bot
//! probes the user's membership in each required chat and, when
//! anything is outstanding, answers with a subscribe prompt instead of
//! invoking the downstream handler. Open chats get their static public
//! link; closed chats get a freshly generated, approval-gated invite
//! link tracked in the join-request ledger.
//!
//! # Environment Variables
//!
//! Required:
//! - `TELEGRAM_BOT_TOKEN`: Bot token from @BotFather
//!
//! Optional:
//! - `TURNSTILE_STATE_DIR`: Base state directory (default `~/.turnstile`)
//! - `TURNSTILE_DB_PATH`: SQLite database path
//! - `TURNSTILE_LEDGER_PATH`: Join-request ledger path
//!
//! # Commands
//!
//! - `/start` - Register, greet, and show outstanding subscriptions
//! - `/help` - Show available commands
//! - `/id` - Show the current chat's id (works in groups and channels)

pub mod bot;
pub mod error;
pub mod gate;
pub mod handlers;
pub mod keyboards;
pub mod middleware;
pub mod probe;
pub mod state;

pub use bot::TurnstileBot;
pub use error::{BotError, Result};
pub use gate::GateEngine;
pub use probe::TelegramChats;
pub use state::AppState;
