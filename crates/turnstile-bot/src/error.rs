//! Error types for the bot binary.

use thiserror::Error;
use turnstile_core::StorageError;

/// Errors that can occur while bootstrapping or running the bot.
#[derive(Debug, Error)]
pub enum BotError {
    /// Bot token not provided.
    #[error("Telegram bot token not set. Set TELEGRAM_BOT_TOKEN environment variable.")]
    NoToken,

    /// Failed to start the bot.
    #[error("Failed to start bot: {0}")]
    BotStartFailed(String),

    /// Storage layer failure.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type for bot operations.
pub type Result<T> = std::result::Result<T, BotError>;
