//! Turnstile bot binary.
//!
//! Start the bot with:
//! ```bash
//! TELEGRAM_BOT_TOKEN=xxx cargo run -p turnstile-bot
//! ```

use std::sync::Arc;

use clap::Parser;
use teloxide::Bot;
use tracing_subscriber::EnvFilter;

use turnstile_bot::{AppState, BotError, GateEngine, TelegramChats, TurnstileBot};
use turnstile_core::config;
use turnstile_core::{InviteIssuer, JoinRequestLedger, MembershipProbe, SubscriptionRegistry};
use turnstile_persistence::{connect, FileLedger, SqliteSubscriptionRegistry, SqliteUserStore};

/// Turnstile - a subscription-gated Telegram bot
#[derive(Parser, Debug)]
#[command(name = "turnstile-bot")]
#[command(about = "Telegram bot that gates access behind channel subscriptions")]
struct Args {
    /// Verbose logging (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load environment variables from the config directory first
    let env_path = config::env_file();
    if env_path.exists() {
        let _ = dotenvy::from_path(&env_path);
    }
    // Also try a local .env for development setups
    let _ = dotenvy::dotenv();

    // Initialize logging based on verbosity
    let filter = match args.verbose {
        0 => "turnstile_bot=info,turnstile_persistence=info,teloxide=warn",
        1 => "turnstile_bot=debug,turnstile_persistence=debug,teloxide=info",
        2 => "turnstile_bot=trace,turnstile_persistence=trace,teloxide=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = config::ensure_all_dirs() {
        tracing::warn!(error = %e, "Failed to create state directories");
    }

    // Storage
    let pool = connect(config::db_path()).await?;
    let ledger: Arc<FileLedger> = Arc::new(FileLedger::open(config::ledger_path()).await?);

    // The bot client is owned here and injected into everything that
    // talks to the platform.
    let token = std::env::var("TELEGRAM_BOT_TOKEN").map_err(|_| BotError::NoToken)?;
    let bot = Bot::new(token);

    let chats = Arc::new(TelegramChats::new(bot.clone()));
    let registry: Arc<dyn SubscriptionRegistry> =
        Arc::new(SqliteSubscriptionRegistry::new(pool.clone()));
    let gate_ledger: Arc<dyn JoinRequestLedger> = ledger.clone();
    let probe: Arc<dyn MembershipProbe> = chats.clone();
    let issuer: Arc<dyn InviteIssuer> = chats;

    let gate = GateEngine::new(registry, gate_ledger.clone(), probe, issuer);
    let state = AppState::new(gate, SqliteUserStore::new(pool), gate_ledger);

    let app = TurnstileBot::new(bot, state);

    match app.get_me().await {
        Ok(username) => {
            tracing::info!(username = %username, "Bot initialized successfully");
            println!("\nTurnstile Bot");
            println!("   Bot: @{}", username);
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to get bot info");
            return Err(e.into());
        }
    }

    println!("\nOpen Telegram and send /start to begin");
    println!("   Press Ctrl+C to stop\n");

    app.start_polling().await?;

    Ok(())
}
