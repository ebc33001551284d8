//! Shared state for the bot, accessible across all handlers.

use std::sync::Arc;

use turnstile_core::JoinRequestLedger;
use turnstile_persistence::SqliteUserStore;

use crate::gate::GateEngine;

/// State shared by every handler.
pub struct AppState {
    /// The gating engine consulted on every inbound interaction.
    pub gate: GateEngine,
    /// Persisted users (registered on /start).
    pub users: SqliteUserStore,
    /// Join-request ledger, also written by the join-request handler.
    pub ledger: Arc<dyn JoinRequestLedger>,
}

impl AppState {
    /// Create the shared state.
    pub fn new(
        gate: GateEngine,
        users: SqliteUserStore,
        ledger: Arc<dyn JoinRequestLedger>,
    ) -> Arc<Self> {
        Arc::new(Self {
            gate,
            users,
            ledger,
        })
    }
}
