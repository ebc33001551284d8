//! Storage layer for Turnstile.
//!
//! The subscription registry and user store live in SQLite behind a
//! pooled async connection; the join-request ledger is a durable JSON
//! document rewritten atomically (write to temp file, then rename) under
//! an async mutex.
//!
//! # Example
//!
//! ```no_run
//! use turnstile_persistence::{connect, FileLedger, SqliteSubscriptionRegistry};
//! use turnstile_core::SubscriptionRegistry;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = connect("turnstile.db").await?;
//! let registry = SqliteSubscriptionRegistry::new(pool);
//! let open_targets = registry.list_active(true).await?;
//!
//! let ledger = FileLedger::open("requests.json").await?;
//! # Ok(())
//! # }
//! ```

pub mod atomic;
pub mod db;
pub mod error;
pub mod ledger;
pub mod registry;
pub mod users;

pub use db::{connect, connect_in_memory, init_schema};
pub use ledger::FileLedger;
pub use registry::SqliteSubscriptionRegistry;
pub use users::SqliteUserStore;
