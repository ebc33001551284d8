//! Shared configuration for Turnstile.
//!
//! Provides functions to locate the bot's state directory and the files
//! under it.
//!
//! # Storage Structure
//!
//! All application data is stored under `~/.turnstile/`:
//!
//! ```text
//! ~/.turnstile/
//! ├── turnstile.db      # SQLite database (registry, users)
//! ├── requests.json     # Join-request ledger
//! └── config/           # User configuration files
//! ```
//!
//! # Environment Variables
//!
//! - `TURNSTILE_STATE_DIR`: Override the base state directory
//! - `TURNSTILE_DB_PATH`: Override the database path
//! - `TURNSTILE_LEDGER_PATH`: Override the join-request ledger path

use std::path::PathBuf;
use std::sync::OnceLock;

/// Environment variable for custom state directory.
pub const STATE_DIR_ENV: &str = "TURNSTILE_STATE_DIR";

/// Environment variable for custom database path.
pub const DB_PATH_ENV: &str = "TURNSTILE_DB_PATH";

/// Environment variable for custom ledger path.
pub const LEDGER_PATH_ENV: &str = "TURNSTILE_LEDGER_PATH";

/// Default state directory name under home.
const DEFAULT_STATE_DIR: &str = ".turnstile";

const CONFIG_SUBDIR: &str = "config";
const DB_FILE: &str = "turnstile.db";
const LEDGER_FILE: &str = "requests.json";

static STATE_DIR_CACHE: OnceLock<PathBuf> = OnceLock::new();

/// Get the Turnstile state directory.
///
/// The state directory is determined by:
/// 1. `TURNSTILE_STATE_DIR` environment variable if set
/// 2. `~/.turnstile` if home directory is available
/// 3. `.turnstile` in current directory as fallback
pub fn state_dir() -> PathBuf {
    STATE_DIR_CACHE
        .get_or_init(|| {
            std::env::var(STATE_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|_| {
                    dirs::home_dir()
                        .map(|h| h.join(DEFAULT_STATE_DIR))
                        .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR))
                })
        })
        .clone()
}

/// Get the SQLite database path.
///
/// Defaults to `~/.turnstile/turnstile.db` or `TURNSTILE_DB_PATH` env var.
pub fn db_path() -> PathBuf {
    std::env::var(DB_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| state_dir().join(DB_FILE))
}

/// Get the join-request ledger path.
///
/// Defaults to `~/.turnstile/requests.json` or `TURNSTILE_LEDGER_PATH`
/// env var.
pub fn ledger_path() -> PathBuf {
    std::env::var(LEDGER_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| state_dir().join(LEDGER_FILE))
}

/// Get the user config directory.
pub fn config_dir() -> PathBuf {
    state_dir().join(CONFIG_SUBDIR)
}

/// Get the .env.local file path.
///
/// Environment file for secrets (the bot token).
pub fn env_file() -> PathBuf {
    config_dir().join(".env.local")
}

/// Ensure the state directory and config subdirectory exist.
///
/// # Errors
/// Returns an error if any directory cannot be created.
pub fn ensure_all_dirs() -> std::io::Result<()> {
    std::fs::create_dir_all(state_dir())?;
    std::fs::create_dir_all(config_dir())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // These tests use environment variables which can't be isolated in
    // parallel test execution, so they verify file/dir names rather
    // than full paths.

    #[test]
    fn test_state_dir_shape() {
        let dir = state_dir();
        assert!(dir.is_absolute() || dir.ends_with(".turnstile"));
    }

    #[test]
    fn test_db_path_name() {
        let path = db_path();
        assert!(path.to_string_lossy().ends_with(".db"));
    }

    #[test]
    fn test_ledger_path_name() {
        let path = ledger_path();
        assert!(path.to_string_lossy().ends_with(".json"));
    }

    #[test]
    fn test_env_file_name() {
        let file = env_file();
        assert!(file.ends_with(".env.local"));
    }
}
