//! End-to-end gating passes over real storage.
//!
//! Wires the SQLite registry and the file-backed ledger to a scripted
//! platform, then drives a user through the full subscribe flow.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use turnstile_bot::GateEngine;
use turnstile_core::{
    InviteIssuer, JoinRequestLedger, LinkError, MembershipProbe, MembershipStatus,
    NewSubscriptionTarget,
};
use turnstile_persistence::{connect_in_memory, FileLedger, SqliteSubscriptionRegistry};

/// Scripted platform: membership per chat is mutable mid-test.
#[derive(Default)]
struct ScriptedPlatform {
    statuses: Mutex<HashMap<String, MembershipStatus>>,
}

impl ScriptedPlatform {
    fn set_status(&self, chat_ref: &str, status: MembershipStatus) {
        self.statuses
            .lock()
            .unwrap()
            .insert(chat_ref.to_string(), status);
    }
}

#[async_trait]
impl MembershipProbe for ScriptedPlatform {
    async fn probe(&self, chat_ref: &str, _user_id: i64) -> MembershipStatus {
        self.statuses
            .lock()
            .unwrap()
            .get(chat_ref)
            .copied()
            .unwrap_or(MembershipStatus::Left)
    }
}

#[async_trait]
impl InviteIssuer for ScriptedPlatform {
    async fn create_join_request_link(&self, chat_ref: &str) -> Result<String, LinkError> {
        Ok(format!("https://t.me/+invite-{chat_ref}"))
    }
}

struct Fixture {
    platform: Arc<ScriptedPlatform>,
    ledger: Arc<FileLedger>,
    engine: GateEngine,
    _dir: tempfile::TempDir,
}

async fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();

    let pool = connect_in_memory().await.unwrap();
    let registry = SqliteSubscriptionRegistry::new(pool);
    registry
        .insert(&NewSubscriptionTarget::open("@news", "https://t.me/news"))
        .await
        .unwrap();
    registry
        .insert(&NewSubscriptionTarget::closed("-100500", "https://t.me/+static"))
        .await
        .unwrap();

    let ledger = Arc::new(
        FileLedger::open(dir.path().join("requests.json"))
            .await
            .unwrap(),
    );
    let platform = Arc::new(ScriptedPlatform::default());

    let engine = GateEngine::new(
        Arc::new(registry),
        ledger.clone(),
        platform.clone(),
        platform.clone(),
    );

    Fixture {
        platform,
        ledger,
        engine,
        _dir: dir,
    }
}

#[tokio::test]
async fn first_pass_emits_both_links_and_records_the_request() {
    let fx = fixture().await;

    let links = fx.engine.unsubscribed_links(1).await.unwrap();

    assert_eq!(
        links,
        vec!["https://t.me/news", "https://t.me/+invite--100500"]
    );
    assert!(fx.ledger.has(1, "-100500").await.unwrap());
}

#[tokio::test]
async fn second_pass_suppresses_the_pending_invite() {
    let fx = fixture().await;

    fx.engine.unsubscribed_links(1).await.unwrap();
    let links = fx.engine.unsubscribed_links(1).await.unwrap();

    // Still unsubscribed everywhere, but the closed chat already has a
    // pending request on file.
    assert_eq!(links, vec!["https://t.me/news"]);
}

#[tokio::test]
async fn joining_everything_clears_the_result_but_not_the_ledger() {
    let fx = fixture().await;

    fx.engine.unsubscribed_links(1).await.unwrap();

    fx.platform.set_status("@news", MembershipStatus::Member);
    fx.platform.set_status("-100500", MembershipStatus::Member);

    let links = fx.engine.unsubscribed_links(1).await.unwrap();
    assert!(links.is_empty());

    // Stale records are caller-cleaned, never engine-cleaned.
    assert!(fx.ledger.has(1, "-100500").await.unwrap());
}

#[tokio::test]
async fn ledger_survives_process_restart() {
    let fx = fixture().await;
    let path = fx._dir.path().join("requests.json");

    fx.engine.unsubscribed_links(1).await.unwrap();

    let reopened = FileLedger::open(&path).await.unwrap();
    assert!(reopened.has(1, "-100500").await.unwrap());
}

#[tokio::test]
async fn distinct_users_are_gated_independently() {
    let fx = fixture().await;

    fx.engine.unsubscribed_links(1).await.unwrap();
    let links = fx.engine.unsubscribed_links(2).await.unwrap();

    // User 2's pass generates its own invite; user 1's pending record
    // does not leak across users.
    assert_eq!(
        links,
        vec!["https://t.me/news", "https://t.me/+invite--100500"]
    );
    assert!(fx.ledger.has(1, "-100500").await.unwrap());
    assert!(fx.ledger.has(2, "-100500").await.unwrap());
}
