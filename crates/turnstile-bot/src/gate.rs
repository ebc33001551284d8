//! The gating engine.
//!
//! Given a user, decides which required chats they still have to act on
//! and returns the links for them, in registry order: open targets
//! first, then closed ones. An empty result means the user may proceed.

use std::sync::Arc;

use tracing::{debug, warn};

use turnstile_core::{
    InviteIssuer, JoinRequestLedger, MembershipProbe, StorageError, SubscriptionRegistry,
};

/// Orchestrates the registry, prober, ledger, and invite issuer.
pub struct GateEngine {
    registry: Arc<dyn SubscriptionRegistry>,
    ledger: Arc<dyn JoinRequestLedger>,
    probe: Arc<dyn MembershipProbe>,
    issuer: Arc<dyn InviteIssuer>,
}

impl GateEngine {
    /// Create a new engine over its four collaborators.
    pub fn new(
        registry: Arc<dyn SubscriptionRegistry>,
        ledger: Arc<dyn JoinRequestLedger>,
        probe: Arc<dyn MembershipProbe>,
        issuer: Arc<dyn InviteIssuer>,
    ) -> Self {
        Self {
            registry,
            ledger,
            probe,
            issuer,
        }
    }

    /// Links the user must still act on, in registry order.
    ///
    /// Membership checks fail closed: an unreachable probe counts as
    /// not-subscribed. Invite-link failures are logged and that target
    /// is omitted from this pass, so one broken chat never blocks
    /// gating for the rest. Only a storage failure aborts the pass.
    pub async fn unsubscribed_links(&self, user_id: i64) -> Result<Vec<String>, StorageError> {
        let mut links = Vec::new();

        for target in self.registry.list_active(true).await? {
            let status = self.probe.probe(&target.chat_ref, user_id).await;
            if status.is_compliant() {
                continue;
            }
            debug!(chat_ref = %target.chat_ref, %status, user_id, "Open target unsatisfied");
            links.push(target.join_link);
        }

        for target in self.registry.list_active(false).await? {
            let status = self.probe.probe(&target.chat_ref, user_id).await;
            if status.is_compliant() {
                // A stale pending record for a now-member stays on file;
                // cleanup is the caller's concern.
                continue;
            }

            // A pending request suppresses a fresh invite — unless the
            // probe failed, in which case pending state is no more
            // trustworthy than membership state.
            if !status.is_unknown() && self.ledger.has(user_id, &target.chat_ref).await? {
                debug!(chat_ref = %target.chat_ref, user_id, "Join request already pending");
                continue;
            }

            match self.issuer.create_join_request_link(&target.chat_ref).await {
                Ok(link) => {
                    self.ledger.add(user_id, &target.chat_ref).await?;
                    links.push(link);
                }
                Err(e) => {
                    warn!(chat_ref = %target.chat_ref, error = %e, "Invite link generation failed");
                }
            }
        }

        Ok(links)
    }
}
