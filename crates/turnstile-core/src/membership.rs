//! Membership status classification.
//!
//! Statuses mirror what the platform reports for a (chat, user) pair.
//! `Unknown` is produced only when the probe itself failed; the gating
//! engine treats it as not-subscribed.

use serde::{Deserialize, Serialize};

/// Membership status of a user in a chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipStatus {
    /// Regular member of the chat.
    Member,
    /// Administrator of the chat.
    Administrator,
    /// Owner of the chat.
    Creator,
    /// In the chat but with restricted permissions.
    Restricted,
    /// Not in the chat (never joined or left).
    Left,
    /// Banned from the chat.
    Kicked,
    /// The probe failed; no reliable signal.
    Unknown,
}

impl MembershipStatus {
    /// Whether this status satisfies a subscription requirement.
    ///
    /// Only full membership counts. `Restricted` users are in the chat
    /// but do not satisfy the requirement, matching how the platform
    /// treats them for channel subscriptions.
    pub fn is_compliant(self) -> bool {
        matches!(
            self,
            MembershipStatus::Member | MembershipStatus::Administrator | MembershipStatus::Creator
        )
    }

    /// Whether this status came from a failed probe.
    pub fn is_unknown(self) -> bool {
        matches!(self, MembershipStatus::Unknown)
    }
}

impl std::fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MembershipStatus::Member => "member",
            MembershipStatus::Administrator => "administrator",
            MembershipStatus::Creator => "creator",
            MembershipStatus::Restricted => "restricted",
            MembershipStatus::Left => "left",
            MembershipStatus::Kicked => "kicked",
            MembershipStatus::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compliant_statuses() {
        assert!(MembershipStatus::Member.is_compliant());
        assert!(MembershipStatus::Administrator.is_compliant());
        assert!(MembershipStatus::Creator.is_compliant());
    }

    #[test]
    fn test_non_compliant_statuses() {
        assert!(!MembershipStatus::Restricted.is_compliant());
        assert!(!MembershipStatus::Left.is_compliant());
        assert!(!MembershipStatus::Kicked.is_compliant());
        assert!(!MembershipStatus::Unknown.is_compliant());
    }

    #[test]
    fn test_unknown_flag() {
        assert!(MembershipStatus::Unknown.is_unknown());
        assert!(!MembershipStatus::Left.is_unknown());
    }
}
