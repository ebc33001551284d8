//! Core domain types for Turnstile.
//!
//! This crate provides the fundamental data types used throughout the
//! bot: subscription targets, membership statuses, users, and the
//! collaborator traits the gating engine is written against.

pub mod config;
pub mod error;
pub mod i18n;
pub mod membership;
pub mod target;
pub mod traits;
pub mod user;

// Re-export main types
pub use error::{LinkError, StorageError};
pub use membership::MembershipStatus;
pub use target::{NewSubscriptionTarget, SubscriptionTarget};
pub use traits::{InviteIssuer, JoinRequestLedger, MembershipProbe, SubscriptionRegistry};
pub use user::{NewUser, User};
