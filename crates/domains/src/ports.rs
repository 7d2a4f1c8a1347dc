//! # Ports
//!
//! Any adapter must implement these traits to be wired into the services.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::SecretString;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Ad, User, WatchRecord, Withdrawal};

/// Ad persistence contract. `list` returns ads in insertion order.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait AdRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Ad>>;
    async fn get(&self, id: Uuid) -> Result<Option<Ad>>;
    async fn insert(&self, ad: Ad) -> Result<()>;
    /// Replaces the stored ad with the same id.
    async fn update(&self, ad: Ad) -> Result<()>;
    async fn delete(&self, id: Uuid) -> Result<Option<Ad>>;
}

/// User directory contract.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Every user, oldest first (ties broken by id).
    async fn list(&self) -> Result<Vec<User>>;
    async fn get(&self, id: Uuid) -> Result<Option<User>>;
    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn insert(&self, user: User) -> Result<()>;
    async fn update(&self, user: User) -> Result<()>;
}

/// Append-only money movements: rewards earned and withdrawals requested.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait LedgerRepository: Send + Sync {
    /// Appends the record. `Conflict` if the viewer already has one for the
    /// ad; the check and the append happen under one write.
    async fn record_watch(&self, record: WatchRecord) -> Result<()>;
    async fn watches(&self) -> Result<Vec<WatchRecord>>;
    async fn watches_for(&self, viewer_id: Uuid) -> Result<Vec<WatchRecord>>;
    /// Appends the withdrawal. `Validation` if the amount exceeds the user's
    /// balance at the moment of writing.
    async fn record_withdrawal(&self, withdrawal: Withdrawal) -> Result<()>;
    async fn withdrawals(&self) -> Result<Vec<Withdrawal>>;
    async fn withdrawals_for(&self, user_id: Uuid) -> Result<Vec<Withdrawal>>;
}

/// A pending login code. Only the hash of the code is kept.
#[derive(Debug, Clone, PartialEq)]
pub struct OtpChallenge {
    pub phone: String,
    pub code_hash: String,
    pub expires_at: DateTime<Utc>,
}

/// Holds at most one live challenge per phone number.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait OtpStore: Send + Sync {
    /// Stores the challenge, replacing any earlier one for the same phone.
    async fn put(&self, challenge: OtpChallenge) -> Result<()>;
    /// Removes and returns the challenge for `phone`.
    async fn take(&self, phone: &str) -> Result<Option<OtpChallenge>>;
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait OtpHasher: Send + Sync {
    fn hash(&self, code: &SecretString) -> Result<String>;
    fn verify(&self, code: &str, hash: &str) -> bool;
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait OtpCodeGenerator: Send + Sync {
    fn generate(&self) -> SecretString;
}

/// Delivers a login code to the phone (SMS in a real deployment).
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait OtpSender: Send + Sync {
    async fn send(&self, phone: &str, code: &SecretString) -> Result<()>;
}
