//! # In-memory adapters
//!
//! Session-scoped stand-ins for a backend. Nothing here outlives the process.

mod ads;
mod ledger;
mod otp;
mod users;

use std::sync::Arc;

pub use ads::InMemoryAdRepository;
pub use ledger::InMemoryLedger;
pub use otp::InMemoryOtpStore;
pub use users::InMemoryUserRepository;

use crate::seed::SeedData;

/// Every in-memory repository, wired once and shared by the services.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    pub ads: Arc<InMemoryAdRepository>,
    pub users: Arc<InMemoryUserRepository>,
    pub ledger: Arc<InMemoryLedger>,
    pub otp: Arc<InMemoryOtpStore>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(seed: SeedData) -> Self {
        tracing::info!(
            users = seed.users.len(),
            ads = seed.ads.len(),
            "seeding in-memory store"
        );
        Self {
            ads: Arc::new(InMemoryAdRepository::with_ads(seed.ads)),
            users: Arc::new(InMemoryUserRepository::with_users(seed.users)),
            ..Self::default()
        }
    }
}
