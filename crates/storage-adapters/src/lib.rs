//! # storage-adapters
//!
//! In-memory implementations of the `domains` repository ports and the demo
//! dataset they are seeded from.

pub mod memory;
pub mod seed;

pub use memory::{
    InMemoryAdRepository, InMemoryLedger, InMemoryOtpStore, InMemoryStore,
    InMemoryUserRepository,
};
pub use seed::SeedData;
