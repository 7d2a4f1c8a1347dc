//! # auth-adapters
//!
//! Argon2-based implementations of the OTP ports.
//! Handles code generation, salted code hashing and code delivery.

mod codes;
mod hasher;
mod sender;

pub use codes::OsRngCodeGenerator;
pub use hasher::Argon2OtpHasher;
pub use sender::{mask_phone, LogOtpSender, OutboxOtpSender};
