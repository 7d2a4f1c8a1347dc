//! # DomainError
//!
//! Centralized error handling for the marketplace.
//! Maps domain-specific failures to actionable error types.

use thiserror::Error;

use crate::models::AdStatus;

/// The primary error type for all domain and service operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Resource not found (e.g., Ad, User)
    #[error("{entity} not found with ID {id}")]
    NotFound { entity: &'static str, id: String },

    /// Validation failure (e.g., blank title, malformed IFSC code)
    #[error("validation error: {0}")]
    Validation(String),

    /// Identity failure (e.g., wrong or expired OTP)
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The actor exists but its role or ownership does not allow the action
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Moderation moved an ad to a status it cannot take from where it is
    #[error("cannot move ad from {from} to {to}")]
    InvalidTransition { from: AdStatus, to: AdStatus },

    /// Resource already exists (e.g., duplicate phone number)
    #[error("conflict: {0}")]
    Conflict(String),

    /// Adapter failure (e.g., hashing backend error)
    #[error("internal service error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn insufficient_balance(available: f64) -> Self {
        Self::Validation(format!("insufficient balance: {available:.2} available"))
    }
}

/// A specialized Result type for marketplace logic.
pub type Result<T> = std::result::Result<T, DomainError>;
