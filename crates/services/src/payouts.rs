//! Withdrawals of earned rewards to a bank account or UPI ID.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use domains::{
    round_money, DomainError, LedgerRepository, PayoutMethod, Result, UserRepository, Withdrawal,
};
use uuid::Uuid;

use crate::access::load_user;
use crate::validation::validate_payout_method;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayoutPolicy {
    pub min_withdrawal: f64,
}

impl Default for PayoutPolicy {
    fn default() -> Self {
        Self {
            min_withdrawal: 100.0,
        }
    }
}

pub struct PayoutService {
    users: Arc<dyn UserRepository>,
    ledger: Arc<dyn LedgerRepository>,
    policy: PayoutPolicy,
}

impl PayoutService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        ledger: Arc<dyn LedgerRepository>,
        policy: PayoutPolicy,
    ) -> Self {
        Self {
            users,
            ledger,
            policy,
        }
    }

    #[tracing::instrument(skip(self, method))]
    pub async fn withdraw(
        &self,
        user_id: Uuid,
        amount: f64,
        method: PayoutMethod,
        now: DateTime<Utc>,
    ) -> Result<Withdrawal> {
        if !(amount.is_finite() && amount > 0.0) {
            return Err(DomainError::Validation(
                "amount must be positive".to_string(),
            ));
        }
        let amount = round_money(amount);
        if amount < self.policy.min_withdrawal {
            return Err(DomainError::Validation(format!(
                "minimum withdrawal is {:.2}",
                self.policy.min_withdrawal
            )));
        }
        validate_payout_method(&method)?;
        load_user(self.users.as_ref(), user_id).await?;

        let withdrawal = Withdrawal {
            id: Uuid::now_v7(),
            user_id,
            amount,
            method,
            requested_at: now,
        };
        // The ledger checks the balance and appends under one write.
        if let Err(err) = self.ledger.record_withdrawal(withdrawal.clone()).await {
            tracing::warn!(%err, "withdrawal refused");
            return Err(err);
        }

        tracing::info!("withdrawal requested");
        Ok(withdrawal)
    }

    pub async fn history(&self, user_id: Uuid) -> Result<Vec<Withdrawal>> {
        self.ledger.withdrawals_for(user_id).await
    }
}
