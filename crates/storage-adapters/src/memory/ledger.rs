use async_trait::async_trait;
use domains::{ledger_balance, DomainError, LedgerRepository, Result, WatchRecord, Withdrawal};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct Book {
    watches: Vec<WatchRecord>,
    withdrawals: Vec<Withdrawal>,
}

/// Both lists sit behind one lock so a write sees the balance it changes.
#[derive(Default)]
pub struct InMemoryLedger {
    book: RwLock<Book>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LedgerRepository for InMemoryLedger {
    async fn record_watch(&self, record: WatchRecord) -> Result<()> {
        let mut book = self.book.write().await;
        if book
            .watches
            .iter()
            .any(|w| w.viewer_id == record.viewer_id && w.ad_id == record.ad_id)
        {
            return Err(DomainError::Conflict(
                "reward for this ad was already claimed".to_string(),
            ));
        }
        book.watches.push(record);
        Ok(())
    }

    async fn watches(&self) -> Result<Vec<WatchRecord>> {
        Ok(self.book.read().await.watches.clone())
    }

    async fn watches_for(&self, viewer_id: Uuid) -> Result<Vec<WatchRecord>> {
        Ok(self
            .book
            .read()
            .await
            .watches
            .iter()
            .filter(|w| w.viewer_id == viewer_id)
            .cloned()
            .collect())
    }

    async fn record_withdrawal(&self, withdrawal: Withdrawal) -> Result<()> {
        let mut book = self.book.write().await;
        let available = ledger_balance(withdrawal.user_id, &book.watches, &book.withdrawals);
        if withdrawal.amount > available {
            return Err(DomainError::insufficient_balance(available));
        }
        book.withdrawals.push(withdrawal);
        Ok(())
    }

    async fn withdrawals(&self) -> Result<Vec<Withdrawal>> {
        Ok(self.book.read().await.withdrawals.clone())
    }

    async fn withdrawals_for(&self, user_id: Uuid) -> Result<Vec<Withdrawal>> {
        Ok(self
            .book
            .read()
            .await
            .withdrawals
            .iter()
            .filter(|w| w.user_id == user_id)
            .cloned()
            .collect())
    }
}
