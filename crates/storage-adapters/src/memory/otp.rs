use async_trait::async_trait;
use dashmap::DashMap;
use domains::{OtpChallenge, OtpStore, Result};

/// One live challenge per phone; a new request overwrites the old one.
#[derive(Default)]
pub struct InMemoryOtpStore {
    challenges: DashMap<String, OtpChallenge>,
}

impl InMemoryOtpStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OtpStore for InMemoryOtpStore {
    async fn put(&self, challenge: OtpChallenge) -> Result<()> {
        self.challenges.insert(challenge.phone.clone(), challenge);
        Ok(())
    }

    async fn take(&self, phone: &str) -> Result<Option<OtpChallenge>> {
        Ok(self.challenges.remove(phone).map(|(_, c)| c))
    }
}
