//! # Watching, rating and earnings
//!
//! A viewer earns an ad's reward once, by watching it for its full duration.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use domains::{
    ledger_balance, Ad, AdRepository, DomainError, LedgerRepository, Result, Role, User,
    UserRepository, WatchRecord,
};
use serde::Serialize;
use uuid::Uuid;

use crate::access::{load_ad, load_user};

/// An in-progress view, driving the progress bar. Only `start_watch` hands
/// one out; `complete_watch` re-reads the ad rather than trusting it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WatchSession {
    ad_id: Uuid,
    viewer_id: Uuid,
    reward: f64,
    duration_secs: u32,
    started_at: DateTime<Utc>,
}

impl WatchSession {
    fn new(ad: &Ad, viewer_id: Uuid, started_at: DateTime<Utc>) -> Self {
        Self {
            ad_id: ad.id,
            viewer_id,
            reward: ad.reward,
            duration_secs: ad.duration_secs,
            started_at,
        }
    }

    pub fn ad_id(&self) -> Uuid {
        self.ad_id
    }

    pub fn viewer_id(&self) -> Uuid {
        self.viewer_id
    }

    pub fn reward(&self) -> f64 {
        self.reward
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn duration(&self) -> Duration {
        Duration::seconds(i64::from(self.duration_secs))
    }

    pub fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        (now - self.started_at).max(Duration::zero())
    }

    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        (self.duration() - self.elapsed(now)).max(Duration::zero())
    }

    /// Fraction watched, clamped to `[0, 1]`.
    pub fn progress(&self, now: DateTime<Utc>) -> f64 {
        let total = self.duration().num_milliseconds();
        if total <= 0 {
            return 1.0;
        }
        (self.elapsed(now).num_milliseconds() as f64 / total as f64).clamp(0.0, 1.0)
    }

    pub fn is_complete(&self, now: DateTime<Utc>) -> bool {
        self.elapsed(now) >= self.duration()
    }
}

pub struct RewardService {
    ads: Arc<dyn AdRepository>,
    users: Arc<dyn UserRepository>,
    ledger: Arc<dyn LedgerRepository>,
}

impl RewardService {
    pub fn new(
        ads: Arc<dyn AdRepository>,
        users: Arc<dyn UserRepository>,
        ledger: Arc<dyn LedgerRepository>,
    ) -> Self {
        Self { ads, users, ledger }
    }

    async fn load_viewer(&self, viewer_id: Uuid) -> Result<User> {
        let viewer = load_user(self.users.as_ref(), viewer_id).await?;
        if viewer.role != Role::Viewer {
            return Err(DomainError::Forbidden(
                "only viewers earn rewards".to_string(),
            ));
        }
        Ok(viewer)
    }

    async fn load_watchable(&self, ad_id: Uuid) -> Result<Ad> {
        let ad = load_ad(self.ads.as_ref(), ad_id).await?;
        if !ad.is_approved() {
            // Viewers never see unapproved ads.
            return Err(DomainError::not_found("Ad", ad_id));
        }
        Ok(ad)
    }

    #[tracing::instrument(skip(self))]
    pub async fn start_watch(
        &self,
        viewer_id: Uuid,
        ad_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<WatchSession> {
        let viewer = self.load_viewer(viewer_id).await?;
        let ad = self.load_watchable(ad_id).await?;
        Ok(WatchSession::new(&ad, viewer.id, now))
    }

    /// Credits the reward for a finished view. Reward and length come from
    /// the stored ad; the session only contributes who, what and when.
    #[tracing::instrument(skip(self, session), fields(ad_id = %session.ad_id, viewer_id = %session.viewer_id))]
    pub async fn complete_watch(
        &self,
        session: &WatchSession,
        now: DateTime<Utc>,
    ) -> Result<WatchRecord> {
        let viewer = self.load_viewer(session.viewer_id).await?;
        let ad = self.load_watchable(session.ad_id).await?;
        let watched = WatchSession::new(&ad, viewer.id, session.started_at);

        if !watched.is_complete(now) {
            return Err(DomainError::Validation(format!(
                "ad still playing, {}s remaining",
                watched.remaining(now).num_seconds()
            )));
        }

        let record = WatchRecord {
            id: Uuid::now_v7(),
            viewer_id: viewer.id,
            ad_id: ad.id,
            reward: ad.reward,
            watched_at: now,
        };
        if let Err(err) = self.ledger.record_watch(record.clone()).await {
            if matches!(err, DomainError::Conflict(_)) {
                tracing::warn!("reward already claimed");
            }
            return Err(err);
        }

        tracing::info!(reward = record.reward, "reward credited");
        Ok(record)
    }

    /// Folds a 1-5 star rating into the ad's running average.
    #[tracing::instrument(skip(self))]
    pub async fn rate(&self, viewer_id: Uuid, ad_id: Uuid, stars: u8) -> Result<Ad> {
        if !(1..=5).contains(&stars) {
            return Err(DomainError::Validation(
                "rating must be between 1 and 5 stars".to_string(),
            ));
        }
        load_user(self.users.as_ref(), viewer_id).await?;
        let mut ad = self.load_watchable(ad_id).await?;

        let count = f64::from(ad.rating_count);
        ad.rating = (ad.rating * count + f64::from(stars)) / (count + 1.0);
        ad.rating_count += 1;
        self.ads.update(ad.clone()).await?;
        Ok(ad)
    }

    /// Earned minus withdrawn, rounded to the paisa.
    pub async fn balance(&self, user_id: Uuid) -> Result<f64> {
        let watches = self.ledger.watches_for(user_id).await?;
        let withdrawals = self.ledger.withdrawals_for(user_id).await?;
        Ok(ledger_balance(user_id, &watches, &withdrawals))
    }

    pub async fn history(&self, viewer_id: Uuid) -> Result<Vec<WatchRecord>> {
        self.ledger.watches_for(viewer_id).await
    }
}
