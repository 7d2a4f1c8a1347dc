//! Platform-wide numbers for the app owner's dashboard.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use domains::{
    round_money, AdRepository, AdStatus, Category, LedgerRepository, Result, Role, UserRepository,
};
use serde::Serialize;
use uuid::Uuid;

use crate::access::require_owner;

const TOP_ADS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdViews {
    pub ad_id: Uuid,
    pub title: String,
    pub views: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlatformStats {
    pub users_by_role: BTreeMap<Role, usize>,
    pub ads_by_status: BTreeMap<AdStatus, usize>,
    pub approved_by_category: BTreeMap<Category, usize>,
    pub total_views: usize,
    pub total_rewards_paid: f64,
    pub total_withdrawn: f64,
    /// Mean rating over approved ads that have at least one rating
    pub average_rating: Option<f64>,
    pub top_ads: Vec<AdViews>,
}

pub struct AnalyticsService {
    ads: Arc<dyn AdRepository>,
    users: Arc<dyn UserRepository>,
    ledger: Arc<dyn LedgerRepository>,
}

impl AnalyticsService {
    pub fn new(
        ads: Arc<dyn AdRepository>,
        users: Arc<dyn UserRepository>,
        ledger: Arc<dyn LedgerRepository>,
    ) -> Self {
        Self { ads, users, ledger }
    }

    #[tracing::instrument(skip(self))]
    pub async fn platform_stats(&self, owner_id: Uuid) -> Result<PlatformStats> {
        require_owner(self.users.as_ref(), owner_id).await?;

        let users = self.users.list().await?;
        let ads = self.ads.list().await?;
        let watches = self.ledger.watches().await?;
        let withdrawals = self.ledger.withdrawals().await?;

        let mut stats = PlatformStats::default();
        for user in &users {
            *stats.users_by_role.entry(user.role).or_default() += 1;
        }
        for ad in &ads {
            *stats.ads_by_status.entry(ad.status).or_default() += 1;
            if ad.is_approved() {
                *stats.approved_by_category.entry(ad.category).or_default() += 1;
            }
        }

        let rated: Vec<f64> = ads
            .iter()
            .filter(|ad| ad.is_approved() && ad.rating_count > 0)
            .map(|ad| ad.rating)
            .collect();
        if !rated.is_empty() {
            stats.average_rating = Some(rated.iter().sum::<f64>() / rated.len() as f64);
        }

        stats.total_views = watches.len();
        stats.total_rewards_paid = round_money(watches.iter().map(|w| w.reward).sum());
        stats.total_withdrawn = round_money(withdrawals.iter().map(|w| w.amount).sum());

        let mut views: HashMap<Uuid, usize> = HashMap::new();
        for w in &watches {
            *views.entry(w.ad_id).or_default() += 1;
        }
        let mut top: Vec<AdViews> = ads
            .iter()
            .filter_map(|ad| {
                views.get(&ad.id).map(|&n| AdViews {
                    ad_id: ad.id,
                    title: ad.title.clone(),
                    views: n,
                })
            })
            .collect();
        top.sort_by(|a, b| b.views.cmp(&a.views).then_with(|| a.title.cmp(&b.title)));
        top.truncate(TOP_ADS);
        stats.top_ads = top;

        Ok(stats)
    }
}
