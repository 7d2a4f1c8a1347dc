//! Shared fixtures for the cross-crate tests under `tests/`.

use std::sync::Arc;

use auth_adapters::{Argon2OtpHasher, OsRngCodeGenerator, OutboxOtpSender};
use chrono::{DateTime, Duration, Utc};
use domains::{Ad, AdLocation, AdStatus, AdType, Category, NewAd};
use services::{AccountService, AdService, OtpPolicy, OtpPorts};
use storage_adapters::{InMemoryStore, SeedData};
use uuid::Uuid;

/// Fixed clock so expiry and watch timing are deterministic.
pub fn t0() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(1_720_000_000, 0).unwrap_or_default()
}

pub fn demo_store() -> InMemoryStore {
    InMemoryStore::seeded(SeedData::demo())
}

pub fn ad_service(store: &InMemoryStore) -> AdService {
    AdService::new(store.ads.clone(), store.users.clone())
}

/// Login wiring with the real Argon2 hasher and an outbox in place of SMS.
pub fn account_service(store: &InMemoryStore, outbox: Arc<OutboxOtpSender>) -> AccountService {
    AccountService::new(
        store.users.clone(),
        OtpPorts {
            store: store.otp.clone(),
            hasher: Arc::new(Argon2OtpHasher::new()),
            generator: Arc::new(OsRngCodeGenerator::default()),
            sender: outbox,
        },
        OtpPolicy {
            ttl: Duration::minutes(5),
        },
    )
}

/// An ad with just the fields the filters look at.
pub struct AdBuilder {
    ad: Ad,
}

impl AdBuilder {
    pub fn new(title: &str) -> Self {
        Self {
            ad: Ad {
                id: Uuid::now_v7(),
                title: title.to_string(),
                description: String::new(),
                ad_type: AdType::Video,
                category: Category::Other,
                reward: 10.0,
                duration_secs: 30,
                content_url: "https://cdn.admarket.example/ads/x".to_string(),
                thumbnail_url: "https://cdn.admarket.example/thumbs/x.jpg".to_string(),
                location: AdLocation {
                    country: "India".to_string(),
                    state: "Karnataka".to_string(),
                    district: "Bengaluru Urban".to_string(),
                    latitude: None,
                    longitude: None,
                },
                rating: 0.0,
                rating_count: 0,
                uploader_id: SeedData::UPLOADER_IDS[0],
                uploader_name: "Chaiwala Brands".to_string(),
                status: AdStatus::Approved,
                rejection_reason: None,
                created_at: t0(),
            },
        }
    }

    pub fn category(mut self, category: Category) -> Self {
        self.ad.category = category;
        self
    }

    pub fn reward(mut self, reward: f64) -> Self {
        self.ad.reward = reward;
        self
    }

    pub fn duration(mut self, secs: u32) -> Self {
        self.ad.duration_secs = secs;
        self
    }

    pub fn place(mut self, country: &str, state: &str, district: &str) -> Self {
        self.ad.location.country = country.to_string();
        self.ad.location.state = state.to_string();
        self.ad.location.district = district.to_string();
        self
    }

    pub fn at(mut self, lat: f64, lng: f64) -> Self {
        self.ad.location.latitude = Some(lat);
        self.ad.location.longitude = Some(lng);
        self
    }

    pub fn status(mut self, status: AdStatus) -> Self {
        self.ad.status = status;
        self
    }

    pub fn build(self) -> Ad {
        self.ad
    }
}

pub fn draft(title: &str) -> NewAd {
    NewAd {
        title: title.to_string(),
        description: "Limited period offer".to_string(),
        ad_type: AdType::Image,
        category: Category::Electronics,
        reward: 4.0,
        duration_secs: 20,
        content_url: "https://cdn.admarket.example/ads/new".to_string(),
        thumbnail_url: "https://cdn.admarket.example/thumbs/new.jpg".to_string(),
        location: AdLocation {
            country: "India".to_string(),
            state: "Kerala".to_string(),
            district: "Ernakulam".to_string(),
            latitude: Some(9.9816),
            longitude: Some(76.2999),
        },
    }
}

pub fn titles(ads: &[Ad]) -> Vec<&str> {
    ads.iter().map(|a| a.title.as_str()).collect()
}
