//! # Seed dataset
//!
//! The demo users and ads the marketplace boots with, plus JSON load/save so
//! a dataset can be edited by hand and fed back in.

use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use domains::{Ad, AdLocation, AdStatus, AdType, Category, Role, User};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedData {
    pub users: Vec<User>,
    pub ads: Vec<Ad>,
}

struct DemoAd {
    title: &'static str,
    description: &'static str,
    ad_type: AdType,
    category: Category,
    reward: f64,
    duration_secs: u32,
    place: (&'static str, &'static str, &'static str),
    coords: Option<(f64, f64)>,
    status: AdStatus,
    uploader: usize,
}

const DEMO_ADS: &[DemoAd] = &[
    DemoAd {
        title: "Masala Chai Festival",
        description: "Free tasting at every outlet this weekend",
        ad_type: AdType::Video,
        category: Category::Food,
        reward: 5.0,
        duration_secs: 15,
        place: ("India", "Karnataka", "Bengaluru Urban"),
        coords: Some((12.9716, 77.5946)),
        status: AdStatus::Approved,
        uploader: 0,
    },
    DemoAd {
        title: "Smartphone X2 Launch",
        description: "Pre-book and get free earbuds",
        ad_type: AdType::Video,
        category: Category::Technology,
        reward: 50.0,
        duration_secs: 60,
        place: ("India", "Maharashtra", "Mumbai"),
        coords: Some((19.0760, 72.8777)),
        status: AdStatus::Approved,
        uploader: 1,
    },
    DemoAd {
        title: "Monsoon Kurta Sale",
        description: "Flat 40% off on cotton kurtas",
        ad_type: AdType::Image,
        category: Category::Fashion,
        reward: 2.5,
        duration_secs: 10,
        place: ("India", "Karnataka", "Mysuru"),
        coords: Some((12.2958, 76.6394)),
        status: AdStatus::Approved,
        uploader: 0,
    },
    DemoAd {
        title: "Backwater Houseboat Getaway",
        description: "Two nights on Vembanad lake",
        ad_type: AdType::Video,
        category: Category::Travel,
        reward: 12.0,
        duration_secs: 45,
        place: ("India", "Kerala", "Alappuzha"),
        coords: None,
        status: AdStatus::Approved,
        uploader: 1,
    },
    DemoAd {
        title: "Electric Scooter Test Ride",
        description: "Book a home test ride",
        ad_type: AdType::Video,
        category: Category::Automotive,
        reward: 20.0,
        duration_secs: 30,
        place: ("India", "Karnataka", "Bengaluru Urban"),
        coords: Some((12.9352, 77.6245)),
        status: AdStatus::Pending,
        uploader: 1,
    },
    DemoAd {
        title: "Crash Diet Miracle Pills",
        description: "Lose 10 kg in a week",
        ad_type: AdType::Image,
        category: Category::Health,
        reward: 8.0,
        duration_secs: 12,
        place: ("India", "Maharashtra", "Pune"),
        coords: Some((18.5204, 73.8567)),
        status: AdStatus::Rejected,
        uploader: 0,
    },
    DemoAd {
        title: "Coding Bootcamp Scholarships",
        description: "Apply before the 30th",
        ad_type: AdType::Image,
        category: Category::Education,
        reward: 6.0,
        duration_secs: 20,
        place: ("India", "Maharashtra", "Pune"),
        coords: Some((18.5204, 73.8567)),
        status: AdStatus::Approved,
        uploader: 1,
    },
    DemoAd {
        title: "Himalayan Trek Packages",
        description: "Guided treks from Pokhara",
        ad_type: AdType::Video,
        category: Category::Travel,
        reward: 15.0,
        duration_secs: 40,
        place: ("Nepal", "Gandaki", "Kaski"),
        coords: Some((28.2096, 83.9856)),
        status: AdStatus::Approved,
        uploader: 0,
    },
];

impl SeedData {
    pub const OWNER_ID: Uuid = Uuid::from_u128(0x0190_0000_0000_7000_8000_0000_0000_0001);
    pub const UPLOADER_IDS: [Uuid; 2] = [
        Uuid::from_u128(0x0190_0000_0000_7000_8000_0000_0000_0011),
        Uuid::from_u128(0x0190_0000_0000_7000_8000_0000_0000_0012),
    ];
    pub const VIEWER_IDS: [Uuid; 2] = [
        Uuid::from_u128(0x0190_0000_0000_7000_8000_0000_0000_0021),
        Uuid::from_u128(0x0190_0000_0000_7000_8000_0000_0000_0022),
    ];

    /// The built-in demo marketplace. Ids and timestamps are fixed so runs
    /// are reproducible.
    pub fn demo() -> Self {
        let epoch = DateTime::<Utc>::from_timestamp(1_717_200_000, 0).unwrap_or_default();
        let user = |id: Uuid, name: &str, phone: &str, role: Role, offset: i64| User {
            id,
            name: name.to_string(),
            email: format!("{}@admarket.example", name.split(' ').next().unwrap_or(name).to_lowercase()),
            phone: phone.to_string(),
            profile_picture_url: None,
            role,
            created_at: epoch + Duration::minutes(offset),
        };

        let users = vec![
            user(Self::OWNER_ID, "Asha Menon", "9000000001", Role::AppOwner, 0),
            user(Self::UPLOADER_IDS[0], "Chaiwala Brands", "9000000011", Role::Uploader, 1),
            user(Self::UPLOADER_IDS[1], "Nimbus Media", "9000000012", Role::Uploader, 2),
            user(Self::VIEWER_IDS[0], "Ravi Kumar", "9000000021", Role::Viewer, 3),
            user(Self::VIEWER_IDS[1], "Meera Shah", "9000000022", Role::Viewer, 4),
        ];

        let ads = DEMO_ADS
            .iter()
            .enumerate()
            .map(|(i, demo)| {
                let uploader = &users[1 + demo.uploader];
                let slug = demo.title.to_lowercase().replace(' ', "-");
                let (country, state, district) = demo.place;
                Ad {
                    id: Uuid::from_u128(0x0190_0000_0000_7000_9000_0000_0000_0000 + i as u128),
                    title: demo.title.to_string(),
                    description: demo.description.to_string(),
                    ad_type: demo.ad_type,
                    category: demo.category,
                    reward: demo.reward,
                    duration_secs: demo.duration_secs,
                    content_url: format!("https://cdn.admarket.example/ads/{slug}"),
                    thumbnail_url: format!("https://cdn.admarket.example/thumbs/{slug}.jpg"),
                    location: AdLocation {
                        country: country.to_string(),
                        state: state.to_string(),
                        district: district.to_string(),
                        latitude: demo.coords.map(|c| c.0),
                        longitude: demo.coords.map(|c| c.1),
                    },
                    rating: 0.0,
                    rating_count: 0,
                    uploader_id: uploader.id,
                    uploader_name: uploader.name.clone(),
                    status: demo.status,
                    rejection_reason: (demo.status == AdStatus::Rejected)
                        .then(|| "misleading health claims".to_string()),
                    created_at: epoch + Duration::hours(1 + i as i64),
                }
            })
            .collect();

        Self { users, ads }
    }

    pub async fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading seed dataset {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("parsing seed dataset {}", path.display()))
    }

    pub async fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, json)
            .await
            .with_context(|| format!("writing seed dataset {}", path.display()))
    }
}
