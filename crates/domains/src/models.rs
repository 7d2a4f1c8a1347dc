//! # Domain Models
//!
//! These structs represent the core entities of the marketplace.
//! We use UUID v7 for time-ordered, globally unique identification.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;
use crate::geo::GeoPoint;

/// How the creative is delivered to the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdType {
    Video,
    Image,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Electronics,
    Fashion,
    Food,
    Technology,
    Travel,
    Automotive,
    Entertainment,
    Health,
    Education,
    Finance,
    RealEstate,
    Other,
}

impl Category {
    pub const ALL: [Category; 12] = [
        Category::Electronics,
        Category::Fashion,
        Category::Food,
        Category::Technology,
        Category::Travel,
        Category::Automotive,
        Category::Entertainment,
        Category::Health,
        Category::Education,
        Category::Finance,
        Category::RealEstate,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Electronics => "ELECTRONICS",
            Category::Fashion => "FASHION",
            Category::Food => "FOOD",
            Category::Technology => "TECHNOLOGY",
            Category::Travel => "TRAVEL",
            Category::Automotive => "AUTOMOTIVE",
            Category::Entertainment => "ENTERTAINMENT",
            Category::Health => "HEALTH",
            Category::Education => "EDUCATION",
            Category::Finance => "FINANCE",
            Category::RealEstate => "REAL_ESTATE",
            Category::Other => "OTHER",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace([' ', '-'], "_").to_ascii_uppercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| DomainError::Validation(format!("unknown category '{s}'")))
    }
}

/// Moderation state of an ad. Only `Approved` ads reach viewers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdStatus {
    Pending,
    Approved,
    Rejected,
}

impl fmt::Display for AdStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AdStatus::Pending => "PENDING",
            AdStatus::Approved => "APPROVED",
            AdStatus::Rejected => "REJECTED",
        })
    }
}

/// Where an ad is targeted. Coordinates are optional and only count when
/// both halves are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdLocation {
    pub country: String,
    pub state: String,
    pub district: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl AdLocation {
    pub fn coordinates(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(GeoPoint { lat, lng }),
            _ => None,
        }
    }
}

/// A single advertisement as stored by the marketplace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ad {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub ad_type: AdType,
    pub category: Category,
    /// Amount credited to a viewer for watching the ad to the end
    pub reward: f64,
    pub duration_secs: u32,
    pub content_url: String,
    pub thumbnail_url: String,
    pub location: AdLocation,
    /// Running average of viewer ratings (0 when unrated)
    pub rating: f64,
    pub rating_count: u32,
    pub uploader_id: Uuid,
    pub uploader_name: String,
    pub status: AdStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Ad {
    pub fn is_approved(&self) -> bool {
        self.status == AdStatus::Approved
    }
}

/// Uploader-supplied draft used for both submission and edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAd {
    pub title: String,
    pub description: String,
    pub ad_type: AdType,
    pub category: Category,
    pub reward: f64,
    pub duration_secs: u32,
    pub content_url: String,
    pub thumbnail_url: String,
    pub location: AdLocation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Viewer,
    Uploader,
    AppOwner,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Viewer => "VIEWER",
            Role::Uploader => "UPLOADER",
            Role::AppOwner => "APP_OWNER",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture_url: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_owner(&self) -> bool {
        self.role == Role::AppOwner
    }
}

/// Registration form submitted after a first successful OTP login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
}

/// One completed, rewarded view of an ad.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchRecord {
    pub id: Uuid,
    pub viewer_id: Uuid,
    pub ad_id: Uuid,
    pub reward: f64,
    pub watched_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PayoutMethod {
    BankTransfer {
        account_holder: String,
        account_number: String,
        ifsc: String,
    },
    Upi {
        vpa: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Withdrawal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub amount: f64,
    pub method: PayoutMethod,
    pub requested_at: DateTime<Utc>,
}

/// Rounds an amount to the paisa.
pub fn round_money(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Earned minus withdrawn for `user_id`, rounded to the paisa.
pub fn ledger_balance(user_id: Uuid, watches: &[WatchRecord], withdrawals: &[Withdrawal]) -> f64 {
    let earned: f64 = watches
        .iter()
        .filter(|w| w.viewer_id == user_id)
        .map(|w| w.reward)
        .sum();
    let withdrawn: f64 = withdrawals
        .iter()
        .filter(|w| w.user_id == user_id)
        .map(|w| w.amount)
        .sum();
    round_money(earned - withdrawn)
}
