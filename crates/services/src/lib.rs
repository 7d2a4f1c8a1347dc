//! # services
//!
//! Marketplace behaviour on top of the `domains` ports: the catalog
//! filtering pipeline, the browse session that drives it, moderation,
//! rewards, payouts, login and analytics.

mod access;
pub mod accounts;
pub mod ads;
pub mod analytics;
pub mod browse;
pub mod catalog;
pub mod payouts;
pub mod rewards;
pub mod validation;

pub use accounts::{AccountService, LoginOutcome, OtpPolicy, OtpPorts, ProfileUpdate};
pub use ads::AdService;
pub use analytics::{AdViews, AnalyticsService, PlatformStats};
pub use browse::{BrowseEvent, BrowseSession};
pub use catalog::{filter_ads, location_options, LocationOptions};
pub use payouts::{PayoutPolicy, PayoutService};
pub use rewards::{RewardService, WatchSession};
