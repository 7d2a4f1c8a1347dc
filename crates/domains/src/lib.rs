//! admarket/crates/domains/src/lib.rs
//!
//! The central domain types and interface definitions for the ad marketplace.

pub mod error;
pub mod filters;
pub mod geo;
pub mod models;
pub mod ports;

// Re-exporting for easier access in other crates
pub use error::*;
pub use filters::*;
pub use geo::*;
pub use models::*;
pub use ports::*;

#[cfg(test)]
mod tests {
    use super::models::*;
    use uuid::Uuid;

    fn sample_ad() -> Ad {
        Ad {
            id: Uuid::now_v7(),
            title: "Monsoon Sale".to_string(),
            description: "Flat 40% off".to_string(),
            ad_type: AdType::Image,
            category: Category::Fashion,
            reward: 2.5,
            duration_secs: 15,
            content_url: "https://cdn.example.com/a.png".to_string(),
            thumbnail_url: "https://cdn.example.com/a_t.png".to_string(),
            location: AdLocation {
                country: "India".to_string(),
                state: "Kerala".to_string(),
                district: "Kochi".to_string(),
                latitude: Some(9.93),
                longitude: None,
            },
            rating: 0.0,
            rating_count: 0,
            uploader_id: Uuid::now_v7(),
            uploader_name: "Threads Co".to_string(),
            status: AdStatus::Pending,
            rejection_reason: None,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn half_coordinates_are_no_coordinates() {
        let ad = sample_ad();
        assert!(ad.location.coordinates().is_none());
        assert!(!ad.is_approved());
    }

    #[test]
    fn enums_use_screaming_snake_case_on_the_wire() {
        let json = serde_json::to_value(sample_ad()).unwrap();
        assert_eq!(json["status"], "PENDING");
        assert_eq!(json["ad_type"], "IMAGE");
        assert_eq!(serde_json::to_value(Role::AppOwner).unwrap(), "APP_OWNER");
        assert_eq!(serde_json::to_value(Category::RealEstate).unwrap(), "REAL_ESTATE");
    }

    #[test]
    fn payout_method_is_tagged() {
        let m = PayoutMethod::Upi {
            vpa: "asha@okaxis".to_string(),
        };
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["kind"], "UPI");
        assert_eq!(json["vpa"], "asha@okaxis");
    }
}
