use domains::{AdStatus, Category, DomainError, PayoutMethod, Role};
use integration_tests::{ad_service, demo_store, t0};
use services::{AnalyticsService, PayoutPolicy, PayoutService, RewardService};
use storage_adapters::SeedData;

#[tokio::test]
async fn stats_reflect_users_ads_and_the_ledger() {
    let store = demo_store();
    let rewards = RewardService::new(store.ads.clone(), store.users.clone(), store.ledger.clone());
    let approved = ad_service(&store).approved().await.unwrap();
    let id_of = |title: &str| approved.iter().find(|a| a.title == title).map(|a| a.id).unwrap();

    let phone = id_of("Smartphone X2 Launch");
    let chai = id_of("Masala Chai Festival");
    let trek = id_of("Himalayan Trek Packages");
    for (viewer, ad) in [
        (SeedData::VIEWER_IDS[0], phone),
        (SeedData::VIEWER_IDS[0], chai),
        (SeedData::VIEWER_IDS[1], phone),
    ] {
        let session = rewards.start_watch(viewer, ad, t0()).await.unwrap();
        rewards
            .complete_watch(&session, t0() + session.duration())
            .await
            .unwrap();
    }
    rewards.rate(SeedData::VIEWER_IDS[0], chai, 5).await.unwrap();
    rewards.rate(SeedData::VIEWER_IDS[1], trek, 4).await.unwrap();

    PayoutService::new(
        store.users.clone(),
        store.ledger.clone(),
        PayoutPolicy { min_withdrawal: 10.0 },
    )
    .withdraw(
        SeedData::VIEWER_IDS[0],
        50.0,
        PayoutMethod::Upi {
            vpa: "ravi.k@okaxis".to_string(),
        },
        t0(),
    )
    .await
    .unwrap();

    let analytics = AnalyticsService::new(store.ads.clone(), store.users.clone(), store.ledger.clone());
    let stats = analytics.platform_stats(SeedData::OWNER_ID).await.unwrap();

    assert_eq!(stats.users_by_role[&Role::AppOwner], 1);
    assert_eq!(stats.users_by_role[&Role::Uploader], 2);
    assert_eq!(stats.users_by_role[&Role::Viewer], 2);
    assert_eq!(stats.ads_by_status[&AdStatus::Approved], 6);
    assert_eq!(stats.ads_by_status[&AdStatus::Pending], 1);
    assert_eq!(stats.ads_by_status[&AdStatus::Rejected], 1);
    assert_eq!(stats.approved_by_category[&Category::Travel], 2);
    assert!(!stats.approved_by_category.contains_key(&Category::Automotive));

    assert_eq!(stats.total_views, 3);
    assert_eq!(stats.total_rewards_paid, 105.0);
    assert_eq!(stats.total_withdrawn, 50.0);
    assert_eq!(stats.average_rating, Some(4.5));

    assert_eq!(stats.top_ads[0].title, "Smartphone X2 Launch");
    assert_eq!(stats.top_ads[0].views, 2);
    assert_eq!(stats.top_ads[1].title, "Masala Chai Festival");
    assert_eq!(stats.top_ads.len(), 2);
}

#[tokio::test]
async fn fresh_platform_has_no_rating_and_no_top_ads() {
    let store = demo_store();
    let analytics = AnalyticsService::new(store.ads.clone(), store.users.clone(), store.ledger.clone());
    let stats = analytics.platform_stats(SeedData::OWNER_ID).await.unwrap();

    assert_eq!(stats.total_views, 0);
    assert_eq!(stats.average_rating, None);
    assert!(stats.top_ads.is_empty());

    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(json["users_by_role"]["VIEWER"], 2);
}

#[tokio::test]
async fn uploaders_cannot_read_stats() {
    let store = demo_store();
    let analytics = AnalyticsService::new(store.ads.clone(), store.users.clone(), store.ledger.clone());
    assert!(matches!(
        analytics.platform_stats(SeedData::UPLOADER_IDS[1]).await,
        Err(DomainError::Forbidden(_))
    ));
}
