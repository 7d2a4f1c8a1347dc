use domains::{AdRepository, AdStatus, UserRepository};
use storage_adapters::{InMemoryStore, SeedData};

fn scratch(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("admarket-seed-{name}-{}.json", std::process::id()))
}

#[tokio::test]
async fn saved_dataset_boots_the_same_store() {
    let path = scratch("roundtrip");
    let demo = SeedData::demo();
    demo.save(&path).await.unwrap();

    let store = InMemoryStore::seeded(SeedData::load(&path).await.unwrap());
    assert_eq!(store.users.list().await.unwrap().len(), 5);
    let ads = store.ads.list().await.unwrap();
    let ids: Vec<_> = ads.iter().map(|a| a.id).collect();
    let expected: Vec<_> = demo.ads.iter().map(|a| a.id).collect();
    assert_eq!(ids, expected);
    assert_eq!(ads.iter().filter(|a| a.status == AdStatus::Approved).count(), 6);

    let _ = std::fs::remove_file(path);
}

#[tokio::test]
async fn dataset_uses_wire_names() {
    let path = scratch("wire");
    SeedData::demo().save(&path).await.unwrap();
    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();

    assert_eq!(raw["users"][0]["role"], "APP_OWNER");
    assert_eq!(raw["ads"][0]["status"], "APPROVED");
    assert_eq!(raw["ads"][0]["category"], "FOOD");

    let _ = std::fs::remove_file(path);
}

#[tokio::test]
async fn missing_dataset_reports_the_path() {
    let path = scratch("missing");
    let err = SeedData::load(&path).await.unwrap_err();
    assert!(format!("{err:#}").contains("admarket-seed-missing"));
}

#[tokio::test]
async fn malformed_dataset_is_rejected() {
    let path = scratch("malformed");
    std::fs::write(&path, r#"{"users": [], "ads": [{"title": 3}]}"#).unwrap();
    assert!(SeedData::load(&path).await.is_err());
    let _ = std::fs::remove_file(path);
}
