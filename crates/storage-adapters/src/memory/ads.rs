use async_trait::async_trait;
use domains::{Ad, AdRepository, DomainError, Result};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Keeps ads in a `Vec` so listing order is insertion order.
#[derive(Default)]
pub struct InMemoryAdRepository {
    ads: RwLock<Vec<Ad>>,
}

impl InMemoryAdRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ads(ads: Vec<Ad>) -> Self {
        Self {
            ads: RwLock::new(ads),
        }
    }
}

#[async_trait]
impl AdRepository for InMemoryAdRepository {
    async fn list(&self) -> Result<Vec<Ad>> {
        Ok(self.ads.read().await.clone())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Ad>> {
        Ok(self.ads.read().await.iter().find(|ad| ad.id == id).cloned())
    }

    async fn insert(&self, ad: Ad) -> Result<()> {
        let mut guard = self.ads.write().await;
        if guard.iter().any(|a| a.id == ad.id) {
            return Err(DomainError::Conflict(format!("ad {} already exists", ad.id)));
        }
        guard.push(ad);
        Ok(())
    }

    async fn update(&self, ad: Ad) -> Result<()> {
        let mut guard = self.ads.write().await;
        match guard.iter_mut().find(|a| a.id == ad.id) {
            Some(slot) => {
                *slot = ad;
                Ok(())
            }
            None => Err(DomainError::not_found("Ad", ad.id)),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Ad>> {
        let mut guard = self.ads.write().await;
        Ok(guard
            .iter()
            .position(|a| a.id == id)
            .map(|index| guard.remove(index)))
    }
}
