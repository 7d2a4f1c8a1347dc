//! # AdService
//!
//! Submission, editing and moderation of ads.
//!
//! Status moves: an uploader's submission or edit lands in `Pending`; the app
//! owner moves it to `Approved` or `Rejected`. An approved ad can be taken
//! down by rejecting it, a rejected one can be reinstated by approving it.
//! Moving an ad to the status it already has is an error.

use std::sync::Arc;

use chrono::Utc;
use domains::{
    Ad, AdRepository, AdStatus, DomainError, NewAd, Result, Role, UserRepository,
};
use uuid::Uuid;

use crate::access::{load_ad, load_user, require_owner};
use crate::validation::validate_new_ad;

pub struct AdService {
    ads: Arc<dyn AdRepository>,
    users: Arc<dyn UserRepository>,
}

impl AdService {
    pub fn new(ads: Arc<dyn AdRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { ads, users }
    }

    /// Stores a new ad awaiting review.
    #[tracing::instrument(skip(self, draft), fields(title = %draft.title))]
    pub async fn submit(&self, uploader_id: Uuid, draft: NewAd) -> Result<Ad> {
        let uploader = load_user(self.users.as_ref(), uploader_id).await?;
        if !matches!(uploader.role, Role::Uploader | Role::AppOwner) {
            tracing::warn!(role = %uploader.role, "submission refused");
            return Err(DomainError::Forbidden(
                "only uploaders can submit ads".to_string(),
            ));
        }
        validate_new_ad(&draft)?;

        let ad = Ad {
            id: Uuid::now_v7(),
            title: draft.title.trim().to_string(),
            description: draft.description,
            ad_type: draft.ad_type,
            category: draft.category,
            reward: draft.reward,
            duration_secs: draft.duration_secs,
            content_url: draft.content_url,
            thumbnail_url: draft.thumbnail_url,
            location: draft.location,
            rating: 0.0,
            rating_count: 0,
            uploader_id: uploader.id,
            uploader_name: uploader.name,
            status: AdStatus::Pending,
            rejection_reason: None,
            created_at: Utc::now(),
        };
        self.ads.insert(ad.clone()).await?;

        tracing::info!(ad_id = %ad.id, "ad submitted for review");
        Ok(ad)
    }

    /// Replaces the descriptive fields of an uploader's own ad and sends it
    /// back to review.
    #[tracing::instrument(skip(self, draft))]
    pub async fn update(&self, actor_id: Uuid, ad_id: Uuid, draft: NewAd) -> Result<Ad> {
        let mut ad = load_ad(self.ads.as_ref(), ad_id).await?;
        if ad.uploader_id != actor_id {
            return Err(DomainError::Forbidden(
                "only the uploader can edit this ad".to_string(),
            ));
        }
        validate_new_ad(&draft)?;

        ad.title = draft.title.trim().to_string();
        ad.description = draft.description;
        ad.ad_type = draft.ad_type;
        ad.category = draft.category;
        ad.reward = draft.reward;
        ad.duration_secs = draft.duration_secs;
        ad.content_url = draft.content_url;
        ad.thumbnail_url = draft.thumbnail_url;
        ad.location = draft.location;
        ad.status = AdStatus::Pending;
        ad.rejection_reason = None;
        self.ads.update(ad.clone()).await?;

        tracing::info!("ad edited, back in review");
        Ok(ad)
    }

    #[tracing::instrument(skip(self))]
    pub async fn approve(&self, owner_id: Uuid, ad_id: Uuid) -> Result<Ad> {
        require_owner(self.users.as_ref(), owner_id).await?;
        let mut ad = load_ad(self.ads.as_ref(), ad_id).await?;
        transition(&ad, AdStatus::Approved)?;

        ad.status = AdStatus::Approved;
        ad.rejection_reason = None;
        self.ads.update(ad.clone()).await?;

        tracing::info!("ad approved");
        Ok(ad)
    }

    #[tracing::instrument(skip(self))]
    pub async fn reject(&self, owner_id: Uuid, ad_id: Uuid, reason: &str) -> Result<Ad> {
        require_owner(self.users.as_ref(), owner_id).await?;
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(DomainError::Validation(
                "a rejection reason is required".to_string(),
            ));
        }
        let mut ad = load_ad(self.ads.as_ref(), ad_id).await?;
        transition(&ad, AdStatus::Rejected)?;

        ad.status = AdStatus::Rejected;
        ad.rejection_reason = Some(reason.to_string());
        self.ads.update(ad.clone()).await?;

        tracing::info!("ad rejected");
        Ok(ad)
    }

    /// Removes an ad. Allowed for the app owner and for the ad's uploader.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, actor_id: Uuid, ad_id: Uuid) -> Result<Ad> {
        let actor = load_user(self.users.as_ref(), actor_id).await?;
        let ad = load_ad(self.ads.as_ref(), ad_id).await?;
        if !actor.is_owner() && ad.uploader_id != actor.id {
            tracing::warn!("delete refused");
            return Err(DomainError::Forbidden(
                "only the owner or the uploader can delete this ad".to_string(),
            ));
        }

        let removed = self
            .ads
            .delete(ad_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Ad", ad_id))?;
        tracing::info!("ad deleted");
        Ok(removed)
    }

    /// The moderation queue.
    pub async fn pending(&self, owner_id: Uuid) -> Result<Vec<Ad>> {
        require_owner(self.users.as_ref(), owner_id).await?;
        self.with_status(AdStatus::Pending).await
    }

    pub async fn approved(&self) -> Result<Vec<Ad>> {
        self.with_status(AdStatus::Approved).await
    }

    pub async fn by_uploader(&self, uploader_id: Uuid) -> Result<Vec<Ad>> {
        let mut ads = self.ads.list().await?;
        ads.retain(|ad| ad.uploader_id == uploader_id);
        Ok(ads)
    }

    pub async fn all(&self, owner_id: Uuid) -> Result<Vec<Ad>> {
        require_owner(self.users.as_ref(), owner_id).await?;
        self.ads.list().await
    }

    async fn with_status(&self, status: AdStatus) -> Result<Vec<Ad>> {
        let mut ads = self.ads.list().await?;
        ads.retain(|ad| ad.status == status);
        Ok(ads)
    }
}

fn transition(ad: &Ad, to: AdStatus) -> Result<()> {
    if ad.status == to {
        return Err(DomainError::InvalidTransition {
            from: ad.status,
            to,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ad, draft, user};
    use domains::{Category, MockAdRepository, MockUserRepository};
    use mockall::predicate::eq;

    fn service(ads: MockAdRepository, users: MockUserRepository) -> AdService {
        AdService::new(Arc::new(ads), Arc::new(users))
    }

    #[tokio::test]
    async fn viewers_cannot_submit() {
        let viewer = user("Ravi", Role::Viewer);
        let id = viewer.id;
        let mut users = MockUserRepository::new();
        users
            .expect_get()
            .with(eq(id))
            .returning(move |_| Ok(Some(viewer.clone())));
        let mut ads = MockAdRepository::new();
        ads.expect_insert().never();

        let err = service(ads, users).submit(id, draft("Chai")).await.unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }

    #[tokio::test]
    async fn submission_starts_pending_with_uploader_name() {
        let uploader = user("Threads Co", Role::Uploader);
        let id = uploader.id;
        let mut users = MockUserRepository::new();
        users
            .expect_get()
            .returning(move |_| Ok(Some(uploader.clone())));
        let mut ads = MockAdRepository::new();
        ads.expect_insert()
            .withf(|ad| ad.status == AdStatus::Pending && ad.rating_count == 0)
            .times(1)
            .returning(|_| Ok(()));

        let ad = service(ads, users).submit(id, draft("Kurta sale")).await.unwrap();
        assert_eq!(ad.uploader_name, "Threads Co");
        assert_eq!(ad.uploader_id, id);
    }

    #[tokio::test]
    async fn invalid_draft_is_rejected_before_storage() {
        let uploader = user("Threads Co", Role::Uploader);
        let id = uploader.id;
        let mut users = MockUserRepository::new();
        users
            .expect_get()
            .returning(move |_| Ok(Some(uploader.clone())));
        let mut ads = MockAdRepository::new();
        ads.expect_insert().never();

        let mut bad = draft("x");
        bad.reward = 0.0;
        let err = service(ads, users).submit(id, bad).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn approving_twice_is_an_invalid_transition() {
        let owner = user("Admin", Role::AppOwner);
        let owner_id = owner.id;
        let approved = ad("Chai", Category::Food, 5.0, AdStatus::Approved);
        let ad_id = approved.id;

        let mut users = MockUserRepository::new();
        users.expect_get().returning(move |_| Ok(Some(owner.clone())));
        let mut ads = MockAdRepository::new();
        ads.expect_get()
            .returning(move |_| Ok(Some(approved.clone())));
        ads.expect_update().never();

        let err = service(ads, users).approve(owner_id, ad_id).await.unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidTransition {
                from: AdStatus::Approved,
                to: AdStatus::Approved
            }
        );
    }

    #[tokio::test]
    async fn reject_requires_reason() {
        let owner = user("Admin", Role::AppOwner);
        let owner_id = owner.id;
        let mut users = MockUserRepository::new();
        users.expect_get().returning(move |_| Ok(Some(owner.clone())));

        let err = tokio_test::assert_err!(
            service(MockAdRepository::new(), users)
                .reject(owner_id, Uuid::now_v7(), "   ")
                .await
        );
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
