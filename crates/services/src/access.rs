//! Actor lookups shared by every service.

use domains::{Ad, AdRepository, DomainError, Result, User, UserRepository};
use uuid::Uuid;

pub(crate) async fn load_user(users: &dyn UserRepository, id: Uuid) -> Result<User> {
    users
        .get(id)
        .await?
        .ok_or_else(|| DomainError::not_found("User", id))
}

pub(crate) async fn require_owner(users: &dyn UserRepository, id: Uuid) -> Result<User> {
    let user = load_user(users, id).await?;
    if !user.is_owner() {
        tracing::warn!(user_id = %id, role = %user.role, "owner-only action refused");
        return Err(DomainError::Forbidden("app owner role required".to_string()));
    }
    Ok(user)
}

pub(crate) async fn load_ad(ads: &dyn AdRepository, id: Uuid) -> Result<Ad> {
    ads.get(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Ad", id))
}
