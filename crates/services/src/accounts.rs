//! # AccountService
//!
//! Phone + OTP login, registration of first-time users, profile edits and
//! the owner's user directory.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use domains::{
    DomainError, NewUser, OtpChallenge, OtpCodeGenerator, OtpHasher, OtpSender, OtpStore,
    Result, User, UserRepository,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::access::{load_user, require_owner};
use crate::validation::{is_valid_email, is_valid_phone, normalize_phone, validate_new_user};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OtpPolicy {
    pub ttl: Duration,
}

impl Default for OtpPolicy {
    fn default() -> Self {
        Self {
            ttl: Duration::minutes(5),
        }
    }
}

/// What a correct code unlocks.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LoginOutcome {
    Existing(User),
    /// No account for this phone yet; the client should collect a
    /// registration form.
    NewUser { phone: String },
}

/// Editable profile fields.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub profile_picture_url: Option<String>,
}

/// Adapters behind the login flow.
pub struct OtpPorts {
    pub store: Arc<dyn OtpStore>,
    pub hasher: Arc<dyn OtpHasher>,
    pub generator: Arc<dyn OtpCodeGenerator>,
    pub sender: Arc<dyn OtpSender>,
}

pub struct AccountService {
    users: Arc<dyn UserRepository>,
    otp: OtpPorts,
    policy: OtpPolicy,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserRepository>, otp: OtpPorts, policy: OtpPolicy) -> Self {
        Self { users, otp, policy }
    }

    /// Issues a fresh code for `phone` and returns when it expires.
    #[tracing::instrument(skip(self))]
    pub async fn request_otp(&self, phone: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
        if !is_valid_phone(phone) {
            return Err(DomainError::Validation(
                "phone number is malformed".to_string(),
            ));
        }
        let phone = normalize_phone(phone);

        let code = self.otp.generator.generate();
        let challenge = OtpChallenge {
            phone: phone.clone(),
            code_hash: self.otp.hasher.hash(&code)?,
            expires_at: now + self.policy.ttl,
        };
        let expires_at = challenge.expires_at;
        self.otp.store.put(challenge).await?;
        self.otp.sender.send(&phone, &code).await?;

        tracing::info!(%expires_at, "otp issued");
        Ok(expires_at)
    }

    /// Consumes the pending challenge; a wrong guess burns it.
    #[tracing::instrument(skip(self, code))]
    pub async fn verify_otp(
        &self,
        phone: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<LoginOutcome> {
        let phone = normalize_phone(phone);
        let challenge = self
            .otp
            .store
            .take(&phone)
            .await?
            .ok_or_else(|| DomainError::Unauthorized("no code was requested".to_string()))?;

        if now >= challenge.expires_at {
            tracing::warn!("expired otp presented");
            return Err(DomainError::Unauthorized("code expired".to_string()));
        }
        if !self.otp.hasher.verify(code.trim(), &challenge.code_hash) {
            tracing::warn!("wrong otp presented");
            return Err(DomainError::Unauthorized("incorrect code".to_string()));
        }

        match self.users.find_by_phone(&phone).await? {
            Some(user) => {
                tracing::info!(user_id = %user.id, "login");
                Ok(LoginOutcome::Existing(user))
            }
            None => Ok(LoginOutcome::NewUser { phone }),
        }
    }

    #[tracing::instrument(skip(self, new_user), fields(role = %new_user.role))]
    pub async fn register(&self, new_user: NewUser) -> Result<User> {
        validate_new_user(&new_user)?;
        let phone = normalize_phone(&new_user.phone);
        let email = new_user.email.trim().to_string();

        if self.users.find_by_phone(&phone).await?.is_some() {
            return Err(DomainError::Conflict(
                "phone number already registered".to_string(),
            ));
        }
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(DomainError::Conflict("email already registered".to_string()));
        }

        let user = User {
            id: Uuid::now_v7(),
            name: new_user.name.trim().to_string(),
            email,
            phone,
            profile_picture_url: None,
            role: new_user.role,
            created_at: Utc::now(),
        };
        self.users.insert(user.clone()).await?;

        tracing::info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    /// Every user, oldest first. Owner only.
    pub async fn list_users(&self, owner_id: Uuid) -> Result<Vec<User>> {
        require_owner(self.users.as_ref(), owner_id).await?;
        self.users.list().await
    }

    #[tracing::instrument(skip(self, update))]
    pub async fn update_profile(&self, user_id: Uuid, update: ProfileUpdate) -> Result<User> {
        let mut user = load_user(self.users.as_ref(), user_id).await?;

        if let Some(name) = update.name {
            if name.trim().is_empty() {
                return Err(DomainError::Validation("name is required".to_string()));
            }
            user.name = name.trim().to_string();
        }
        if let Some(email) = update.email {
            let email = email.trim().to_string();
            if !is_valid_email(&email) {
                return Err(DomainError::Validation(
                    "email address is malformed".to_string(),
                ));
            }
            if let Some(other) = self.users.find_by_email(&email).await? {
                if other.id != user.id {
                    return Err(DomainError::Conflict("email already registered".to_string()));
                }
            }
            user.email = email;
        }
        if let Some(url) = update.profile_picture_url {
            let url = url.trim().to_string();
            user.profile_picture_url = (!url.is_empty()).then_some(url);
        }

        self.users.update(user.clone()).await?;
        Ok(user)
    }
}
