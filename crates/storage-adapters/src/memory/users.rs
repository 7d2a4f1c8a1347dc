use async_trait::async_trait;
use dashmap::DashMap;
use domains::{DomainError, Result, User, UserRepository};
use uuid::Uuid;

/// Users keyed by id. Phone and email lookups scan; the directory is small.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: DashMap<Uuid, User>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: Vec<User>) -> Self {
        let repo = Self::new();
        for user in users {
            repo.users.insert(user.id, user);
        }
        repo
    }

    fn find(&self, matches: impl Fn(&User) -> bool) -> Option<User> {
        self.users
            .iter()
            .find(|entry| matches(entry.value()))
            .map(|entry| entry.value().clone())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list(&self) -> Result<Vec<User>> {
        let mut users: Vec<User> = self.users.iter().map(|e| e.value().clone()).collect();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(users)
    }

    async fn get(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.users.get(&id).map(|u| u.value().clone()))
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>> {
        Ok(self.find(|u| u.phone == phone))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.find(|u| u.email.eq_ignore_ascii_case(email)))
    }

    async fn insert(&self, user: User) -> Result<()> {
        if self.users.contains_key(&user.id) {
            return Err(DomainError::Conflict(format!(
                "user {} already exists",
                user.id
            )));
        }
        self.users.insert(user.id, user);
        Ok(())
    }

    async fn update(&self, user: User) -> Result<()> {
        match self.users.get_mut(&user.id) {
            Some(mut slot) => {
                *slot = user;
                Ok(())
            }
            None => Err(DomainError::not_found("User", user.id)),
        }
    }
}
