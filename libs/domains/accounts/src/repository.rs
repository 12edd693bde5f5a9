use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::error::{AccountError, AccountResult, UserKey};
use crate::models::{NewUser, User};

/// Storage collaborator for directory records.
///
/// Implementations are the sole arbiter of concurrent writes: `create`
/// must reject a taken username atomically.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Exact, case-sensitive username lookup
    async fn get_by_username(&self, username: &str) -> AccountResult<Option<User>>;

    async fn get_by_id(&self, id: i64) -> AccountResult<Option<User>>;

    /// Every record, ordered by id
    async fn list(&self) -> AccountResult<Vec<User>>;

    /// Insert if the username is free; [`AccountError::DuplicateUsername`] otherwise.
    async fn create(&self, input: NewUser) -> AccountResult<User>;

    /// Persist username, password, names and roles of the record with `user.id`.
    ///
    /// Borrow relationships are never written. Returns
    /// [`AccountError::NotFound`] when the id is unknown.
    async fn update(&self, user: User) -> AccountResult<User>;

    /// Returns whether a record was removed
    async fn delete(&self, id: i64) -> AccountResult<bool>;
}

/// In-memory implementation for development and tests
#[derive(Debug, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<Vec<User>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::with_users(Vec::new())
    }

    /// Start from existing records, e.g. users with borrow history.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let mut users: Vec<User> = users.into_iter().collect();
        users.sort_by_key(|u| u.id);
        let next_id = users.last().map_or(1, |u| u.id + 1);

        Self {
            users: Arc::new(RwLock::new(users)),
            next_id: Arc::new(AtomicI64::new(next_id)),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get_by_username(&self, username: &str) -> AccountResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn get_by_id(&self, id: i64) -> AccountResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn list(&self) -> AccountResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(users.clone())
    }

    async fn create(&self, input: NewUser) -> AccountResult<User> {
        // Check and insert under one write lock
        let mut users = self.users.write().await;

        if users.iter().any(|u| u.username == input.username) {
            return Err(AccountError::DuplicateUsername(input.username));
        }

        let user = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            username: input.username,
            password: input.password,
            first_name: input.first_name,
            last_name: input.last_name,
            roles: input.roles,
            borrows: Vec::new(),
        };
        users.push(user.clone());

        tracing::info!(user_id = user.id, username = %user.username, "Created user");
        Ok(user)
    }

    async fn update(&self, user: User) -> AccountResult<User> {
        let mut users = self.users.write().await;

        let index = users
            .iter()
            .position(|u| u.id == user.id)
            .ok_or(AccountError::NotFound(UserKey::Id(user.id)))?;

        if users
            .iter()
            .any(|u| u.id != user.id && u.username == user.username)
        {
            return Err(AccountError::DuplicateUsername(user.username));
        }

        let stored = &mut users[index];

        stored.username = user.username;
        stored.password = user.password;
        stored.first_name = user.first_name;
        stored.last_name = user.last_name;
        stored.roles = user.roles;

        tracing::info!(user_id = stored.id, "Updated user");
        Ok(stored.clone())
    }

    async fn delete(&self, id: i64) -> AccountResult<bool> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|u| u.id != id);

        let deleted = users.len() < before;
        if deleted {
            tracing::info!(user_id = id, "Deleted user");
        }
        Ok(deleted)
    }
}
