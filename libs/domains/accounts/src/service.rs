use std::sync::Arc;
use validator::Validate;

use crate::error::{AccountError, AccountResult, UserKey};
use crate::models::{ModifyUser, NewUser, ProfileUpdate, User};
use crate::repository::UserRepository;

/// Directory operations over a [`UserRepository`].
///
/// No authorization happens here. Administrative calls are gated at the
/// HTTP boundary; self-service calls are scoped by the caller's username.
#[derive(Clone)]
pub struct DirectoryService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> DirectoryService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn get_by_username(&self, username: &str) -> AccountResult<User> {
        self.repository
            .get_by_username(username)
            .await?
            .ok_or_else(|| AccountError::NotFound(UserKey::Username(username.to_string())))
    }

    pub async fn get_by_id(&self, id: i64) -> AccountResult<User> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(AccountError::NotFound(UserKey::Id(id)))
    }

    pub async fn get_all(&self) -> AccountResult<Vec<User>> {
        self.repository.list().await
    }

    /// Fails with [`AccountError::DuplicateUsername`] if the name is taken.
    pub async fn create(&self, input: NewUser) -> AccountResult<User> {
        input
            .validate()
            .map_err(|e| AccountError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    /// Self-service edit of the caller's own record.
    ///
    /// Username, password and names come from `patch`; roles and borrows
    /// are left as stored.
    pub async fn change_user_data(&self, caller: &str, patch: ProfileUpdate) -> AccountResult<User> {
        patch
            .validate()
            .map_err(|e| AccountError::Validation(e.to_string()))?;

        let mut user = self.get_by_username(caller).await?;
        user.apply_profile(patch);

        let updated = self.repository.update(user).await.map_err(|e| match e {
            // Record vanished between read and write
            AccountError::NotFound(_) => AccountError::NotFound(UserKey::Username(caller.to_string())),
            other => other,
        })?;

        tracing::info!(user_id = updated.id, caller = %caller, "Profile updated");
        Ok(updated)
    }

    /// Administrative full update keyed by `input.id`.
    ///
    /// The id must name an existing record; an unknown id is reported as an
    /// internal error rather than a not-found outcome.
    pub async fn modify(&self, input: ModifyUser) -> AccountResult<User> {
        input
            .validate()
            .map_err(|e| AccountError::Validation(e.to_string()))?;

        let id = input.id;
        let mut user = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| AccountError::Internal(format!("modify targeted unknown user id {id}")))?;
        user.apply_modification(input);

        self.repository.update(user).await.map_err(|e| match e {
            AccountError::NotFound(_) => {
                AccountError::Internal(format!("modify targeted unknown user id {id}"))
            }
            other => other,
        })
    }

    /// Removing an unknown id is not an error.
    pub async fn delete_by_id(&self, id: i64) -> AccountResult<()> {
        if !self.repository.delete(id).await? {
            tracing::debug!(user_id = id, "Delete requested for absent user");
        }
        Ok(())
    }
}
