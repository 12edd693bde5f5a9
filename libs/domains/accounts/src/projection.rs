//! External, password-free views of a [`User`].

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::User;

/// What callers see of a user.
///
/// `books` is present only in the administrative view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProjection {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub roles: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub books: Option<Vec<String>>,
}

impl UserProjection {
    /// The caller's own profile: display role names, no borrow list.
    pub fn self_service(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            roles: user
                .roles
                .iter()
                .map(|role| role.display_name().to_string())
                .collect(),
            books: None,
        }
    }

    /// Staff view: canonical role names as stored, plus one title per borrow
    /// in borrow order. Repeated titles are kept.
    pub fn administrative(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            roles: user.roles.iter().map(|role| role.name().to_string()).collect(),
            books: Some(
                user.borrows
                    .iter()
                    .map(|borrow| borrow.book.title.clone())
                    .collect(),
            ),
        }
    }
}
