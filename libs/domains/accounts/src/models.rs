use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::role::Role;

/// Catalog entry; only the title is used here
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    pub id: i64,
    pub title: String,
}

/// A user's possession of a book, current or past. Read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookBorrow {
    pub id: i64,
    pub book: Book,
    pub borrowed_at: DateTime<Utc>,
    pub returned_at: Option<DateTime<Utc>>,
}

/// A directory record.
///
/// The password is opaque and never serialized outward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default, skip_serializing)]
    #[schema(write_only)]
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub borrows: Vec<BookBorrow>,
}

/// Administrative create request
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    #[validate(length(min = 1, message = "Username must not be empty"))]
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub roles: Vec<Role>,
}

/// Self-service profile edit; applies to the caller's own record
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[validate(length(min = 1, message = "Username must not be empty"))]
    pub username: String,
    pub password: String,
    #[validate(length(min = 1, message = "First name must not be empty"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name must not be empty"))]
    pub last_name: String,
}

/// Administrative full update of any record, keyed by `id`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModifyUser {
    pub id: i64,
    #[validate(length(min = 1, message = "Username must not be empty"))]
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub roles: Vec<Role>,
}

impl User {
    /// Overwrite identity and name fields; roles and borrows stay as they are.
    pub fn apply_profile(&mut self, patch: ProfileUpdate) {
        self.username = patch.username;
        self.password = patch.password;
        self.first_name = patch.first_name;
        self.last_name = patch.last_name;
    }

    /// Overwrite every mutable field. Borrows are not ours to change.
    pub fn apply_modification(&mut self, input: ModifyUser) {
        self.username = input.username;
        self.password = input.password;
        self.first_name = input.first_name;
        self.last_name = input.last_name;
        self.roles = input.roles;
    }
}
