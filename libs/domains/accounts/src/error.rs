use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_helpers::{ErrorCode, errors::error_response};
use thiserror::Error;

use crate::role::Role;

/// Key a directory lookup was made with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserKey {
    Username(String),
    Id(i64),
}

impl UserKey {
    fn not_found_message(&self) -> String {
        match self {
            UserKey::Username(_) => "User not found.".to_string(),
            UserKey::Id(id) => format!("User with id {id} not found."),
        }
    }
}

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("{}", .0.not_found_message())]
    NotFound(UserKey),

    #[error("User with username {0} already exists.")]
    DuplicateUsername(String),

    #[error("Access denied: role {required} required.")]
    Forbidden { required: Role },

    /// No principal reached an identity-scoped handler. Upstream
    /// authentication guarantees one, so this is always a wiring defect.
    #[error("No authenticated principal on request")]
    Unauthenticated,

    #[error("Invalid input: {0}")]
    Validation(String),

    /// Backing store failed or returned inconsistent data
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AccountResult<T> = Result<T, AccountError>;

impl AccountError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            AccountError::NotFound(_) => ErrorCode::NotFound,
            AccountError::DuplicateUsername(_) => ErrorCode::Conflict,
            AccountError::Forbidden { .. } => ErrorCode::Forbidden,
            AccountError::Validation(_) => ErrorCode::ValidationError,
            AccountError::Unauthenticated => ErrorCode::MissingPrincipal,
            AccountError::Storage(_) => ErrorCode::StorageError,
            AccountError::Internal(_) => ErrorCode::InternalError,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AccountError::NotFound(_) => StatusCode::NOT_FOUND,
            AccountError::DuplicateUsername(_) => StatusCode::CONFLICT,
            AccountError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AccountError::Validation(_) => StatusCode::BAD_REQUEST,
            AccountError::Unauthenticated
            | AccountError::Storage(_)
            | AccountError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        let code = self.error_code();
        let status = self.status();

        let message = match &self {
            AccountError::Unauthenticated => {
                tracing::error!("Identity-scoped request arrived without a principal");
                code.default_message().to_string()
            }
            AccountError::Storage(msg) => {
                tracing::error!(error_code = code.code(), "Storage error: {}", msg);
                code.default_message().to_string()
            }
            AccountError::Internal(msg) => {
                tracing::error!(error_code = code.code(), "Internal error: {}", msg);
                code.default_message().to_string()
            }
            other => {
                tracing::info!(error_code = code.code(), "{}", other);
                other.to_string()
            }
        };

        error_response(status, message, code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_messages_depend_on_key() {
        let by_name = AccountError::NotFound(UserKey::Username("ghost".to_string()));
        let by_id = AccountError::NotFound(UserKey::Id(42));

        assert_eq!(by_name.to_string(), "User not found.");
        assert_eq!(by_id.to_string(), "User with id 42 not found.");
    }

    #[test]
    fn test_conflict_message() {
        let err = AccountError::DuplicateUsername("bob".to_string());
        assert_eq!(err.to_string(), "User with username bob already exists.");
    }

    #[test]
    fn test_every_kind_has_its_own_code() {
        let errors = [
            AccountError::NotFound(UserKey::Id(1)),
            AccountError::DuplicateUsername("bob".to_string()),
            AccountError::Forbidden {
                required: Role::librarian(),
            },
            AccountError::Validation("empty".to_string()),
            AccountError::Unauthenticated,
            AccountError::Storage("connection reset".to_string()),
            AccountError::Internal("unknown id".to_string()),
        ];

        let mut codes: Vec<_> = errors.iter().map(|e| e.error_code().code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AccountError::NotFound(UserKey::Username("x".into())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AccountError::DuplicateUsername("x".into()).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AccountError::Forbidden {
                required: Role::librarian()
            }
            .status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AccountError::Unauthenticated.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_missing_principal_and_storage_failure_are_distinguishable() {
        let missing = AccountError::Unauthenticated;
        let storage = AccountError::Storage("Database error: connection refused".to_string());

        assert_ne!(
            (missing.status(), missing.error_code()),
            (storage.status(), storage.error_code())
        );
        assert_eq!(missing.error_code().as_str(), "MISSING_PRINCIPAL");
        assert_eq!(storage.error_code().as_str(), "STORAGE_ERROR");
    }
}
