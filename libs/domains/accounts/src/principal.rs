//! Identity resolution: who is calling.

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_helpers::JwtClaims;

use crate::error::AccountError;
use crate::role::Role;

/// The authenticated caller, as vouched for by the identity provider.
///
/// Passed explicitly into every entry point; nothing reads identity from
/// ambient state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    username: String,
    roles: Vec<Role>,
}

impl Principal {
    pub fn new(username: impl Into<String>, roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            username: username.into(),
            roles: roles.into_iter().collect(),
        }
    }

    /// The caller's directory username
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Exact canonical-name membership; no hierarchy or wildcards.
    pub fn has_role(&self, role: &Role) -> bool {
        self.roles.iter().any(|granted| granted == role)
    }
}

impl From<JwtClaims> for Principal {
    fn from(claims: JwtClaims) -> Self {
        Self::new(claims.sub, claims.roles.into_iter().map(Role::from))
    }
}

/// Resolves the principal from claims left by `jwt_auth_middleware`.
///
/// A missing or blank principal means the route was mounted outside the
/// authentication layer, so it surfaces as [`AccountError::Unauthenticated`].
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = AccountError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<JwtClaims>()
            .filter(|claims| !claims.sub.trim().is_empty())
            .cloned()
            .map(Principal::from)
            .ok_or(AccountError::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn claims(sub: &str, roles: &[&str]) -> JwtClaims {
        JwtClaims {
            sub: sub.to_string(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            exp: 0,
            iat: 0,
        }
    }

    #[tokio::test]
    async fn test_resolves_username_and_roles_from_claims() {
        let (mut parts, _) = Request::builder().body(()).unwrap().into_parts();
        parts
            .extensions
            .insert(claims("alice", &["ROLE_LIBRARIAN"]));

        let principal = Principal::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(principal.username(), "alice");
        assert!(principal.has_role(&Role::librarian()));
    }

    #[tokio::test]
    async fn test_missing_claims_is_unauthenticated() {
        let (mut parts, _) = Request::builder().body(()).unwrap().into_parts();

        let err = Principal::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert!(matches!(err, AccountError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_blank_subject_is_unauthenticated() {
        let (mut parts, _) = Request::builder().body(()).unwrap().into_parts();
        parts.extensions.insert(claims("  ", &[]));

        let err = Principal::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert!(matches!(err, AccountError::Unauthenticated));
    }

    #[test]
    fn test_has_role_requires_exact_name() {
        let principal = Principal::new("bob", [Role::new("ROLE_LIBRARIAN_ASSISTANT")]);
        assert!(!principal.has_role(&Role::librarian()));

        let principal = Principal::new("bob", [Role::new("LIBRARIAN")]);
        assert!(!principal.has_role(&Role::librarian()));
    }
}
