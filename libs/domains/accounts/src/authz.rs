//! Role authorization gate for administrative routes.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::error::{AccountError, AccountResult};
use crate::principal::Principal;
use crate::role::Role;

/// Allows a call only when the caller holds `required` exactly.
#[derive(Debug, Clone)]
pub struct RoleGate {
    required: Role,
}

impl RoleGate {
    pub fn new(required: Role) -> Self {
        Self { required }
    }

    pub fn required(&self) -> &Role {
        &self.required
    }

    pub fn check(&self, principal: &Principal) -> AccountResult<()> {
        if principal.has_role(&self.required) {
            return Ok(());
        }

        tracing::warn!(
            username = %principal.username(),
            required = %self.required,
            "Role gate denied request"
        );
        Err(AccountError::Forbidden {
            required: self.required.clone(),
        })
    }
}

impl Default for RoleGate {
    fn default() -> Self {
        Self::new(Role::librarian())
    }
}

/// Middleware form of [`RoleGate::check`].
///
/// Mounted with `route_layer`, so a denied request never reaches a handler
/// or the repository.
pub async fn require_role(
    State(gate): State<RoleGate>,
    principal: Principal,
    request: Request,
    next: Next,
) -> Result<Response, AccountError> {
    gate.check(&principal)?;
    Ok(next.run(request).await)
}
