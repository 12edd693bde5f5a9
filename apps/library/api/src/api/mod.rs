use axum::{Router, middleware, routing::get};
use axum_helpers::{JwtVerifier, jwt_auth_middleware};
use domain_accounts::{
    DirectoryService, InMemoryUserRepository, PgUserRepository, RoleGate, UserRepository,
    handlers,
};

use crate::state::AppState;

pub mod health;

/// Account and user routes behind JWT verification.
///
/// Picks the PostgreSQL directory when a pool is configured, the in-memory
/// one otherwise. The returned router has its state applied.
pub fn routes(state: &AppState) -> Router {
    let gate = RoleGate::new(state.config.admin_role.clone());
    let verifier = JwtVerifier::new(&state.config.jwt);

    match &state.db {
        Some(db) => authenticated(PgUserRepository::new(db.clone()), gate, verifier),
        None => {
            tracing::warn!("No DATABASE_URL configured; user directory is in-memory");
            authenticated(InMemoryUserRepository::new(), gate, verifier)
        }
    }
}

fn authenticated<R: UserRepository + 'static>(
    repository: R,
    gate: RoleGate,
    verifier: JwtVerifier,
) -> Router {
    handlers::router(DirectoryService::new(repository), gate)
        .layer(middleware::from_fn_with_state(verifier, jwt_auth_middleware))
}

/// `/ready` with a real database probe.
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
