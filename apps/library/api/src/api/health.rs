//! Readiness probe backed by the configured directory store.

use axum::{extract::State, response::Response};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};

use crate::state::AppState;

/// 200 when the directory store answers, 503 otherwise.
///
/// The in-memory directory is always ready.
pub async fn ready_handler(State(state): State<AppState>) -> Response {
    let check: HealthCheckFuture<'_> = match &state.db {
        Some(db) => Box::pin(async move {
            database::postgres::check_health(db)
                .await
                .map_err(|e| e.to_string())
        }),
        None => Box::pin(async { Ok(()) }),
    };

    run_health_checks(vec![("directory", check)]).await
}
