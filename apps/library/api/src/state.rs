//! Shared application state.

use database::postgres::DatabaseConnection;

/// Cloned into routers that need it; clones share the pool.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// `None` when running on the in-memory directory
    pub db: Option<DatabaseConnection>,
}
