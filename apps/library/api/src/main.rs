use axum_helpers::server::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let db = match config.database.clone() {
        Some(pg) => Some(
            database::postgres::connect_from_config_with_retry(pg, None)
                .await
                .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?,
        ),
        None => None,
    };

    let state = AppState { config, db };

    let api_routes = api::routes(&state);
    let app = create_router::<openapi::ApiDoc>(api_routes)
        .merge(health_router(state.config.app))
        .merge(api::ready_router(state.clone()));

    info!(
        admin_role = %state.config.admin_role,
        "Starting library API (30s shutdown timeout)"
    );

    let server_config = state.config.server.clone();
    let db = state.db;
    create_production_app(app, &server_config, Duration::from_secs(30), async move {
        if let Some(db) = db {
            match db.close().await {
                Ok(_) => info!("PostgreSQL connection closed"),
                Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
            }
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Library API shutdown complete");
    Ok(())
}
