//! # Axum Helpers
//!
//! Shared HTTP plumbing for the library services.
//!
//! ## Modules
//!
//! - **[`auth`]**: verification of identity-provider JWTs and principal claims
//! - **[`errors`]**: structured error responses with error codes
//! - **[`extractors`]**: validated JSON extractor
//! - **[`server`]**: router assembly, health endpoint, graceful shutdown
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_app, create_router};
//! use core_config::server::ServerConfig;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let router = create_router::<ApiDoc>(Router::new());
//!     create_app(router, &ServerConfig::default()).await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod server;

pub use auth::{JwtClaims, JwtConfig, JwtVerifier, jwt_auth_middleware};

pub use server::{
    ShutdownCoordinator, create_app, create_production_app, create_router, health_router,
    shutdown_signal,
};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::ValidatedJson;
