//! Authentication boundary.
//!
//! The identity provider issues HS256 JWTs; this module verifies them and
//! exposes the claims to handlers. No tokens are issued and no passwords
//! are checked here.
//!
//! ```ignore
//! use axum_helpers::auth::{JwtConfig, JwtVerifier, jwt_auth_middleware};
//! use core_config::FromEnv;
//!
//! let verifier = JwtVerifier::new(&JwtConfig::from_env()?);
//! let protected = Router::new()
//!     .route("/account", get(handler))
//!     .layer(axum::middleware::from_fn_with_state(verifier, jwt_auth_middleware));
//! ```

pub mod config;
pub mod jwt;
pub mod middleware;

pub use config::JwtConfig;
pub use jwt::{JwtClaims, JwtVerifier};
pub use middleware::jwt_auth_middleware;
