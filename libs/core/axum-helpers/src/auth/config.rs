//! JWT verification settings, loaded through `core_config::FromEnv`.

use core_config::{ConfigError, FromEnv, env_optional, env_required};

/// Settings for verifying tokens minted by the identity provider.
///
/// Environment variables:
/// - `JWT_SECRET` (required): shared HS256 secret, at least 32 characters
/// - `JWT_ISSUER` (optional): expected `iss` claim
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: Option<String>,
}

impl JwtConfig {
    /// # Panics
    /// Panics if the secret is shorter than 32 characters.
    pub fn new(secret: impl Into<String>) -> Self {
        let secret = secret.into();
        assert!(
            secret.len() >= 32,
            "JWT secret must be at least 32 characters"
        );
        Self {
            secret,
            issuer: None,
        }
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }
}

impl FromEnv for JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let secret = env_required("JWT_SECRET")?;

        if secret.len() < 32 {
            return Err(ConfigError::ParseError {
                key: "JWT_SECRET".to_string(),
                details: format!(
                    "must be at least 32 characters (got {})",
                    secret.len()
                ),
            });
        }

        Ok(Self {
            secret,
            issuer: env_optional("JWT_ISSUER"),
        })
    }
}
