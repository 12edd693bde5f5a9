use axum_helpers::JwtConfig;
use core_config::{AppInfo, FromEnv, app_info, env_optional, env_or_default, server::ServerConfig};
use database::postgres::PostgresConfig;
use domain_accounts::Role;

pub use core_config::Environment;

/// Library API configuration, composed from the shared config pieces.
///
/// Without `DATABASE_URL` the directory lives in memory.
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub database: Option<PostgresConfig>,
    /// Canonical role the `/users` routes require (`ACCOUNTS_ADMIN_ROLE`)
    pub admin_role: Role,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;
        let jwt = JwtConfig::from_env()?;

        let database = match env_optional("DATABASE_URL") {
            Some(_) => Some(PostgresConfig::from_env()?),
            None => None,
        };

        if database.is_none() && environment.is_production() {
            eyre::bail!("DATABASE_URL is required when APP_ENV=production");
        }

        Ok(Self {
            app: app_info!(),
            environment,
            server,
            jwt,
            database,
            admin_role: Role::new(env_or_default("ACCOUNTS_ADMIN_ROLE", "ROLE_LIBRARIAN")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "an-identity-provider-secret-of-32+chars";

    #[test]
    fn test_dev_defaults_to_in_memory() {
        temp_env::with_vars(
            [
                ("JWT_SECRET", Some(SECRET)),
                ("DATABASE_URL", None),
                ("APP_ENV", None),
                ("ACCOUNTS_ADMIN_ROLE", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert!(config.database.is_none());
                assert_eq!(config.admin_role, Role::librarian());
                assert_eq!(config.app.name, "library_api");
            },
        );
    }

    #[test]
    fn test_database_url_enables_postgres() {
        temp_env::with_vars(
            [
                ("JWT_SECRET", Some(SECRET)),
                ("DATABASE_URL", Some("postgresql://library@localhost/library")),
                ("ACCOUNTS_ADMIN_ROLE", Some("ROLE_ADMIN")),
            ],
            || {
                let config = Config::from_env().unwrap();
                let database = config.database.unwrap();
                assert_eq!(database.url, "postgresql://library@localhost/library");
                assert_eq!(config.admin_role.name(), "ROLE_ADMIN");
            },
        );
    }

    #[test]
    fn test_production_requires_database() {
        temp_env::with_vars(
            [
                ("JWT_SECRET", Some(SECRET)),
                ("DATABASE_URL", None),
                ("APP_ENV", Some("production")),
            ],
            || {
                assert!(Config::from_env().is_err());
            },
        );
    }

    #[test]
    fn test_short_jwt_secret_is_rejected() {
        temp_env::with_var("JWT_SECRET", Some("too-short"), || {
            assert!(Config::from_env().is_err());
        });
    }
}
