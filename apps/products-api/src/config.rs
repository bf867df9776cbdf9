//! Configuration for Products API

use core_config::{AppInfo, FromEnv, app_info, env_parse, env_required, server::ServerConfig};
use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Apply pending migrations before serving (`RUN_MIGRATIONS`, default true)
    pub run_migrations: bool,
    /// Parsed from the comma-separated `CORS_ALLOWED_ORIGIN`
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?;
        let server = ServerConfig::from_env()?;
        let run_migrations = env_parse("RUN_MIGRATIONS", "true")?;
        let cors_allowed_origins = parse_origins(&env_required("CORS_ALLOWED_ORIGIN")?);

        if cors_allowed_origins.is_empty() {
            eyre::bail!("CORS_ALLOWED_ORIGIN must list at least one origin");
        }

        Ok(Self {
            app: app_info!(),
            database,
            server,
            environment,
            run_migrations,
            cors_allowed_origins,
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED: [(&str, Option<&str>); 2] = [
        ("DATABASE_URL", Some("postgresql://localhost/products")),
        ("CORS_ALLOWED_ORIGIN", Some("http://localhost:3000, https://shop.example.com")),
    ];

    #[test]
    fn test_from_env_with_defaults() {
        temp_env::with_vars(
            [
                REQUIRED[0],
                REQUIRED[1],
                ("RUN_MIGRATIONS", None),
                ("PORT", None),
                ("APP_ENV", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert!(config.run_migrations);
                assert_eq!(config.server.port, 8080);
                assert_eq!(config.database.url(), "postgresql://localhost/products");
                assert_eq!(
                    config.cors_allowed_origins,
                    vec!["http://localhost:3000", "https://shop.example.com"]
                );
                assert_eq!(config.app.name, "products_api");
                assert!(config.environment.is_development());
            },
        );
    }

    #[test]
    fn test_run_migrations_can_be_disabled() {
        temp_env::with_vars(
            [REQUIRED[0], REQUIRED[1], ("RUN_MIGRATIONS", Some("false"))],
            || {
                let config = Config::from_env().unwrap();
                assert!(!config.run_migrations);
            },
        );
    }

    #[test]
    fn test_missing_cors_origin_fails() {
        temp_env::with_vars([REQUIRED[0], ("CORS_ALLOWED_ORIGIN", None)], || {
            assert!(Config::from_env().is_err());
        });
    }

    #[test]
    fn test_blank_cors_origin_fails() {
        temp_env::with_vars([REQUIRED[0], ("CORS_ALLOWED_ORIGIN", Some(" , "))], || {
            assert!(Config::from_env().is_err());
        });
    }

    #[test]
    fn test_missing_database_url_fails() {
        temp_env::with_vars([("DATABASE_URL", None), REQUIRED[1]], || {
            assert!(Config::from_env().is_err());
        });
    }
}
