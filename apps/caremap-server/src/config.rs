//! Layered configuration: defaults -> YAML file -> environment.
//!
//! Environment variables use the `CAREMAP__` prefix with `__` as the
//! section separator, e.g. `CAREMAP__SERVER__PORT=9000`.

use std::path::Path;

use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use secrecy::SecretString;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8080,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SeaORM connection URL; `mode=rwc` creates the SQLite file on
    /// first start.
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://caremap.db?mode=rwc".to_owned(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 signing secret. Override outside development.
    pub jwt_secret: SecretString,
    pub access_ttl_minutes: i64,
    pub refresh_ttl_days: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: SecretString::from("dev-secret-change-me"),
            access_ttl_minutes: 60,
            refresh_ttl_days: 1,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// tracing-subscriber EnvFilter directive set.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info,sea_orm=warn".to_owned(),
        }
    }
}

impl AppConfig {
    /// Load configuration, layering the optional YAML file and the
    /// environment over the defaults.
    ///
    /// # Errors
    /// Returns an error when the file or environment contains values the
    /// schema rejects.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::new();
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        let config = figment
            .merge(Env::prefixed("CAREMAP__").split("__"))
            .extract()?;
        Ok(config)
    }
}
