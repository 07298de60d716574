//! Configuration module for shelter-service.

use secrecy::{ExposeSecret, Secret};
use service_core::config as core_config;
use service_core::error::AppError;
use sqlx::postgres::PgConnectOptions;
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct ShelterConfig {
    pub common: core_config::Config,
    pub service_name: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    pub database: DatabaseConfig,
    pub siblings: SiblingPorts,
}

/// Store connection parameters. A full `url` takes precedence over the parts.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: Option<Secret<String>>,
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: Secret<String>,
}

/// Ports of the operational UIs deployed next to the service on the same host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiblingPorts {
    pub prometheus: u16,
    pub alertmanager: u16,
    pub grafana: u16,
    pub load_tester: u16,
}

impl Default for SiblingPorts {
    fn default() -> Self {
        Self {
            prometheus: 9090,
            alertmanager: 9093,
            grafana: 3000,
            load_tester: 3006,
        }
    }
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> Result<PgConnectOptions, AppError> {
        if let Some(url) = &self.url {
            return PgConnectOptions::from_str(url.expose_secret()).map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!("Invalid DATABASE_URL: {}", e))
            });
        }

        Ok(PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.name)
            .username(&self.user)
            .password(self.password.expose_secret())
            .application_name("shelter-service"))
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: "db".to_string(),
            port: 5432,
            name: "shelter_db".to_string(),
            user: "postgres".to_string(),
            password: Secret::new("password".to_string()),
        }
    }
}

fn env_port(key: &str, default: u16) -> Result<u16, AppError> {
    match env::var(key) {
        Ok(value) => value
            .parse()
            .map_err(|e| AppError::ConfigError(anyhow::anyhow!("{} is not a port: {}", key, e))),
        Err(_) => Ok(default),
    }
}

impl ShelterConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        let db_defaults = DatabaseConfig::default();
        let sibling_defaults = SiblingPorts::default();

        Ok(Self {
            common,
            service_name: env::var("SERVICE_NAME")
                .unwrap_or_else(|_| "shelter-service".to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            otlp_endpoint: env::var("OTLP_ENDPOINT").ok(),
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").ok().map(Secret::new),
                host: env::var("DB_HOST").unwrap_or(db_defaults.host),
                port: env_port("DB_PORT", db_defaults.port)?,
                name: env::var("DB_NAME").unwrap_or(db_defaults.name),
                user: env::var("DB_USER").unwrap_or(db_defaults.user),
                password: env::var("DB_PASSWORD")
                    .map(Secret::new)
                    .unwrap_or(db_defaults.password),
            },
            siblings: SiblingPorts {
                prometheus: env_port("PROMETHEUS_PORT", sibling_defaults.prometheus)?,
                alertmanager: env_port("ALERTMANAGER_PORT", sibling_defaults.alertmanager)?,
                grafana: env_port("GRAFANA_PORT", sibling_defaults.grafana)?,
                load_tester: env_port("LOAD_TESTER_PORT", sibling_defaults.load_tester)?,
            },
        })
    }
}
