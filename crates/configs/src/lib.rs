//! # configs
//!
//! Layered settings for the admin client. Sources, lowest priority first:
//!
//! 1. built-in defaults
//! 2. `config/default.toml` (optional)
//! 3. `config/local.toml` (optional, not committed)
//! 4. `.env` in the working directory, loaded into the process environment
//! 5. `BLOG_ADMIN__*` environment variables, `__` between sections,
//!    e.g. `BLOG_ADMIN__API__CLIENT_SECRET`

use config::{Config, Environment as EnvSource, File};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

pub const ENV_PREFIX: &str = "BLOG_ADMIN";
pub const DEFAULT_CONFIG_DIR: &str = "config";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub environment: Environment,
    pub api: ApiSettings,
    pub storage: StorageSettings,
    pub log: LogSettings,
}

#[derive(Debug, Deserialize)]
pub struct ApiSettings {
    pub endpoint: String,
    pub timeout_secs: u64,
    pub client_id: String,
    #[serde(deserialize_with = "secret_string")]
    pub client_secret: SecretString,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    pub level: String,
    pub format: LogFormat,
}

impl Settings {
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.api.endpoint.trim().is_empty() {
            return Err(ConfigError::Invalid("api.endpoint is empty".into()));
        }
        if self.api.client_id.trim().is_empty() {
            return Err(ConfigError::Invalid("api.client_id is not set".into()));
        }
        if self.api.client_secret.expose_secret().is_empty() {
            return Err(ConfigError::Invalid("api.client_secret is not set".into()));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Invalid("api.timeout_secs must be positive".into()));
        }
        Ok(())
    }
}

impl ApiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Loads `.env`, then settings from `dir` and the environment.
pub fn load(dir: impl AsRef<Path>) -> Result<Settings, ConfigError> {
    if let Ok(path) = dotenvy::dotenv() {
        debug!(path = %path.display(), "loaded .env");
    }
    load_from(dir)
}

/// Loads settings from `dir` and the environment, without touching `.env`.
pub fn load_from(dir: impl AsRef<Path>) -> Result<Settings, ConfigError> {
    load_with_prefix(dir.as_ref(), ENV_PREFIX)
}

fn load_with_prefix(dir: &Path, prefix: &str) -> Result<Settings, ConfigError> {
    let settings: Settings = Config::builder()
        .set_default("environment", "development")?
        .set_default("api.endpoint", "http://localhost:4000/graphql")?
        .set_default("api.timeout_secs", 30)?
        .set_default("api.client_id", "")?
        .set_default("api.client_secret", "")?
        .set_default("storage.path", ".blog-admin/session.json")?
        .set_default("log.level", "info")?
        .set_default("log.format", "pretty")?
        .add_source(File::from(dir.join("default")).required(false))
        .add_source(File::from(dir.join("local")).required(false))
        .add_source(
            EnvSource::with_prefix(prefix)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()?;

    settings.validate()?;
    debug!(environment = ?settings.environment, endpoint = %settings.api.endpoint, "configuration loaded");
    Ok(settings)
}

fn secret_string<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(SecretString::from)
}
