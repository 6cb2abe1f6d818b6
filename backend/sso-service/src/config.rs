//! Configuration management for SSO Service
//!
//! Loads settings from, in increasing priority:
//! 1. Built-in defaults
//! 2. Optional configuration file (YAML, TOML or JSON; `--config` or `SSO_CONFIG_PATH`)
//! 3. Environment variables prefixed with `SSO__` (e.g. `SSO__GRPC__PORT=44044`)
//!
//! A `.env` file is read first when present.
//!
//! # Example
//!
//! ```no_run
//! use sso_service::config::Settings;
//!
//! fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load(None)?;
//!     println!("token TTL: {:?}", settings.token_ttl());
//!     Ok(())
//! }
//! ```

use anyhow::{bail, Context, Result};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use validator::Validate;

/// Deployment environment, drives log format and level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Local,
    #[serde(alias = "development")]
    Dev,
    #[serde(alias = "production")]
    Prod,
}

/// Application settings
#[derive(Debug, Deserialize, Validate)]
pub struct Settings {
    #[serde(default)]
    pub env: Environment,

    /// Lifetime of issued session tokens, at most 30 days
    #[serde(default = "default_token_ttl_secs")]
    #[validate(range(min = 1, max = 2_592_000))]
    pub token_ttl_secs: u64,

    #[validate(nested)]
    pub database: DatabaseSettings,

    #[serde(default)]
    #[validate(nested)]
    pub grpc: GrpcSettings,

    #[serde(default)]
    #[validate(nested)]
    pub password: PasswordSettings,
}

impl Settings {
    /// Load settings from defaults, the optional file and `SSO__*` environment variables
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_sources(
            config_path,
            config::Environment::with_prefix("SSO")
                .separator("__")
                .try_parsing(true),
        )
    }

    /// Build settings from an explicit file and environment source
    pub fn from_sources(config_path: Option<&Path>, env: config::Environment) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = config_path {
            if !path.exists() {
                bail!("Config file not found: {}", path.display());
            }
            builder = builder.add_source(config::File::from(path));
        }

        let settings: Settings = builder
            .add_source(env)
            .build()
            .context("Failed to load configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        settings.check()?;
        Ok(settings)
    }

    /// Validate ranges and required values
    pub fn check(&self) -> Result<()> {
        self.validate()
            .context("Configuration validation failed")?;

        if self.database.url.expose_secret().trim().is_empty() {
            bail!("database.url must be set");
        }

        Ok(())
    }

    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_secs)
    }
}

/// Database connection settings
#[derive(Debug, Deserialize, Validate)]
pub struct DatabaseSettings {
    pub url: SecretString,

    #[serde(default = "default_max_connections")]
    #[validate(range(min = 1))]
    pub max_connections: u32,

    #[serde(default = "default_acquire_timeout_secs")]
    #[validate(range(min = 1))]
    pub acquire_timeout_secs: u64,
}

/// gRPC server settings
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GrpcSettings {
    #[serde(default = "default_host")]
    #[validate(length(min = 1))]
    pub host: String,

    #[serde(default = "default_port")]
    #[validate(range(min = 1))]
    pub port: u16,

    /// Per-request deadline enforced by the server
    #[serde(default = "default_timeout_secs")]
    #[validate(range(min = 1))]
    pub timeout_secs: u64,
}

impl GrpcSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for GrpcSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Argon2id work factor
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PasswordSettings {
    #[serde(default = "default_memory_kib")]
    #[validate(range(min = 8))]
    pub memory_kib: u32,

    #[serde(default = "default_iterations")]
    #[validate(range(min = 1))]
    pub iterations: u32,

    #[serde(default = "default_parallelism")]
    #[validate(range(min = 1))]
    pub parallelism: u32,
}

impl Default for PasswordSettings {
    fn default() -> Self {
        Self {
            memory_kib: default_memory_kib(),
            iterations: default_iterations(),
            parallelism: default_parallelism(),
        }
    }
}

fn default_token_ttl_secs() -> u64 {
    3600 // 1 hour
}

fn default_max_connections() -> u32 {
    10
}

fn default_acquire_timeout_secs() -> u64 {
    5
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    44044
}

fn default_timeout_secs() -> u64 {
    10
}

// OWASP baseline for Argon2id
fn default_memory_kib() -> u32 {
    19456
}

fn default_iterations() -> u32 {
    2
}

fn default_parallelism() -> u32 {
    1
}
