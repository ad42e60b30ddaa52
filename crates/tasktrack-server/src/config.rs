//! Configuration loading
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `TASKTRACK__`-prefixed environment variables (`__` separates sections,
//! e.g. `TASKTRACK__AUTH__JWT_SECRET`).

use anyhow::{Context, Result, bail};
use config::{Environment, File, FileFormat, Map};
use serde::{Deserialize, Serialize};
use tasktrack_auth::DEFAULT_TOKEN_EXPIRY_HOURS;
use tracing::warn;

/// Prefix for environment overrides
const ENV_PREFIX: &str = "TASKTRACK";

/// Secrets shorter than this are accepted but logged as weak
const MIN_RECOMMENDED_SECRET_LEN: usize = 32;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_url")]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_db_url(),
            max_connections: default_max_connections(),
        }
    }
}

/// Authentication configuration
///
/// There is no default secret: it must come from the config
/// file or the environment.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub jwt_secret: String,
    #[serde(default = "default_token_expiry_hours")]
    pub token_expiry_hours: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_expiry_hours: default_token_expiry_hours(),
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("token_expiry_hours", &self.token_expiry_hours)
            .finish()
    }
}

/// Cross-origin configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// `pretty` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

// Default value functions
fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_db_url() -> String {
    "sqlite:./data/tasktrack.db?mode=rwc".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_token_expiry_hours() -> i64 {
    DEFAULT_TOKEN_EXPIRY_HOURS
}

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string()]
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Config {
    /// Load configuration from an optional file plus the process environment
    pub fn load(path: &str) -> Result<Self> {
        Self::load_from(path, None)
    }

    /// Load configuration, reading overrides from `env` instead of the
    /// process environment when given
    fn load_from(path: &str, env: Option<Map<String, String>>) -> Result<Self> {
        // Values stay strings until deserialization so a numeric-looking
        // secret is not reinterpreted
        config::Config::builder()
            .add_source(File::new(path, FileFormat::Toml).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .source(env),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path))?
            .try_deserialize()
            .with_context(|| format!("Failed to parse configuration from {}", path))
    }

    /// Check values that have no safe default
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.trim().is_empty() {
            bail!(
                "auth.jwt_secret is not set; provide it in the config file or via {}__AUTH__JWT_SECRET",
                ENV_PREFIX
            );
        }
        if self.auth.jwt_secret.len() < MIN_RECOMMENDED_SECRET_LEN {
            warn!(
                "auth.jwt_secret is shorter than {} bytes; use a longer random secret",
                MIN_RECOMMENDED_SECRET_LEN
            );
        }
        // Upper bound keeps the chrono duration arithmetic in range
        if !(1..=24 * 365).contains(&self.auth.token_expiry_hours) {
            bail!(
                "auth.token_expiry_hours must be between 1 and {}, got {}",
                24 * 365,
                self.auth.token_expiry_hours
            );
        }
        if self.database.max_connections == 0 {
            bail!("database.max_connections must be at least 1");
        }
        if self.cors.allowed_origins.is_empty() {
            warn!("cors.allowed_origins is empty; browsers will not be able to call the API");
        }
        Ok(())
    }
}
