use std::env;

use auth::HashingCost;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub tokens: TokenConfig,
    #[serde(default)]
    pub password: PasswordConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Token signing configuration.
///
/// Keys are PEM files: a PKCS#8 RSA private key and its SubjectPublicKeyInfo
/// public key. Both are read once at startup.
#[derive(Debug, Deserialize, Clone)]
pub struct TokenConfig {
    pub private_key_path: String,
    pub public_key_path: String,
    #[serde(default = "default_ttl_hours")]
    pub ttl_hours: i64,
}

/// Argon2id cost used for new password hashes.
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        let cost = HashingCost::default();
        Self {
            memory_kib: cost.memory_kib,
            iterations: cost.iterations,
            parallelism: cost.parallelism,
        }
    }
}

impl From<PasswordConfig> for HashingCost {
    fn from(config: PasswordConfig) -> Self {
        Self {
            memory_kib: config.memory_kib,
            iterations: config.iterations,
            parallelism: config.parallelism,
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

/// Ten years.
const MAX_TTL_HOURS: i64 = 10 * 366 * 24;

fn default_ttl_hours() -> i64 {
    7 * 24
}

impl TokenConfig {
    pub fn ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.ttl_hours)
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, TOKENS__TTL_HOURS, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: TOKENS__TTL_HOURS=24 overrides tokens.ttl_hours
            .add_source(Environment::default().separator("__"))
            .build()?;

        configuration.try_deserialize::<Config>()?.validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if !(1..=MAX_TTL_HOURS).contains(&self.tokens.ttl_hours) {
            return Err(ConfigError::Message(format!(
                "tokens.ttl_hours must be between 1 and {}, got {}",
                MAX_TTL_HOURS, self.tokens.ttl_hours
            )));
        }

        Ok(self)
    }
}
