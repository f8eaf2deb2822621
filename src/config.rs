//! Configuration: TOML file, environment overrides, validation.

use crate::errors::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Top-level service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub casino: CasinoConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub request_timeout_secs: u64,
}

/// Tunables for the settlement core.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CasinoConfig {
    /// Balance credited on registration.
    pub welcome_bonus: i64,
    /// Minimum deposit/withdrawal amount.
    pub min_cash_amount: i64,
    /// Maximum deposit/withdrawal amount.
    pub max_cash_amount: i64,
    /// Maximum stake on a single wager. Bounds the prize arithmetic too:
    /// the largest multiplier is 50x, far inside i64 at this cap.
    pub max_stake: i64,
    /// Cap on the recent-history view.
    pub history_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            casino: CasinoConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            allowed_origins: vec!["*".to_string()],
            request_timeout_secs: 30,
        }
    }
}

impl Default for CasinoConfig {
    fn default() -> Self {
        Self {
            welcome_bonus: 5000,
            min_cash_amount: 10,
            max_cash_amount: 1_000_000,
            max_stake: 1_000_000,
            history_limit: 50,
        }
    }
}

/// Loads configuration from an optional TOML file, then applies environment
/// overrides, then validates.
pub struct ConfigLoader {
    config_path: Option<String>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self { config_path: None }
    }

    pub fn with_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_string_lossy().to_string());
        self
    }

    pub fn load(&self) -> CoreResult<Config> {
        let mut config = if let Some(ref path) = self.config_path {
            self.load_from_file(path)?
        } else {
            Config::default()
        };

        self.apply_env_overrides(&mut config)?;
        self.validate(&config)?;

        Ok(config)
    }

    fn load_from_file(&self, path: &str) -> CoreResult<Config> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CoreError::Config(format!("failed to read config {}: {}", path, e))
        })?;
        toml::from_str(&content)
            .map_err(|e| CoreError::Config(format!("failed to parse config: {}", e)))
    }

    fn apply_env_overrides(&self, config: &mut Config) -> CoreResult<()> {
        if let Ok(host) = env::var("ROLLHOUSE_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = env::var("ROLLHOUSE_PORT") {
            config.server.port = port
                .parse()
                .map_err(|_| CoreError::Config(format!("invalid ROLLHOUSE_PORT: {}", port)))?;
        }
        if let Ok(bonus) = env::var("ROLLHOUSE_WELCOME_BONUS") {
            config.casino.welcome_bonus = bonus.parse().map_err(|_| {
                CoreError::Config(format!("invalid ROLLHOUSE_WELCOME_BONUS: {}", bonus))
            })?;
        }
        Ok(())
    }

    fn validate(&self, config: &Config) -> CoreResult<()> {
        if config.server.port == 0 {
            return Err(CoreError::Config("server port must be non-zero".into()));
        }
        if config.casino.welcome_bonus < 0 {
            return Err(CoreError::Config(
                "welcome bonus must be non-negative".into(),
            ));
        }
        if config.casino.min_cash_amount <= 0 {
            return Err(CoreError::Config(
                "minimum cash amount must be positive".into(),
            ));
        }
        if config.casino.max_cash_amount < config.casino.min_cash_amount {
            return Err(CoreError::Config(
                "maximum cash amount must be at least the minimum".into(),
            ));
        }
        if config.casino.max_stake <= 0 {
            return Err(CoreError::Config("maximum stake must be positive".into()));
        }
        if config.casino.history_limit == 0 {
            return Err(CoreError::Config("history limit must be positive".into()));
        }
        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
