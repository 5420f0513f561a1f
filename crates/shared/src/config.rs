//! Application configuration management.

use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Largest scale a `rust_decimal::Decimal` can carry.
pub const MAX_DECIMAL_PLACES: u32 = 28;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// JWT configuration.
    pub jwt: JwtSettings,
    /// Financial computation settings.
    #[serde(default)]
    pub finance: FinanceConfig,
    /// Domain event fan-out settings.
    #[serde(default)]
    pub events: EventsConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// JWT settings as loaded from configuration sources.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    /// Secret key for verifying tokens.
    pub secret: String,
    /// Access token expiration in seconds.
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry_secs: u64,
}

fn default_access_token_expiry() -> u64 {
    900 // 15 minutes
}

/// Financial computation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct FinanceConfig {
    /// Decimal places every computed amount is rounded to.
    #[serde(default = "default_decimal_places")]
    pub currency_decimal_places: u32,
}

impl Default for FinanceConfig {
    fn default() -> Self {
        Self {
            currency_decimal_places: default_decimal_places(),
        }
    }
}

fn default_decimal_places() -> u32 {
    2
}

/// Domain event fan-out settings.
#[derive(Debug, Clone, Deserialize)]
pub struct EventsConfig {
    /// Buffered events per subscriber before lagging ones start dropping.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            channel_capacity: default_channel_capacity(),
        }
    }
}

fn default_channel_capacity() -> usize {
    1024
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Configuration` if configuration cannot be loaded
    /// or fails validation.
    pub fn load() -> AppResult<Self> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("TRADELINE").separator("__"))
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the engine cannot run with.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Configuration` naming the offending setting.
    pub fn validate(&self) -> AppResult<()> {
        if self.finance.currency_decimal_places > MAX_DECIMAL_PLACES {
            return Err(AppError::Configuration(format!(
                "finance.currency_decimal_places must be at most {MAX_DECIMAL_PLACES}, got {}",
                self.finance.currency_decimal_places
            )));
        }
        if self.events.channel_capacity == 0 {
            return Err(AppError::Configuration(
                "events.channel_capacity must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
