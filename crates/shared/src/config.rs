//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// JWT configuration.
    pub jwt: JwtConfig,
    /// SMS gateway configuration.
    #[serde(default)]
    pub sms: SmsConfig,
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

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// JWT configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Access token expiration in seconds.
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry_secs: u64,
}

fn default_access_token_expiry() -> u64 {
    86_400 // 1 day
}

/// Which SMS transport delivers OTP codes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmsProvider {
    /// Writes the OTP to the log instead of sending it. Development only.
    #[default]
    Log,
    /// Posts the OTP to an HTTP SMS gateway.
    Http,
}

/// SMS gateway configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SmsConfig {
    /// Transport used for OTP delivery.
    #[serde(default)]
    pub provider: SmsProvider,
    /// Gateway endpoint (required for the `http` provider).
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Gateway API key.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Sender identifier shown on the handset.
    #[serde(default = "default_sender_id")]
    pub sender_id: String,
    /// Seconds to wait for the gateway before giving up.
    #[serde(default = "default_sms_timeout")]
    pub timeout_secs: u64,
}

fn default_sender_id() -> String {
    "EXPNSA".to_string()
}

fn default_sms_timeout() -> u64 {
    10
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            provider: SmsProvider::default(),
            endpoint: None,
            api_key: None,
            sender_id: default_sender_id(),
            timeout_secs: default_sms_timeout(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("EXPENSA").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
