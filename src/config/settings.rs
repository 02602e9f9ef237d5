use std::time::Duration;

use serde::Deserialize;

use crate::utils::constants::{
    DEFAULT_REQUEST_TIMEOUT_SECONDS, DEFAULT_SAFETY_MARGIN_SECONDS, DEFAULT_TOKEN_LIFETIME_SECONDS,
};

/// ================================
/// Full gateway configuration
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct GatewayConfig {
    pub backend: BackendConfig,
    #[serde(default)]
    pub settings: SettingsConfig,
}

/// ================================
/// Backend endpoint
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    /// e.g. `https://mq-admin.internal:8080`, without trailing slash
    pub base_url: String,
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// validity of an issued token, counted from a successful login
    #[serde(default = "default_token_lifetime_seconds")]
    pub token_lifetime_seconds: u64,
    /// a cached token is renewed this long before it expires
    /// invariant: < token_lifetime_seconds
    #[serde(default = "default_safety_margin_seconds")]
    pub safety_margin_seconds: u64,
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,
}

impl BackendConfig {
    pub fn new(base_url: &str, username: &str, password: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            username: username.to_owned(),
            password: password.to_owned(),
            token_lifetime_seconds: DEFAULT_TOKEN_LIFETIME_SECONDS,
            safety_margin_seconds: DEFAULT_SAFETY_MARGIN_SECONDS,
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECONDS,
        }
    }

    pub fn token_lifetime(&self) -> Duration {
        Duration::from_secs(self.token_lifetime_seconds)
    }

    pub fn safety_margin(&self) -> Duration {
        Duration::from_secs(self.safety_margin_seconds)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    pub fn login_url(&self) -> String {
        format!("{}/token", self.base_url)
    }
}

/// ================================
/// Global service-wide settings
/// ================================
#[derive(Debug, Deserialize, Clone, Default)]
pub struct SettingsConfig {
    pub logging: Option<LoggingConfig>,
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String, // allowed: trace, debug, info, warn, error
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new (level: String, format: LogFormat) -> Self {
        Self { level, format }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Compact,
}

fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

fn default_token_lifetime_seconds() -> u64 {
    DEFAULT_TOKEN_LIFETIME_SECONDS
}

fn default_safety_margin_seconds() -> u64 {
    DEFAULT_SAFETY_MARGIN_SECONDS
}

fn default_request_timeout_seconds() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECONDS
}
