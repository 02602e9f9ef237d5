//! Configuration validation with aggregated errors.
//! All issues are collected into a `Vec<String>` so a broken config file
//! is reported in one pass instead of one error per restart.

use tracing::{error, info};

use crate::config::settings::{BackendConfig, GatewayConfig, SettingsConfig};
use crate::utils::constants::MAX_TOKEN_LIFETIME_SECONDS;

const ALLOWED_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Public entrypoint: returns Ok(()) or Err(Vec<String>) containing all issues.
pub fn validate_gateway_config(cfg: &GatewayConfig) -> Result<(), Vec<String>> {
    let mut errors: Vec<String> = Vec::new();

    validate_backend(&cfg.backend, &mut errors);
    validate_settings(&cfg.settings, &mut errors);

    if errors.is_empty() {
        info!("config validation passed");
        Ok(())
    } else {
        for e in &errors {
            error!("config validation: {}", e);
        }
        Err(errors)
    }
}

fn validate_backend(backend: &BackendConfig, errors: &mut Vec<String>) {
    let base_url = backend.base_url.trim();
    if base_url.is_empty() {
        errors.push("backend.base_url must not be empty".to_string());
    } else if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        errors.push(format!(
            "backend.base_url '{}' must start with http:// or https://",
            base_url
        ));
    }

    if backend.username.trim().is_empty() {
        errors.push("backend.username must not be empty".to_string());
    }

    if backend.token_lifetime_seconds == 0 {
        errors.push("backend.token_lifetime_seconds must be > 0".to_string());
    } else if backend.token_lifetime_seconds > MAX_TOKEN_LIFETIME_SECONDS {
        errors.push(format!(
            "backend.token_lifetime_seconds ({}) must not exceed {}",
            backend.token_lifetime_seconds, MAX_TOKEN_LIFETIME_SECONDS
        ));
    }
    if backend.safety_margin_seconds >= backend.token_lifetime_seconds {
        errors.push(format!(
            "backend.safety_margin_seconds ({}) must be less than token_lifetime_seconds ({})",
            backend.safety_margin_seconds, backend.token_lifetime_seconds
        ));
    }
    if backend.request_timeout_seconds == 0 {
        errors.push("backend.request_timeout_seconds must be > 0".to_string());
    }
}

fn validate_settings(settings: &SettingsConfig, errors: &mut Vec<String>) {
    if let Some(logging) = &settings.logging {
        let level = logging.level.to_lowercase();
        if !ALLOWED_LOG_LEVELS.contains(&level.as_str()) {
            errors.push(format!(
                "settings.logging.level '{}' is invalid (allowed: {})",
                logging.level,
                ALLOWED_LOG_LEVELS.join(", ")
            ));
        }
    }
}
