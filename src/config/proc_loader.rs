use std::{fs, path::Path};
use crate::config::settings::{GatewayConfig, LogFormat, LoggingConfig};
use crate::config::proc_validator;
use crate::utils::constants::DEFAULT_LOG_LEVEL;
use anyhow::{anyhow, Context, Result};
use regex::Regex;
use tracing::{debug, error};

/// Load and validate config from YAML file
pub fn file_to_config(path: &Path) -> Result<GatewayConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("cannot read config file {}", path.display()))?;

    let expanded = expand_env_vars(&content)?;
    parse_config(&expanded)
}

pub fn parse_config(content: &str) -> Result<GatewayConfig> {
    let mut gateway_config: GatewayConfig = serde_yaml::from_str(content)
        .inspect_err(|e| {
            error!("parse config error: {}", e);
        })?;

    // Apply defaults
    if gateway_config.settings.logging.is_none() {
        gateway_config.settings.logging = Some(LoggingConfig::new(DEFAULT_LOG_LEVEL.to_owned(), LogFormat::Compact));
    }
    gateway_config.backend.base_url = gateway_config.backend.base_url.trim_end_matches('/').to_owned();

    debug!("validation config ...");
    proc_validator::validate_gateway_config(&gateway_config)
        .map_err(|errors| anyhow!("config validation failed: {}", errors.join("; ")))?;

    Ok(gateway_config)
}

/// Replaces `${VAR}` and `${VAR:default}` with values from the environment.
fn expand_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{(\w+)(?::([^\}]+))?\}")?;
    let expanded = re.replace_all(input, |caps: &regex::Captures| {
        let var = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        std::env::var(var).unwrap_or_else(|_| default.to_string())
    })
    .to_string();
    Ok(expanded)
}
