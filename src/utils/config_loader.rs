use std::path::Path;
use anyhow::{anyhow, Result};

use crate::GatewayConfig;
use crate::config::proc_loader::file_to_config;

pub fn run(config_path: &str) -> Result<GatewayConfig> {
    let path = Path::new(config_path);
    file_to_config(path).map_err(|e| anyhow!(format!("Invalid config format: {:#}", e)))
}
