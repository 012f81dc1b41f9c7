mod types;

pub use types::*;

use crate::{Error, Result};
use std::{env, path::Path};
use tracing::debug;

/// Loads the deploy-time configuration.
///
/// The YAML file at `CONFIG_PATH` (default `config.yaml`) is optional; when it
/// is absent every field takes its compiled-in default. `PORT` overrides
/// `server.port`.
pub async fn load() -> Result<Config> {
    dotenvy::dotenv().ok();

    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());
    let mut config = load_from(&config_path).await?;

    if let Ok(port) = env::var("PORT") {
        config.server.port = parse_port(&port)?;
    }

    Ok(config)
}

pub async fn load_from(config_path: &str) -> Result<Config> {
    if !Path::new(config_path).exists() {
        debug!("No configuration file at {}, using defaults", config_path);
        return Ok(Config::default());
    }

    debug!("Loading configuration from: {}", config_path);

    let config_str = tokio::fs::read_to_string(config_path).await?;
    if config_str.trim().is_empty() {
        return Ok(Config::default());
    }
    let config: Config = serde_yaml::from_str(&config_str)?;

    if config.upstream.history_limit == 0 {
        return Err(Error::config("upstream.history_limit must be at least 1"));
    }

    Ok(config)
}

pub fn parse_port(value: &str) -> Result<u16> {
    value
        .trim()
        .parse::<u16>()
        .map_err(|_| Error::config(format!("Invalid PORT value: '{}'", value)))
}
