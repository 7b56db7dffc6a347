// src/config/mod.rs
mod models;

pub use models::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from an optional file (YAML or JSON), then apply
/// environment overrides. With no file, defaults are used as the base.
pub async fn load_config<P: AsRef<Path>>(path: Option<P>) -> Result<Config> {
    let mut config = match path {
        Some(path) => {
            let path = path.as_ref();
            let contents = tokio::fs::read_to_string(path)
                .await
                .context("Failed to read config file")?;

            if path.extension().and_then(|s| s.to_str()) == Some("yaml")
                || path.extension().and_then(|s| s.to_str()) == Some("yml")
            {
                serde_yaml::from_str(&contents).context("Failed to parse YAML config")?
            } else {
                serde_json::from_str(&contents).context("Failed to parse JSON config")?
            }
        }
        None => Config::default(),
    };

    config.apply_env_overrides()?;
    config.validate()?;
    Ok(config)
}
