// src/config/models.rs
use anyhow::{ensure, Context, Result};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// Environment variable that overrides the configured base URL.
pub const BASE_URL_ENV: &str = "STATUSPROBE_BASE_URL";

/// Target used when neither a config file nor the environment names one.
const DEFAULT_BASE_URL: &str = "https://127.0.0.1:8000";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Scheme and authority of the service under test.
    #[serde(default = "default_base_url")]
    pub base_url: Url,

    /// Path prefix in front of every endpoint.
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    /// Per-request timeout in seconds, applied to the shared client.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub load: LoadConfig,

    /// How long the persistence check waits between create and read-back.
    #[serde(default = "default_persistence_wait_ms")]
    pub persistence_wait_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoadConfig {
    /// Requests fanned out by the concurrent-load check.
    #[serde(default = "default_load_requests")]
    pub requests: usize,

    /// Worker pool bound for the fan-out.
    #[serde(default = "default_load_workers")]
    pub workers: usize,

    /// Minimum number of 200 responses for the check to pass.
    #[serde(default = "default_load_threshold")]
    pub success_threshold: usize,
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid")
}

fn default_api_prefix() -> String {
    "/api".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_persistence_wait_ms() -> u64 {
    500
}

fn default_load_requests() -> usize {
    10
}

fn default_load_workers() -> usize {
    10
}

fn default_load_threshold() -> usize {
    8
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_prefix: default_api_prefix(),
            request_timeout_secs: default_request_timeout_secs(),
            load: LoadConfig::default(),
            persistence_wait_ms: default_persistence_wait_ms(),
        }
    }
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            requests: default_load_requests(),
            workers: default_load_workers(),
            success_threshold: default_load_threshold(),
        }
    }
}

impl Config {
    /// Base URL joined with the API prefix, without a trailing slash.
    pub fn api_base(&self) -> String {
        format!(
            "{}{}",
            self.base_url.as_str().trim_end_matches('/'),
            self.api_prefix
        )
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn persistence_wait(&self) -> Duration {
        Duration::from_millis(self.persistence_wait_ms)
    }

    /// Environment values win over file and default values.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(raw) = std::env::var(BASE_URL_ENV) {
            self.base_url = Url::parse(&raw)
                .with_context(|| format!("{} is not a valid URL: {}", BASE_URL_ENV, raw))?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            matches!(self.base_url.scheme(), "http" | "https"),
            "base_url must be http or https, got {}",
            self.base_url.scheme()
        );
        ensure!(
            self.api_prefix.starts_with('/'),
            "api_prefix must start with '/'"
        );
        ensure!(
            self.request_timeout_secs > 0,
            "request_timeout_secs must be positive"
        );
        ensure!(self.load.requests > 0, "load.requests must be positive");
        ensure!(self.load.workers > 0, "load.workers must be positive");
        ensure!(
            self.load.success_threshold <= self.load.requests,
            "load.success_threshold cannot exceed load.requests"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate_and_join_the_prefix() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.api_base(), "https://127.0.0.1:8000/api");
        assert_eq!(config.load.requests, 10);
        assert_eq!(config.load.success_threshold, 8);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn api_base_drops_trailing_slash_before_prefix() {
        let mut config = Config::default();
        config.base_url = Url::parse("https://svc.example.com/").unwrap();
        assert_eq!(config.api_base(), "https://svc.example.com/api");
    }

    #[test]
    fn env_override_replaces_base_url() {
        std::env::set_var(BASE_URL_ENV, "http://10.0.0.7:9001");
        let mut config = Config::default();
        config.apply_env_overrides().unwrap();
        std::env::remove_var(BASE_URL_ENV);
        assert_eq!(config.base_url.as_str(), "http://10.0.0.7:9001/");
    }

    #[test]
    fn validate_rejects_threshold_above_request_count() {
        let mut config = Config::default();
        config.load.success_threshold = config.load.requests + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_http_scheme() {
        let mut config = Config::default();
        config.base_url = Url::parse("ftp://files.example.com").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_yaml_yields_defaults() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.api_base(), Config::default().api_base());
    }
}
