// src/config.rs
// =============================================================================
// Client configuration, resolved once at startup.
//
// main.rs builds a ClientConfig from the parsed CLI (whose flags already fall
// back to LANGSCOPE_* environment variables) and passes it to ApiClient::new.
// Nothing inside the request code reads the environment on its own.
// =============================================================================

use anyhow::{anyhow, Result};
use clap::ValueEnum;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:3333/api";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Which environment we're running in; decides how failures are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL without a trailing slash, e.g. "http://localhost:3333/api"
    pub api_url: String,
    /// Default per-request timeout
    pub timeout: Duration,
    pub environment: Environment,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            environment: Environment::Development,
        }
    }
}

impl ClientConfig {
    /// Validates the base URL and builds the config.
    pub fn new(api_url: &str, timeout_ms: u64, environment: Environment) -> Result<Self> {
        let parsed = Url::parse(api_url)
            .map_err(|e| anyhow!("Invalid API URL '{}': {}", api_url, e))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(anyhow!("API URL must use http or https: {}", api_url));
        }

        if timeout_ms == 0 {
            return Err(anyhow!("Timeout must be greater than zero"));
        }

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_millis(timeout_ms),
            environment,
        })
    }

    /// Joins a resource path onto the base URL
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }
}
