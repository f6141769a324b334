//! Configuration schema for cpcode.toml

use std::time::Duration;

use serde::Deserialize;

use crate::cache::DEFAULT_CACHE_TIMEOUT_SECS;
use crate::git::DEFAULT_REMOTE;
use crate::lookup::DEFAULT_LOOKUP_TIMEOUT_SECS;

/// Root configuration structure for cpcode.toml
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CpcodeConfig {
    /// Lookup service endpoint; empty means "use the local remote"
    #[serde(default)]
    pub api_endpoint: String,

    /// Cache freshness in seconds (zero or negative disables caching)
    #[serde(default = "default_cache_timeout")]
    pub cache_timeout: i64,

    /// Lookup request deadline in seconds
    #[serde(default = "default_lookup_timeout")]
    pub lookup_timeout: u64,

    /// Remote whose URL is used in local remote mode
    #[serde(default = "default_remote_name")]
    pub remote_name: String,
}

fn default_cache_timeout() -> i64 {
    DEFAULT_CACHE_TIMEOUT_SECS
}

fn default_lookup_timeout() -> u64 {
    DEFAULT_LOOKUP_TIMEOUT_SECS
}

fn default_remote_name() -> String {
    DEFAULT_REMOTE.to_string()
}

impl Default for CpcodeConfig {
    fn default() -> Self {
        Self {
            api_endpoint: String::new(),
            cache_timeout: default_cache_timeout(),
            lookup_timeout: default_lookup_timeout(),
            remote_name: default_remote_name(),
        }
    }
}

impl CpcodeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the lookup endpoint, dropping any trailing `/`.
    pub fn with_api_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.api_endpoint = endpoint.into();
        self.normalize();
        self
    }

    pub fn with_cache_timeout(mut self, seconds: i64) -> Self {
        self.cache_timeout = seconds;
        self
    }

    /// The endpoint, or `None` in local remote mode.
    pub fn endpoint(&self) -> Option<&str> {
        Some(self.api_endpoint.as_str()).filter(|e| !e.is_empty())
    }

    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.lookup_timeout)
    }

    /// Trim values that would otherwise produce malformed lookup URLs.
    pub(crate) fn normalize(&mut self) {
        let trimmed = self.api_endpoint.trim().trim_end_matches('/');
        self.api_endpoint = trimmed.to_string();
    }

    /// Validate the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(endpoint) = self.endpoint() {
            let parsed = url::Url::parse(endpoint)
                .map_err(|e| anyhow::anyhow!("Invalid api_endpoint '{}': {}", endpoint, e))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                anyhow::bail!(
                    "Invalid api_endpoint '{}': scheme must be http or https",
                    endpoint
                );
            }
        }

        if self.lookup_timeout == 0 {
            anyhow::bail!("lookup_timeout must be at least 1 second");
        }

        if self.remote_name.trim().is_empty() {
            anyhow::bail!("remote_name must not be empty");
        }

        Ok(())
    }
}
