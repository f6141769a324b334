//! Lookup service transport.
//!
//! The service answers `GET {endpoint}/{project}` with a JSON object whose
//! `original_url` field holds the project's base URL.

use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

/// Default deadline for a lookup request, in seconds.
pub const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 5;

/// Body returned by the lookup service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LookupResponse {
    #[serde(default)]
    pub original_url: Option<String>,
}

impl LookupResponse {
    /// The usable URL, if any.
    ///
    /// The service has been seen to serialize a missing URL as the string
    /// `"null"`, which is treated the same as an absent field.
    pub fn url(&self) -> Option<&str> {
        self.original_url
            .as_deref()
            .filter(|url| !url.is_empty() && *url != "null")
    }
}

/// Performs a GET and returns the response body.
#[allow(async_fn_in_trait)]
pub trait LookupClient {
    async fn get(&self, url: &str) -> anyhow::Result<String>;
}

impl<T: LookupClient> LookupClient for &T {
    async fn get(&self, url: &str) -> anyhow::Result<String> {
        (**self).get(url).await
    }
}

/// HTTP lookup client backed by reqwest.
#[derive(Debug, Clone)]
pub struct HttpLookup {
    client: reqwest::Client,
}

impl HttpLookup {
    /// Build a client with the given request deadline.
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("cpcode/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

impl LookupClient for HttpLookup {
    async fn get(&self, url: &str) -> anyhow::Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", url))?;

        if !response.status().is_success() {
            anyhow::bail!("Lookup failed: HTTP {} from {}", response.status(), url);
        }

        response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {}", url))
    }
}

/// Join an endpoint and a project name with a single `/`.
pub fn lookup_url(endpoint: &str, project_name: &str) -> String {
    format!("{}/{}", endpoint, project_name)
}

/// Decode a lookup response body.
pub fn parse_response(body: &str) -> anyhow::Result<LookupResponse> {
    serde_json::from_str(body).context("Failed to parse lookup response")
}
