//! Base URL resolution with caching.
//!
//! A project's base URL comes from one of two places: the lookup service
//! when an endpoint is configured, or the repository's own remote
//! otherwise. Successful results are cached per project name.

use std::path::PathBuf;
use std::sync::Arc;

use crate::cache::UrlCache;
use crate::git::RepoInspector;
use crate::lookup::{self, LookupClient};
use crate::remote;

/// Where a base URL is looked up when the cache misses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveMode {
    /// Ask the lookup service
    Api,
    /// Read the repository's configured remote
    LocalRemote,
}

/// Where a resolved URL actually came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSource {
    Cache,
    Api,
    LocalRemote,
}

/// A resolved base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub url: String,
    pub source: ResolutionSource,
}

/// Input for a single resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRequest {
    /// Lookup service endpoint; empty or absent selects the local remote
    pub api_endpoint: Option<String>,
    /// Cache key and lookup path segment
    pub project_name: String,
    /// Skip the cache read (the result is still stored)
    pub force_refresh: bool,
    /// Repository root to read the remote from in local remote mode
    pub local_remote_hint: Option<PathBuf>,
}

impl ResolutionRequest {
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            api_endpoint: None,
            project_name: project_name.into(),
            force_refresh: false,
            local_remote_hint: None,
        }
    }

    pub fn with_api_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.api_endpoint = Some(endpoint.into());
        self
    }

    pub fn with_force_refresh(mut self, force_refresh: bool) -> Self {
        self.force_refresh = force_refresh;
        self
    }

    pub fn with_local_remote_hint(mut self, root: impl Into<PathBuf>) -> Self {
        self.local_remote_hint = Some(root.into());
        self
    }

    /// The configured endpoint, ignoring an empty string.
    pub fn endpoint(&self) -> Option<&str> {
        self.api_endpoint.as_deref().filter(|e| !e.is_empty())
    }

    pub fn mode(&self) -> ResolveMode {
        if self.endpoint().is_some() {
            ResolveMode::Api
        } else {
            ResolveMode::LocalRemote
        }
    }
}

/// Resolves project base URLs through the cache, the lookup service or
/// the local remote.
#[derive(Debug)]
pub struct UrlResolver<I, L> {
    cache: Arc<UrlCache>,
    inspector: I,
    lookup: L,
    cache_timeout_secs: i64,
}

impl<I: RepoInspector, L: LookupClient> UrlResolver<I, L> {
    pub fn new(cache: Arc<UrlCache>, inspector: I, lookup: L, cache_timeout_secs: i64) -> Self {
        Self {
            cache,
            inspector,
            lookup,
            cache_timeout_secs,
        }
    }

    pub fn cache(&self) -> &Arc<UrlCache> {
        &self.cache
    }

    pub fn inspector(&self) -> &I {
        &self.inspector
    }

    /// Resolve the base URL for a project, or `None` if it cannot be found.
    pub async fn resolve(&self, request: &ResolutionRequest) -> Option<String> {
        self.resolve_with_source(request)
            .await
            .map(|resolved| resolved.url)
    }

    /// Like [`resolve`](Self::resolve), also reporting where the URL came from.
    pub async fn resolve_with_source(&self, request: &ResolutionRequest) -> Option<Resolved> {
        let project = request.project_name.as_str();

        if !request.force_refresh
            && let Some(url) = self.cache.get(project, self.cache_timeout_secs)
        {
            tracing::debug!("Using cached URL for {}", project);
            return Some(Resolved {
                url,
                source: ResolutionSource::Cache,
            });
        }

        let resolved = match request.endpoint() {
            Some(endpoint) => self
                .from_lookup_service(endpoint, project)
                .await
                .map(|url| Resolved {
                    url,
                    source: ResolutionSource::Api,
                }),
            None => self.from_local_remote(request).map(|url| Resolved {
                url,
                source: ResolutionSource::LocalRemote,
            }),
        }?;

        self.cache.put(project, resolved.url.clone());
        Some(resolved)
    }

    fn from_local_remote(&self, request: &ResolutionRequest) -> Option<String> {
        let Some(root) = request.local_remote_hint.as_deref() else {
            tracing::error!(
                "Local remote resolution for {} requires a repository root",
                request.project_name
            );
            return None;
        };

        match self.inspector.remote_url(root) {
            Ok(raw) => Some(remote::normalize(&raw)),
            Err(err) => {
                tracing::warn!("No remote URL for {}: {}", request.project_name, err);
                None
            }
        }
    }

    async fn from_lookup_service(&self, endpoint: &str, project: &str) -> Option<String> {
        let url = lookup::lookup_url(endpoint, project);
        tracing::debug!("Looking up {} via {}", project, url);

        let body = match self.lookup.get(&url).await {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!("Lookup request failed for {}: {:#}", project, err);
                return None;
            }
        };

        match lookup::parse_response(&body) {
            Ok(response) => {
                let found = response.url().map(str::to_string);
                if found.is_none() {
                    tracing::info!("Lookup service has no URL for {}", project);
                }
                found
            }
            Err(err) => {
                tracing::warn!("Lookup response for {} was unusable: {:#}", project, err);
                None
            }
        }
    }
}
