//! Application context for unified dependency injection.

use std::sync::Arc;

use crate::cache::UrlCache;
use crate::commands::{ClearCacheCommand, CopyLinkCommand};
use crate::config::CpcodeConfig;
use crate::git::GitCli;
use crate::lookup::HttpLookup;
use crate::resolver::UrlResolver;

/// Resolver wired to the real git binary and HTTP lookup service.
pub type DefaultResolver = UrlResolver<GitCli, HttpLookup>;

/// Unified application context for dependency injection.
///
/// Owns the configuration and the single URL cache for the process.
/// Frontends create this once and pass it to commands.
#[derive(Debug)]
pub struct AppContext {
    config: CpcodeConfig,
    cache: Arc<UrlCache>,
    resolver: DefaultResolver,
}

impl AppContext {
    /// Create a context with a fresh, empty cache.
    pub fn new(config: CpcodeConfig) -> anyhow::Result<Self> {
        Self::with_cache(config, Arc::new(UrlCache::new()))
    }

    /// Create a context sharing an existing cache.
    pub fn with_cache(config: CpcodeConfig, cache: Arc<UrlCache>) -> anyhow::Result<Self> {
        config.validate()?;
        let inspector = GitCli::new().with_remote(config.remote_name.clone());
        let lookup = HttpLookup::new(config.lookup_timeout())?;
        let resolver = UrlResolver::new(
            Arc::clone(&cache),
            inspector,
            lookup,
            config.cache_timeout,
        );
        Ok(Self {
            config,
            cache,
            resolver,
        })
    }

    pub fn config(&self) -> &CpcodeConfig {
        &self.config
    }

    pub fn cache(&self) -> &Arc<UrlCache> {
        &self.cache
    }

    pub fn resolver(&self) -> &DefaultResolver {
        &self.resolver
    }

    /// Get a CopyLinkCommand using the configured endpoint.
    pub fn copy_link_command(&self) -> CopyLinkCommand<'_, GitCli, HttpLookup> {
        CopyLinkCommand::new(
            &self.resolver,
            self.config.endpoint().map(str::to_string),
        )
    }

    /// Get a ClearCacheCommand.
    pub fn clear_cache_command(&self) -> ClearCacheCommand<'_> {
        ClearCacheCommand::new(&self.cache)
    }
}
