//! Cache maintenance commands.

use crate::cache::UrlCache;

/// Outcome of a cache clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearCacheReport {
    /// Entries dropped, stale ones included
    pub removed: usize,
}

/// Drops cached resolutions.
#[derive(Debug)]
pub struct ClearCacheCommand<'a> {
    cache: &'a UrlCache,
}

impl<'a> ClearCacheCommand<'a> {
    pub fn new(cache: &'a UrlCache) -> Self {
        Self { cache }
    }

    /// Remove every cached resolution.
    pub fn execute(&self) -> ClearCacheReport {
        let removed = self.cache.len();
        self.cache.clear_all();
        tracing::info!("Cleared {} cached URL(s)", removed);
        ClearCacheReport { removed }
    }

    /// Remove the cached resolution for one project.
    pub fn invalidate(&self, project: &str) {
        self.cache.invalidate(project);
    }
}
