//! cpcode Core Library
//!
//! Builds commit-pinned source links and fenced code snippets from an
//! editor selection, resolving each project's base URL from a lookup
//! service or the repository's own remote, with time-bounded caching.

pub mod cache;
pub mod commands;
pub mod config;
pub mod context;
pub mod git;
pub mod language;
pub mod link;
pub mod lookup;
pub mod remote;
pub mod resolver;
pub mod selection;

/// Re-exports of commonly used types
pub mod prelude {
    // Configuration
    pub use crate::config::{ConfigStore, CpcodeConfig};

    // Cache and resolution
    pub use crate::cache::{CacheEntry, Clock, SystemClock, UrlCache};
    pub use crate::lookup::{HttpLookup, LookupClient, LookupResponse};
    pub use crate::resolver::{
        ResolutionRequest, ResolutionSource, ResolveMode, Resolved, UrlResolver,
    };

    // Repository
    pub use crate::git::{GitCli, InspectError, RepoInspector};

    // Output
    pub use crate::link::{LineRange, LinkArtifact};
    pub use crate::selection::Selection;

    // Commands
    pub use crate::commands::{
        ClearCacheCommand, Clipboard, CopyLinkCommand, CopyLinkError, CopyLinkOptions,
        CopyLinkReport,
    };
    pub use crate::context::AppContext;
}
