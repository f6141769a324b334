//! Repository inspection through the `git` command line.
//!
//! This module provides the three read-only queries the link builder needs:
//! - Locating the enclosing repository root
//! - Reading the current commit
//! - Reading the primary remote URL

mod error;
mod inspector;

pub use error::InspectError;
pub use inspector::{DEFAULT_REMOTE, GitCli, RepoInspector};
