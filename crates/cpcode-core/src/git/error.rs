//! Error types for repository queries

use thiserror::Error;

/// Reason a git query produced no value.
#[derive(Debug, Error)]
pub enum InspectError {
    /// The git binary could not be started
    #[error("Failed to run git {args}: {source}")]
    Spawn {
        args: String,
        #[source]
        source: std::io::Error,
    },

    /// git exited with a non-zero status
    #[error("git {args} failed: {stderr}")]
    Failed { args: String, stderr: String },

    /// git succeeded but printed nothing
    #[error("git {args} returned no output")]
    EmptyOutput { args: String },
}
