//! User-facing failures of the copy-link action

use std::path::PathBuf;

use thiserror::Error;

/// Why a code link could not be produced.
///
/// The display text is suitable for showing to the user as-is.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CopyLinkError {
    #[error("No active editor selection")]
    NoSelection,

    #[error("Select some code first")]
    EmptySelection,

    #[error("Invalid line range: {start}-{end}")]
    InvalidLineRange { start: u32, end: u32 },

    #[error("The current directory is not a Git repository")]
    NotARepository,

    #[error("Could not read the current Git commit")]
    NoRevision,

    #[error("File is outside the repository: {}", .path.display())]
    FileOutsideRepository { path: PathBuf },

    #[error("Could not get the URL for '{project}' from the API")]
    ApiLookupFailed { project: String },

    #[error("Could not get the git remote URL for '{project}'")]
    RemoteLookupFailed { project: String },

    #[error("Failed to write to the clipboard: {0}")]
    Clipboard(String),
}
