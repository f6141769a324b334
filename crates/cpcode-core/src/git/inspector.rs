//! `git` process invocation for repository queries.

use std::path::{Path, PathBuf};
use std::process::Command;

use super::InspectError;

/// Remote queried when none is configured.
pub const DEFAULT_REMOTE: &str = "origin";

/// Read-only view of the repository a file lives in.
///
/// Every query reports failure as an [`InspectError`] instead of panicking;
/// callers decide whether a missing value is fatal for them.
pub trait RepoInspector {
    /// Locate the root of the repository containing `start_dir`.
    fn find_root(&self, start_dir: &Path) -> Result<PathBuf, InspectError>;

    /// Commit identifier currently checked out at `root`.
    fn current_revision(&self, root: &Path) -> Result<String, InspectError>;

    /// Raw URL of the primary remote, as configured.
    fn remote_url(&self, root: &Path) -> Result<String, InspectError>;
}

impl<T: RepoInspector + ?Sized> RepoInspector for &T {
    fn find_root(&self, start_dir: &Path) -> Result<PathBuf, InspectError> {
        (**self).find_root(start_dir)
    }

    fn current_revision(&self, root: &Path) -> Result<String, InspectError> {
        (**self).current_revision(root)
    }

    fn remote_url(&self, root: &Path) -> Result<String, InspectError> {
        (**self).remote_url(root)
    }
}

/// Inspector backed by the `git` binary on `PATH`.
#[derive(Debug, Clone)]
pub struct GitCli {
    remote: String,
}

impl GitCli {
    /// Create an inspector that reads the `origin` remote.
    pub fn new() -> Self {
        Self {
            remote: DEFAULT_REMOTE.to_string(),
        }
    }

    /// Read a different remote than `origin`.
    pub fn with_remote(mut self, remote: impl Into<String>) -> Self {
        self.remote = remote.into();
        self
    }

    /// Run git in `cwd` and return its trimmed stdout.
    fn git_output(cwd: &Path, args: &[&str]) -> Result<String, InspectError> {
        let output = Command::new("git")
            .args(args)
            .current_dir(cwd)
            .output()
            .map_err(|source| InspectError::Spawn {
                args: args.join(" "),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(InspectError::Failed {
                args: args.join(" "),
                stderr: stderr.trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if stdout.is_empty() {
            return Err(InspectError::EmptyOutput {
                args: args.join(" "),
            });
        }
        Ok(stdout)
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl RepoInspector for GitCli {
    fn find_root(&self, start_dir: &Path) -> Result<PathBuf, InspectError> {
        Self::git_output(start_dir, &["rev-parse", "--show-toplevel"]).map(PathBuf::from)
    }

    fn current_revision(&self, root: &Path) -> Result<String, InspectError> {
        Self::git_output(root, &["rev-parse", "HEAD"])
    }

    fn remote_url(&self, root: &Path) -> Result<String, InspectError> {
        Self::git_output(root, &["remote", "get-url", &self.remote])
    }
}
