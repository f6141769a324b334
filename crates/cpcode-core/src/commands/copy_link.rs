//! Copy code link command implementation.
//!
//! Turns an editor selection into a commit-pinned link plus a fenced
//! snippet and hands it to the clipboard.

use std::path::{Component, Path, PathBuf};

use crate::git::RepoInspector;
use crate::link::{LineRange, LinkArtifact};
use crate::lookup::LookupClient;
use crate::resolver::{ResolutionRequest, ResolutionSource, ResolveMode, UrlResolver};
use crate::selection::Selection;

use super::CopyLinkError;

/// Destination for the finished artifact.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> anyhow::Result<()>;
}

/// Options for a copy-link action
#[derive(Debug, Clone, Default)]
pub struct CopyLinkOptions {
    /// Directory git queries start from (defaults to the file's directory)
    pub workspace_root: Option<PathBuf>,
    /// Ignore any cached base URL
    pub force_refresh: bool,
}

impl CopyLinkOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_workspace_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.workspace_root = Some(root.into());
        self
    }

    pub fn with_force_refresh(mut self, force_refresh: bool) -> Self {
        self.force_refresh = force_refresh;
        self
    }
}

/// Result of a successful copy-link action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyLinkReport {
    pub artifact: LinkArtifact,
    /// Project name used as the cache key
    pub project: String,
    pub lines: LineRange,
    pub source: ResolutionSource,
}

/// The copy-link action.
#[derive(Debug)]
pub struct CopyLinkCommand<'a, I, L> {
    resolver: &'a UrlResolver<I, L>,
    api_endpoint: Option<String>,
}

impl<'a, I: RepoInspector, L: LookupClient> CopyLinkCommand<'a, I, L> {
    /// `api_endpoint` selects the lookup service; `None` or empty uses the local remote.
    pub fn new(resolver: &'a UrlResolver<I, L>, api_endpoint: Option<String>) -> Self {
        Self {
            resolver,
            api_endpoint,
        }
    }

    /// Build the artifact and write it to `clipboard`.
    pub async fn execute(
        &self,
        selection: Option<&Selection>,
        options: &CopyLinkOptions,
        clipboard: &mut dyn Clipboard,
    ) -> Result<CopyLinkReport, CopyLinkError> {
        let report = self.build(selection, options).await?;
        clipboard
            .write_text(report.artifact.text())
            .map_err(|e| CopyLinkError::Clipboard(format!("{:#}", e)))?;
        Ok(report)
    }

    /// Build the artifact without touching the clipboard.
    pub async fn build(
        &self,
        selection: Option<&Selection>,
        options: &CopyLinkOptions,
    ) -> Result<CopyLinkReport, CopyLinkError> {
        let selection = selection.ok_or(CopyLinkError::NoSelection)?;
        if selection.is_empty() {
            return Err(CopyLinkError::EmptySelection);
        }
        let lines = selection
            .line_range()
            .ok_or(CopyLinkError::InvalidLineRange {
                start: selection.start_line,
                end: selection.end_line,
            })?;

        let inspector = self.resolver.inspector();
        let start_dir = options
            .workspace_root
            .clone()
            .unwrap_or_else(|| parent_dir(selection.file_path()));

        let root = inspector.find_root(&start_dir).map_err(|err| {
            tracing::debug!("No repository at {}: {}", start_dir.display(), err);
            CopyLinkError::NotARepository
        })?;

        let project = project_name(&root);
        let relative_path = relative_path(&root, selection.file_path()).ok_or_else(|| {
            CopyLinkError::FileOutsideRepository {
                path: selection.file_path().to_path_buf(),
            }
        })?;
        let filename = selection
            .file_path()
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let revision = inspector.current_revision(&root).map_err(|err| {
            tracing::debug!("No revision at {}: {}", root.display(), err);
            CopyLinkError::NoRevision
        })?;

        let request = ResolutionRequest {
            api_endpoint: self.api_endpoint.clone(),
            project_name: project.clone(),
            force_refresh: options.force_refresh,
            local_remote_hint: Some(root.clone()),
        };
        let resolved = match self.resolver.resolve_with_source(&request).await {
            Some(resolved) => resolved,
            None => {
                return Err(match request.mode() {
                    ResolveMode::Api => CopyLinkError::ApiLookupFailed { project },
                    ResolveMode::LocalRemote => CopyLinkError::RemoteLookupFailed { project },
                });
            }
        };

        let artifact = LinkArtifact::new(
            &resolved.url,
            &revision,
            &relative_path,
            &filename,
            lines,
            &selection.text,
        );
        tracing::info!("Built link for {} {}", project, artifact.url);

        Ok(CopyLinkReport {
            artifact,
            project,
            lines,
            source: resolved.source,
        })
    }
}

fn parent_dir(file: &Path) -> PathBuf {
    match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// The repository's directory name.
fn project_name(root: &Path) -> String {
    root.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.to_string_lossy().into_owned())
}

/// `file` relative to `root`, with `/` separators.
///
/// Both paths are canonicalized when they exist so symlinked checkouts
/// still line up with the root git reports.
fn relative_path(root: &Path, file: &Path) -> Option<String> {
    let root = std::fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
    let file = std::fs::canonicalize(file).unwrap_or_else(|_| file.to_path_buf());
    let relative = file.strip_prefix(&root).ok()?;

    let parts: Vec<String> = relative
        .components()
        .map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Option<_>>()?;
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}
