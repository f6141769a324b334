//! Helpers shared by one-shot commands and the serve session.

use std::path::{Path, PathBuf};

use anyhow::Context;
use cpcode_core::commands::CopyLinkReport;
use cpcode_core::selection::Selection;

/// Read `file` and select the 0-based inclusive line range.
pub fn selection_from_file(file: &Path, start_line: u32, end_line: u32) -> anyhow::Result<Selection> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read file: {}", file.display()))?;
    Selection::from_lines(file, &content, start_line, end_line).ok_or_else(|| {
        anyhow::anyhow!(
            "Lines {}-{} are outside {}",
            u64::from(start_line) + 1,
            u64::from(end_line) + 1,
            file.display()
        )
    })
}

/// Make `file` absolute so the repository-relative path can be derived.
pub fn absolute_file(file: &Path) -> anyhow::Result<PathBuf> {
    std::path::absolute(file)
        .with_context(|| format!("Failed to resolve path: {}", file.display()))
}

pub fn copied_message(report: &CopyLinkReport) -> String {
    format!(
        "Copied to clipboard: {} L{}-L{}",
        report.artifact.display_name, report.lines.start, report.lines.end
    )
}

pub const CACHE_CLEARED_MESSAGE: &str = "Cache cleared";
