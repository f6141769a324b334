//! Editor selection snapshot.

use std::path::{Path, PathBuf};

use crate::link::LineRange;

/// An immutable copy of the editor's current selection.
///
/// Line numbers are 0-based, as editors report them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub file_path: PathBuf,
    pub text: String,
    pub start_line: u32,
    pub end_line: u32,
}

impl Selection {
    pub fn new(
        file_path: impl Into<PathBuf>,
        text: impl Into<String>,
        start_line: u32,
        end_line: u32,
    ) -> Self {
        Self {
            file_path: file_path.into(),
            text: text.into(),
            start_line,
            end_line,
        }
    }

    /// Build a selection from a 0-based inclusive line range of `content`.
    ///
    /// Returns `None` when the range falls outside the content.
    pub fn from_lines(
        file_path: impl Into<PathBuf>,
        content: &str,
        start_line: u32,
        end_line: u32,
    ) -> Option<Self> {
        if end_line < start_line {
            return None;
        }
        let lines: Vec<&str> = content.split_inclusive('\n').collect();
        let start = start_line as usize;
        let end = end_line as usize;
        if end >= lines.len() {
            return None;
        }
        let text: String = lines[start..=end].concat();
        Some(Self::new(file_path, text, start_line, end_line))
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// The 1-based range for the link, or `None` when the lines are reversed
    /// or out of range.
    pub fn line_range(&self) -> Option<LineRange> {
        LineRange::from_zero_based(self.start_line, self.end_line)
    }
}
