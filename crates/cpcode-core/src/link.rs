//! Shareable link and snippet construction.
//!
//! The artifact has a fixed shape that downstream renderers parse:
//!
//! ````text
//! [a.py](https://host/org/repo/blob/abc123/src/a.py#L3)
//!
//! ```python=3
//! x = 1
//! ```
//! ````

use crate::language;

/// A 1-based, inclusive line range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    pub start: u32,
    pub end: u32,
}

impl LineRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Convert 0-based editor line numbers.
    ///
    /// Returns `None` for a reversed range or one that does not fit in `u32`
    /// once shifted.
    pub fn from_zero_based(start: u32, end: u32) -> Option<Self> {
        if end < start {
            return None;
        }
        Some(Self::new(start.checked_add(1)?, end.checked_add(1)?))
    }

    /// The `#L..` fragment for this range.
    pub fn anchor(&self) -> String {
        if self.start == self.end {
            format!("#L{}", self.start)
        } else {
            format!("#L{}-L{}", self.start, self.end)
        }
    }
}

/// The link and rendered snippet for one selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkArtifact {
    pub display_name: String,
    pub url: String,
    pub snippet: String,
}

impl LinkArtifact {
    /// Assemble the link for `relative_path` at `revision` and render the snippet.
    pub fn new(
        base_url: &str,
        revision: &str,
        relative_path: &str,
        filename: &str,
        lines: LineRange,
        selected_text: &str,
    ) -> Self {
        let url = format!(
            "{}/blob/{}/{}{}",
            base_url,
            revision,
            relative_path,
            lines.anchor()
        );
        let mut artifact = Self {
            display_name: filename.to_string(),
            url,
            snippet: String::new(),
        };
        artifact.snippet = artifact.render_snippet(lines.start, selected_text);
        artifact
    }

    /// The `[filename](url)` line.
    pub fn display_line(&self) -> String {
        format!("[{}]({})", self.display_name, self.url)
    }

    pub fn text(&self) -> &str {
        &self.snippet
    }

    fn render_snippet(&self, start_line: u32, selected_text: &str) -> String {
        let mut out = self.display_line();
        out.push_str("\n\n```");
        out.push_str(&language::classify(&self.display_name));
        out.push('=');
        out.push_str(&start_line.to_string());
        out.push('\n');
        out.push_str(selected_text);
        if !selected_text.ends_with('\n') {
            out.push('\n');
        }
        out.push_str("```");
        out
    }
}

/// Build the full artifact text.
pub fn build(
    base_url: &str,
    revision: &str,
    relative_path: &str,
    filename: &str,
    start_line: u32,
    end_line: u32,
    selected_text: &str,
) -> String {
    LinkArtifact::new(
        base_url,
        revision,
        relative_path,
        filename,
        LineRange::new(start_line, end_line),
        selected_text,
    )
    .snippet
}
