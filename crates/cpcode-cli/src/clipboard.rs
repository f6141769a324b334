//! System clipboard backed by arboard.

use anyhow::Context;
use cpcode_core::commands::Clipboard;

/// Writes artifacts to the platform clipboard.
///
/// The arboard handle is opened on first use and kept for the life of the
/// value; on X11 the copied text is only served while it is alive.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> anyhow::Result<()> {
        let clipboard = match self.inner.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new().context("Failed to open the system clipboard")?,
        };
        let clipboard = self.inner.insert(clipboard);
        clipboard
            .set_text(text.to_string())
            .context("Failed to set clipboard text")
    }
}

/// Discards writes; used when the artifact is printed instead.
#[derive(Debug, Default)]
pub struct NoClipboard;

impl Clipboard for NoClipboard {
    fn write_text(&mut self, _text: &str) -> anyhow::Result<()> {
        Ok(())
    }
}
