use anyhow::{Context, Result};
use arboard::Clipboard;

/// Something that can receive a command on the user's clipboard.
pub trait ClipboardWriter {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// The system clipboard, opened lazily on first write.
///
/// On Linux, clipboard contents persist while the application is running,
/// so the handle is kept alive for the whole session.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardWriter for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        if self.inner.is_none() {
            self.inner = Some(Clipboard::new().context("Failed to access system clipboard")?);
        }
        if let Some(clipboard) = self.inner.as_mut() {
            clipboard
                .set_text(text)
                .context("Failed to copy text to clipboard")?;
        }
        Ok(())
    }
}
