//! Clipboard sinks for revealed passwords and export payloads.

use crate::errors::{Result, VaultError};

/// Somewhere text can be copied to.
pub trait ClipboardSink {
    fn copy(&mut self, text: &str) -> Result<()>;
}

/// The OS clipboard, via `arboard`.
///
/// On Linux the contents are served by this process, so they may vanish
/// when it exits unless a clipboard manager is running.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let inner = arboard::Clipboard::new()
            .map_err(|e| VaultError::Clipboard(format!("clipboard unavailable: {e}")))?;
        Ok(Self { inner })
    }
}

impl ClipboardSink for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        self.inner
            .set_text(text.to_owned())
            .map_err(|e| VaultError::Clipboard(e.to_string()))
    }
}

/// Records everything copied to it.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    history: Vec<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently copied text.
    pub fn last(&self) -> Option<&str> {
        self.history.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

impl ClipboardSink for MemoryClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        self.history.push(text.to_owned());
        Ok(())
    }
}
