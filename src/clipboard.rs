//! Clipboard access for copy-on-double-click

/// Destination for copied cell text
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<(), String>;
}

/// The system clipboard via arboard
///
/// The handle is opened on first use and kept, because on X11 the copied
/// text is only served while it is alive.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), String> {
        let mut clipboard = match self.inner.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new().map_err(|e| e.to_string())?,
        };
        let result = clipboard.set_text(text.to_string()).map_err(|e| e.to_string());
        self.inner = Some(clipboard);
        result
    }
}

/// In-memory clipboard (tests, headless runs)
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
    /// Fail every write with this message
    pub fail_with: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            contents: None,
            fail_with: Some(message.into()),
        }
    }
}

impl ClipboardSink for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), String> {
        if let Some(message) = &self.fail_with {
            return Err(message.clone());
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}
