//! Clipboard access for exports.

use std::cell::RefCell;
use std::rc::Rc;

/// Destination for exported text.
pub trait ClipboardSink {
    /// Replace the clipboard contents with `text`.
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The system clipboard via `arboard`.
///
/// The handle is opened on first use and kept, since on X11 the contents
/// only live as long as the owning handle.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let clipboard = match self.inner.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new()?,
        };
        self.inner.insert(clipboard).set_text(text.to_owned())?;
        Ok(())
    }
}

/// In-memory clipboard for tests and headless use.
///
/// Clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Rc<RefCell<Option<String>>>,
    fail: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard whose writes always fail.
    pub fn failing() -> Self {
        Self {
            contents: Rc::default(),
            fail: true,
        }
    }

    /// Last text written, if any.
    pub fn contents(&self) -> Option<String> {
        self.contents.borrow().clone()
    }
}

impl ClipboardSink for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.fail {
            return Err(ClipboardError::Unavailable("clipboard disabled".into()));
        }
        *self.contents.borrow_mut() = Some(text.to_owned());
        Ok(())
    }
}

/// Errors writing to the clipboard.
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    /// The platform clipboard rejected the write.
    #[error("clipboard error: {0}")]
    Platform(#[from] arboard::Error),

    /// No clipboard available.
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clipboard_shares_contents() {
        let clipboard = MemoryClipboard::new();
        let mut writer = clipboard.clone();
        writer.set_text("hello").unwrap();
        assert_eq!(clipboard.contents().as_deref(), Some("hello"));
    }

    #[test]
    fn test_failing_clipboard() {
        let mut clipboard = MemoryClipboard::failing();
        assert!(clipboard.set_text("x").is_err());
        assert_eq!(clipboard.contents(), None);
    }
}
