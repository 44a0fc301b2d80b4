//! Clipboard access and the marker-prefix watcher

mod watcher;

pub use watcher::{ClipboardWatcher, DEFAULT_INTERVAL, MARKER, STOP_TIMEOUT, strip_marker};

use arboard::Clipboard;

/// Error type for clipboard operations
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("Failed to access clipboard: {0}")]
    Access(String),

    #[error("Failed to read clipboard: {0}")]
    Read(String),

    #[error("Failed to copy to clipboard: {0}")]
    Write(String),
}

/// Text clipboard operations
pub trait ClipboardAccess {
    fn get_text(&mut self) -> Result<String, ClipboardError>;
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The system clipboard through arboard.
///
/// A fresh handle is opened per call so the value can move between threads
/// and never holds the clipboard open.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl ClipboardAccess for SystemClipboard {
    fn get_text(&mut self) -> Result<String, ClipboardError> {
        let mut clipboard = Clipboard::new().map_err(|e| ClipboardError::Access(e.to_string()))?;
        clipboard
            .get_text()
            .map_err(|e| ClipboardError::Read(e.to_string()))
    }

    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard = Clipboard::new().map_err(|e| ClipboardError::Access(e.to_string()))?;
        clipboard
            .set_text(text)
            .map_err(|e| ClipboardError::Write(e.to_string()))
    }
}

/// Copy `text` to the system clipboard
pub fn copy_text(text: &str) -> Result<(), ClipboardError> {
    SystemClipboard.set_text(text)
}
