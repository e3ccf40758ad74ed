//! Clipboard capability used by the popup.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("Clipboard write rejected: {0}")]
    Rejected(String),
}

/// Destination for copied snapshot text.
///
/// # Object Safety
/// Used as `Arc<dyn ClipboardSink>`; the write runs inside a spawned task.
#[async_trait]
pub trait ClipboardSink: Send + Sync + 'static {
    async fn write_text(&self, text: String) -> Result<(), ClipboardError>;
}

/// Sink for environments without a clipboard. Every write fails, which
/// sends the popup down its manual-selection fallback.
pub struct DisabledClipboard;

#[async_trait]
impl ClipboardSink for DisabledClipboard {
    async fn write_text(&self, _text: String) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable("clipboard disabled".to_string()))
    }
}

/// OS clipboard through `arboard`.
///
/// `arboard` calls block, so each write runs on the blocking pool with its
/// own clipboard handle.
#[cfg(feature = "system-clipboard")]
pub struct SystemClipboard;

#[cfg(feature = "system-clipboard")]
#[async_trait]
impl ClipboardSink for SystemClipboard {
    async fn write_text(&self, text: String) -> Result<(), ClipboardError> {
        tokio::task::spawn_blocking(move || {
            let mut clipboard = arboard::Clipboard::new()
                .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
            clipboard
                .set_text(text)
                .map_err(|e| ClipboardError::Rejected(e.to_string()))
        })
        .await
        .map_err(|e| ClipboardError::Unavailable(format!("clipboard task failed: {}", e)))?
    }
}

/// The best clipboard available in this build.
pub fn default_clipboard() -> std::sync::Arc<dyn ClipboardSink> {
    #[cfg(feature = "system-clipboard")]
    {
        std::sync::Arc::new(SystemClipboard)
    }
    #[cfg(not(feature = "system-clipboard"))]
    {
        std::sync::Arc::new(DisabledClipboard)
    }
}
