//! Session popup: display, clipboard copy and copy feedback.
//!
//! # Lifecycle
//!
//! ```text
//! new(snapshot) / update_session_data(snapshot)
//!        |
//!        v
//!  PopupDisplay::build  (synchronous, always complete first)
//!        |
//!        v
//!  spawn clipboard write ──ok──> "Copied!" + FeedbackTimer (2s) ──> revert
//!                        └─err─> warn! + select JSON block text
//! ```
//!
//! Rebuilding or disposing the popup aborts the pending write and timer.
//! Both only hold weak handles to the display they were started for.

mod clipboard;
mod display;
mod feedback;
mod highlight;

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use tokio::task::JoinHandle;

use crate::snapshot::Snapshot;

pub use clipboard::{default_clipboard, ClipboardError, ClipboardSink, DisabledClipboard};
#[cfg(feature = "system-clipboard")]
pub use clipboard::SystemClipboard;
pub use display::{
    format_local_timestamp, CopyControl, CopyStyle, Header, JsonBlock, PopupDisplay, Summary,
    SummaryRow, COPIED_LABEL, COPY_LABEL, HEADER_CAPTION, HEADER_TITLE,
};
pub use feedback::{FeedbackTimer, FEEDBACK_DURATION};
pub use highlight::{escape_html, highlight_json, strip_tags};

/// Result of one clipboard write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CopyOutcome {
    Copied,
    /// Write failed; the JSON block text was selected instead
    Failed,
}

pub struct PopupRenderer {
    snapshot: Snapshot,
    display: PopupDisplay,
    clipboard: Arc<dyn ClipboardSink>,
    copy_task: Option<JoinHandle<CopyOutcome>>,
    feedback: Arc<Mutex<Option<FeedbackTimer>>>,
}

impl PopupRenderer {
    /// Build the display and start copying the snapshot.
    ///
    /// The clipboard write is spawned on the current Tokio runtime and never
    /// delays construction. Without a runtime the write is skipped and the
    /// JSON block is selected, as for a failed write.
    pub fn new(snapshot: Snapshot, clipboard: Arc<dyn ClipboardSink>) -> Self {
        let display = PopupDisplay::build(&snapshot);
        let mut renderer = Self {
            snapshot,
            display,
            clipboard,
            copy_task: None,
            feedback: Arc::new(Mutex::new(None)),
        };
        renderer.copy_to_clipboard();
        renderer
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn display(&self) -> &PopupDisplay {
        &self.display
    }

    /// Replace the snapshot and rebuild the whole display.
    pub fn update_session_data(&mut self, snapshot: Snapshot) {
        self.cancel_pending();
        self.snapshot = snapshot;
        self.display = PopupDisplay::build(&self.snapshot);
        self.copy_to_clipboard();
    }

    /// Copy the formatted snapshot. Also what the copy control does when clicked.
    pub fn copy_to_clipboard(&mut self) {
        if let Some(task) = self.copy_task.take() {
            task.abort();
        }

        let json_range = 0..self.display.json_block.text.len();
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!("No async runtime, skipping clipboard write");
            *self.display.selection.lock() = Some(json_range);
            return;
        };

        let text = self.snapshot.to_pretty_json();
        let clipboard = self.clipboard.clone();
        let control = Arc::downgrade(&self.display.copy_control);
        let selection = Arc::downgrade(&self.display.selection);
        let feedback = self.feedback.clone();

        self.copy_task = Some(runtime.spawn(async move {
            match clipboard.write_text(text).await {
                Ok(()) => {
                    if let Some(control) = control.upgrade() {
                        control.lock().show_copied();
                    }
                    // Replacing an earlier timer aborts it
                    *feedback.lock() = Some(FeedbackTimer::start(control, FEEDBACK_DURATION));
                    tracing::info!("Session data copied to clipboard");
                    CopyOutcome::Copied
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to copy to clipboard");
                    if let Some(selection) = selection.upgrade() {
                        *selection.lock() = Some(json_range);
                    }
                    CopyOutcome::Failed
                }
            }
        }));
    }

    /// Wait for the pending clipboard write, if any.
    ///
    /// Returns `None` when nothing is pending or the write was cancelled.
    pub async fn wait_for_copy(&mut self) -> Option<CopyOutcome> {
        let task = self.copy_task.as_mut()?;
        let outcome = task.await.ok();
        self.copy_task = None;
        outcome
    }

    /// Whether the copy control is still waiting to revert.
    pub fn pending_feedback(&self) -> bool {
        self.feedback
            .lock()
            .as_ref()
            .map(|timer| !timer.is_finished())
            .unwrap_or(false)
    }

    fn cancel_pending(&mut self) {
        if let Some(task) = self.copy_task.take() {
            task.abort();
        }
        if let Some(timer) = self.feedback.lock().take() {
            timer.cancel();
        }
    }

    /// Cancel the clipboard write and feedback timer. Idempotent.
    pub fn dispose(&mut self) {
        self.cancel_pending();
    }
}

impl Drop for PopupRenderer {
    fn drop(&mut self) {
        self.dispose();
    }
}
