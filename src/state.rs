use std::sync::Arc;

use crate::commands::{self, Panel};
use crate::error::{Result, TracerError};
use crate::host::{DocumentTracker, HostInfo};
use crate::observer::EventObserver;
use crate::popup::{ClipboardSink, CopyOutcome};
use crate::runtime::{RuntimeEvent, TracerRuntime};
use crate::snapshot::SessionSnapshotBuilder;

/// Everything the activated tracer owns.
///
/// Creating it is the activation step: the observer is started right away.
/// Commands may run outside a Tokio runtime; the popup then skips its
/// clipboard write and selects the JSON block instead.
pub struct AppState {
    pub runtime: Arc<dyn TracerRuntime>,
    pub builder: SessionSnapshotBuilder,
    pub observer: EventObserver,
    pub clipboard: Arc<dyn ClipboardSink>,
    pub panel: Option<Panel>,
}

impl AppState {
    pub fn new(
        host: HostInfo,
        tracker: Arc<dyn DocumentTracker>,
        clipboard: Arc<dyn ClipboardSink>,
        runtime: Arc<dyn TracerRuntime>,
    ) -> Self {
        tracing::info!(version = %host.version, "Session tracer activated");

        let observer = EventObserver::new(tracker.clone());
        observer.start();

        Self {
            runtime,
            builder: SessionSnapshotBuilder::new(host, tracker),
            observer,
            clipboard,
            panel: None,
        }
    }

    /// Execute a command by id.
    pub fn execute(&mut self, command_id: &str) -> Result<()> {
        commands::execute(self, command_id)
    }

    pub fn panel(&self) -> Option<&Panel> {
        self.panel.as_ref()
    }

    /// Wait for the open panel's clipboard write and report it.
    pub async fn finish_copy(&mut self) -> Result<Option<CopyOutcome>> {
        let Some(panel) = self.panel.as_mut() else {
            return Ok(None);
        };

        let outcome = panel.content.wait_for_copy().await;
        if let Some(outcome) = outcome {
            self.runtime.emit(RuntimeEvent::CopyFinished {
                panel_id: panel.id.to_string(),
                outcome,
            })?;
        }
        Ok(outcome)
    }

    /// Close the panel, cancelling its pending clipboard work.
    pub fn close_panel(&mut self) -> Result<()> {
        let mut panel = self
            .panel
            .take()
            .ok_or_else(|| TracerError::PanelNotOpen(commands::PANEL_ID.to_string()))?;
        panel.content.dispose();

        self.runtime.emit(RuntimeEvent::PanelClosed {
            panel_id: panel.id.to_string(),
        })?;
        Ok(())
    }

    pub async fn shutdown(&mut self) -> Result<()> {
        if let Some(panel) = self.panel.as_mut() {
            panel.content.dispose();
        }
        self.observer.stop();
        self.runtime.shutdown().await?;
        tracing::debug!("Session tracer shut down");
        Ok(())
    }
}
