use super::{RuntimeError, RuntimeEvent, TracerRuntime};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::any::Any;
use tokio::sync::mpsc;

pub struct CliRuntime {
    event_tx: RwLock<mpsc::UnboundedSender<RuntimeEvent>>,
    json_mode: bool,
}

impl CliRuntime {
    pub fn new(event_tx: mpsc::UnboundedSender<RuntimeEvent>, json_mode: bool) -> Self {
        Self {
            event_tx: RwLock::new(event_tx),
            json_mode,
        }
    }

    /// Replace the event sender (used when the output loop is restarted)
    pub fn replace_event_tx(&self, new_tx: mpsc::UnboundedSender<RuntimeEvent>) {
        *self.event_tx.write() = new_tx;
    }
}

#[async_trait]
impl TracerRuntime for CliRuntime {
    fn emit(&self, event: RuntimeEvent) -> Result<(), RuntimeError> {
        // Send to channel for CLI event handler to process
        self.event_tx
            .read()
            .send(event)
            .map_err(|_| RuntimeError::ReceiverClosed)?;
        Ok(())
    }

    fn is_interactive(&self) -> bool {
        !self.json_mode && atty::is(atty::Stream::Stdout)
    }

    async fn shutdown(&self) -> Result<(), RuntimeError> {
        // No cleanup needed - channel drop handles it
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
