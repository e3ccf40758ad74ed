// Runtime abstraction between the tracer core and whatever surface shows it.
//
// The CLI runtime forwards events over a channel to a printing loop. Other
// hosts implement TracerRuntime to put panels on screen.

use std::any::Any;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::popup::CopyOutcome;

/// Runtime-specific errors
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Event receiver closed")]
    ReceiverClosed,
}

/// Events emitted to the frontend/CLI
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuntimeEvent {
    /// A panel was raised or its content replaced
    PanelShown {
        panel_id: String,
        title: String,
        text: String,
        html: String,
    },

    /// The clipboard write started by the last render finished
    CopyFinished {
        panel_id: String,
        outcome: CopyOutcome,
    },

    PanelClosed { panel_id: String },
}

/// Runtime abstraction for CLI vs embedding hosts
///
/// # Object Safety
/// This trait is object-safe and intended to be used as `Arc<dyn TracerRuntime>`.
#[async_trait]
pub trait TracerRuntime: Send + Sync + 'static {
    /// Emit an event to the frontend/output
    ///
    /// # Errors
    /// Returns `RuntimeError::ReceiverClosed` if the output side is gone.
    fn emit(&self, event: RuntimeEvent) -> Result<(), RuntimeError>;

    /// Check if a person is watching the output (has UI or TTY)
    fn is_interactive(&self) -> bool;

    /// Graceful shutdown - flush events, close channels, etc.
    async fn shutdown(&self) -> Result<(), RuntimeError>;

    /// Get as Any for downcasting to concrete type.
    fn as_any(&self) -> &dyn Any;
}

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "cli")]
pub use cli::CliRuntime;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_with_snake_case_tag() {
        let event = RuntimeEvent::CopyFinished {
            panel_id: "session-info-popup".to_string(),
            outcome: CopyOutcome::Failed,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "copy_finished");
        assert_eq!(json["panel_id"], "session-info-popup");
        assert_eq!(json["outcome"], "failed");
    }

    #[test]
    fn test_panel_closed_shape() {
        let event = RuntimeEvent::PanelClosed {
            panel_id: "p".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&event).unwrap(),
            r#"{"type":"panel_closed","panel_id":"p"}"#
        );
    }
}
