use serde::Serialize;
use thiserror::Error;

use crate::runtime::RuntimeError;

#[derive(Debug, Error)]
pub enum TracerError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Panel not open: {0}")]
    PanelNotOpen(String),

    #[error("Runtime error: {0}")]
    Runtime(#[from] RuntimeError),
}

// Errors cross the runtime boundary as plain strings
impl Serialize for TracerError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TracerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_message() {
        let err = TracerError::UnknownCommand("x:y".to_string());
        assert_eq!(serde_json::to_string(&err).unwrap(), r#""Unknown command: x:y""#);
    }

    #[test]
    fn test_runtime_error_converts() {
        let err: TracerError = RuntimeError::ReceiverClosed.into();
        assert_eq!(err.to_string(), "Runtime error: Event receiver closed");
    }
}
