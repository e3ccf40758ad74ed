//! Host capabilities consumed by the tracer.
//!
//! Everything the tracer knows about the notebook environment comes through
//! these traits. They are injected at construction time; nothing here is
//! looked up globally.
//!
//! ```text
//! +-----------------+      +------------------+      +------------------+
//! | DocumentTracker | ---> | NotebookDocument | ---> | SessionHandle    |
//! | current, signals|      | path, title, sigs|      | name, KernelInfo |
//! +-----------------+      +------------------+      +------------------+
//! ```

mod memory;
mod server;
mod signal;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use memory::{MemoryDocument, MemoryTracker};
pub use server::{sync_tracker, JupyterServerClient, ServerKernel, ServerSession};
pub use signal::{Signal, Subscription};

/// Static facts about the host application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostInfo {
    /// Host application version string
    pub version: String,
    /// Server base URL, used verbatim as the notebook path prefix
    pub base_url: String,
}

/// Kernel connection status as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Connecting,
    Connected,
    Disconnected,
}

impl ConnectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionStatus::Connecting => "connecting",
            ConnectionStatus::Connected => "connected",
            ConnectionStatus::Disconnected => "disconnected",
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelInfo {
    pub id: String,
    pub name: String,
    pub connection_status: ConnectionStatus,
}

/// Session attached to a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionHandle {
    pub name: String,
    pub kernel: Option<KernelInfo>,
}

/// Payload of a document's kernel-changed notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelChange {
    pub old_value: Option<KernelInfo>,
    pub new_value: Option<KernelInfo>,
}

pub trait NotebookDocument: Send + Sync {
    /// Server-relative path of the document
    fn path(&self) -> String;

    /// Title shown for the document's widget
    fn title(&self) -> String;

    fn session(&self) -> Option<SessionHandle>;

    fn kernel_changed(&self) -> &Signal<KernelChange>;

    /// Fires when the document's file is written
    fn file_changed(&self) -> &Signal<()>;
}

pub type DocumentRef = Arc<dyn NotebookDocument>;

pub trait DocumentTracker: Send + Sync {
    fn current_document(&self) -> Option<DocumentRef>;

    fn document_added(&self) -> &Signal<DocumentRef>;

    /// `None` payload means no document is active
    fn current_changed(&self) -> &Signal<Option<DocumentRef>>;
}
