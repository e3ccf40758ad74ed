//! Session tracer for JupyterLab-style notebook hosts.
//!
//! The host injects its document tracker and clipboard; the tracer logs
//! notebook lifecycle events, builds session snapshots on demand and shows
//! them in a popup that copies the snapshot JSON.

#[cfg(feature = "cli")]
pub mod cli;
pub mod commands;
pub mod error;
pub mod host;
pub mod observer;
pub mod popup;
pub mod runtime;
pub mod settings;
pub mod snapshot;
pub mod state;

#[cfg(test)]
mod test_support;

pub use error::{Result, TracerError};
pub use observer::EventObserver;
pub use popup::PopupRenderer;
pub use snapshot::{SessionSnapshotBuilder, Snapshot};
pub use state::AppState;
