//! CLI module for headless session tracing.
//!
//! The CLI plays the host: it mirrors a running Jupyter server into an
//! in-memory tracker, activates the tracer against it and renders the
//! popup in the terminal.
//!
//! # Architecture
//!
//! ```text
//! +-----------------+     +-------------+     +---------------+
//! | AppState        | --> | CliRuntime  | --> | output.rs     |
//! | (commands)      |     | (emit())    |     | (print/JSON)  |
//! +-----------------+     +-------------+     +---------------+
//!         ^
//!         | signals
//! +-----------------+     +---------------------+
//! | MemoryTracker   | <-- | JupyterServerClient |
//! +-----------------+     +---------------------+
//! ```

mod args;
mod bootstrap;
mod output;
mod runner;

pub use args::Args;
pub use bootstrap::{initialize, CliContext};
pub use output::{run_event_loop, OutputMode};
pub use runner::{show_once, watch};
