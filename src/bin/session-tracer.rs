//! session-tracer - Show the current JupyterLab session from the terminal
//!
//! Connects to a running Jupyter server, picks the active notebook, prints
//! the session popup and copies the snapshot JSON to the clipboard.
//!
//! # Usage
//!
//! ```bash
//! # Show the most recently active notebook's session
//! session-tracer --server http://localhost:8888/ --token "$JUPYTER_TOKEN"
//!
//! # Pick a notebook and emit JSON lines
//! session-tracer --path work/analysis.ipynb --json | jq .
//!
//! # Log lifecycle events until Ctrl-C
//! session-tracer --watch --interval 5 -v
//! ```

use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use session_tracer::cli::{initialize, show_once, watch, Args};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut ctx = initialize(&args).await?;

    let result = if args.watch {
        let secs = args.interval.unwrap_or(ctx.settings.watch.interval_secs).max(1);
        watch(&mut ctx, Duration::from_secs(secs)).await
    } else {
        show_once(&mut ctx).await
    };

    // Graceful shutdown
    ctx.shutdown().await?;

    result
}
