//! CLI bootstrap - Connect to a Jupyter server and activate the tracer.
//!
//! `CliContext` owns what an embedding host would own: the document
//! tracker, the activated `AppState`, and the event channel feeding the
//! output loop.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::mpsc;

use crate::host::{sync_tracker, JupyterServerClient, MemoryTracker};
use crate::popup::{default_clipboard, ClipboardSink, DisabledClipboard};
use crate::runtime::{CliRuntime, RuntimeEvent, TracerRuntime};
use crate::settings::{get_with_env_fallback, SettingsManager, TracerSettings};
use crate::state::AppState;

use super::args::Args;

const DEFAULT_SERVER_URL: &str = "http://localhost:8888/";

/// Context for CLI execution containing all initialized services.
pub struct CliContext {
    /// Runtime abstraction for event emission
    pub runtime: Arc<dyn TracerRuntime>,

    /// Event receiver for output handling, taken by the runner
    pub event_rx: Option<mpsc::UnboundedReceiver<RuntimeEvent>>,

    /// Activated tracer
    pub state: AppState,

    /// Host state mirrored from the server
    pub tracker: Arc<MemoryTracker>,

    pub client: JupyterServerClient,

    pub settings: TracerSettings,

    /// Command-line arguments
    pub args: Args,
}

impl CliContext {
    /// Poll the server once and mirror its sessions into the tracker.
    pub async fn refresh(&self) -> Result<()> {
        let sessions = self
            .client
            .sessions()
            .await
            .context("Failed to list Jupyter sessions")?;
        sync_tracker(&self.tracker, &sessions, self.args.path.as_deref());
        Ok(())
    }

    /// Graceful shutdown - cancel popup work, stop the observer.
    pub async fn shutdown(mut self) -> Result<()> {
        if let Err(e) = self.state.shutdown().await {
            tracing::warn!("Tracer shutdown error: {}", e);
        }
        Ok(())
    }
}

/// Initialize the CLI context.
pub async fn initialize(args: &Args) -> Result<CliContext> {
    // Load settings
    let settings_manager = SettingsManager::new()
        .await
        .context("Failed to initialize settings manager")?;

    let settings = settings_manager.get().await;

    // Initialize logging based on verbosity
    let log_level = if args.verbose {
        "debug"
    } else {
        settings.advanced.log_level.as_str()
    };
    let directive = format!("session_tracer={}", log_level)
        .parse::<tracing_subscriber::filter::Directive>()
        .with_context(|| format!("Invalid log level: {}", log_level))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(directive))
        .with_writer(std::io::stderr)
        .try_init();

    // Ensure settings file exists (creates template on first run)
    if let Err(e) = settings_manager.ensure_settings_file().await {
        tracing::warn!("Failed to create settings template: {}", e);
    }

    if args.verbose {
        eprintln!(
            "[cli] Settings loaded from {}",
            settings_manager.path().display()
        );
    }

    // Resolve server: CLI arg (or its env var) > settings > default
    let base_url = args
        .server
        .clone()
        .or_else(|| {
            get_with_env_fallback(
                &settings.server.base_url,
                &["JUPYTER_SERVER_URL"],
                Some(DEFAULT_SERVER_URL.to_string()),
            )
        })
        .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());
    let token = args
        .token
        .clone()
        .or_else(|| get_with_env_fallback(&settings.server.token, &["JUPYTER_TOKEN"], None));

    if args.verbose {
        eprintln!("[cli] Server: {}", base_url);
    }

    let client = JupyterServerClient::new(base_url, token);
    let host = client
        .host_info()
        .await
        .context("Failed to read Jupyter server version")?;

    // Create event channel
    let (event_tx, event_rx) = mpsc::unbounded_channel::<RuntimeEvent>();

    // Create CLI runtime
    let runtime: Arc<dyn TracerRuntime> = Arc::new(CliRuntime::new(event_tx, args.json));

    let clipboard: Arc<dyn ClipboardSink> = if args.no_copy || !settings.clipboard.enabled {
        Arc::new(DisabledClipboard)
    } else {
        default_clipboard()
    };

    // Activate before the first sync so the observer sees the initial documents
    let tracker = MemoryTracker::new();
    let state = AppState::new(host, tracker.clone(), clipboard, runtime.clone());

    let ctx = CliContext {
        runtime,
        event_rx: Some(event_rx),
        state,
        tracker,
        client,
        settings,
        args: args.clone(),
    };
    ctx.refresh().await?;

    Ok(ctx)
}
