//! CLI execution runner.
//!
//! Runs the show-info command once, or keeps the tracer attached to the
//! server in watch mode.

use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::commands::SHOW_SESSION_INFO;
use crate::runtime::{CliRuntime, RuntimeEvent};

use super::bootstrap::CliContext;
use super::output::run_event_loop;

/// Spawn the output loop on the context's event receiver.
fn attach_output(ctx: &mut CliContext) -> Option<JoinHandle<Result<()>>> {
    let event_rx = ctx.event_rx.take()?;
    let mode = ctx.args.output_mode();
    Some(tokio::spawn(async move { run_event_loop(event_rx, mode).await }))
}

/// Close the event channel and wait for the output loop to drain it.
async fn detach_output(ctx: &CliContext, output: Option<JoinHandle<Result<()>>>) {
    // Swapping in a dead sender drops the live one, which ends the loop
    if let Some(cli_runtime) = ctx.runtime.as_any().downcast_ref::<CliRuntime>() {
        let (closed_tx, _) = mpsc::unbounded_channel::<RuntimeEvent>();
        cli_runtime.replace_event_tx(closed_tx);
    } else {
        tracing::warn!("Runtime is not CliRuntime, output may not be flushed");
    }

    let Some(handle) = output else {
        return;
    };
    match handle.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            tracing::warn!("Output handler error: {}", e);
        }
        Err(e) => {
            tracing::warn!("Output handler panicked: {}", e);
        }
    }
}

/// Show the popup and wait for its clipboard write.
async fn show(ctx: &mut CliContext) -> Result<()> {
    ctx.state.execute(SHOW_SESSION_INFO)?;
    ctx.state.finish_copy().await?;
    Ok(())
}

/// Show the current session once and exit.
pub async fn show_once(ctx: &mut CliContext) -> Result<()> {
    let output = attach_output(ctx);
    let result = show(ctx).await;
    detach_output(ctx, output).await;
    result
}

/// Show the current session, then poll the server until Ctrl-C.
///
/// Changes found by each poll go through the tracker, so the observer
/// logs them as lifecycle events.
pub async fn watch(ctx: &mut CliContext, interval: Duration) -> Result<()> {
    let output = attach_output(ctx);
    let result = watch_loop(ctx, interval).await;
    detach_output(ctx, output).await;
    result
}

async fn watch_loop(ctx: &mut CliContext, interval: Duration) -> Result<()> {
    show(ctx).await?;

    if ctx.runtime.is_interactive() {
        eprintln!(
            "[watch] Polling every {}s, press Ctrl-C to stop",
            interval.as_secs()
        );
    }

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    // The first tick completes immediately and the initial state is already synced
    ticker.tick().await;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            result = &mut ctrl_c => {
                result?;
                tracing::debug!("Interrupted, stopping watch");
                break;
            }
            _ = ticker.tick() => {
                if let Err(e) = ctx.refresh().await {
                    tracing::warn!("Failed to poll Jupyter server: {:#}", e);
                }
            }
        }
    }

    Ok(())
}
