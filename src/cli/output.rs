//! CLI output handling - Event receiver loop.
//!
//! Receives events from the tracer via the runtime channel and renders
//! them for the terminal, as HTML, or as JSON lines. The loop ends when
//! every sender has been dropped.

use std::io::{self, Write};

use anyhow::Result;
use tokio::sync::mpsc;

use crate::popup::CopyOutcome;
use crate::runtime::RuntimeEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Text,
    Html,
    Json,
}

/// Where a rendered line goes.
#[derive(Debug, PartialEq, Eq)]
enum Line {
    Stdout(String),
    Stderr(String),
}

/// Run the event loop until the channel closes.
pub async fn run_event_loop(
    mut event_rx: mpsc::UnboundedReceiver<RuntimeEvent>,
    mode: OutputMode,
) -> Result<()> {
    while let Some(event) = event_rx.recv().await {
        match render_event(&event, mode)? {
            Some(Line::Stdout(text)) => {
                let mut stdout = io::stdout().lock();
                writeln!(stdout, "{}", text)?;
                stdout.flush()?;
            }
            Some(Line::Stderr(text)) => eprintln!("{}", text),
            None => {}
        }
    }

    Ok(())
}

fn render_event(event: &RuntimeEvent, mode: OutputMode) -> Result<Option<Line>> {
    if mode == OutputMode::Json {
        return Ok(Some(Line::Stdout(serde_json::to_string(event)?)));
    }

    let line = match event {
        RuntimeEvent::PanelShown { text, html, .. } => match mode {
            OutputMode::Html => Some(Line::Stdout(html.clone())),
            _ => Some(Line::Stdout(text.trim_end().to_string())),
        },
        RuntimeEvent::CopyFinished { outcome, .. } => Some(Line::Stderr(match outcome {
            CopyOutcome::Copied => "[clipboard] Session data copied".to_string(),
            CopyOutcome::Failed => {
                "[clipboard] Copy failed; select the JSON above to copy it manually".to_string()
            }
        })),
        RuntimeEvent::PanelClosed { .. } => None,
    };

    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shown() -> RuntimeEvent {
        RuntimeEvent::PanelShown {
            panel_id: "session-info-popup".to_string(),
            title: "📊 Session Information".to_string(),
            text: "plain\n".to_string(),
            html: "<div></div>".to_string(),
        }
    }

    #[test]
    fn test_text_mode_prints_text() {
        let line = render_event(&shown(), OutputMode::Text).unwrap();
        assert_eq!(line, Some(Line::Stdout("plain".to_string())));
    }

    #[test]
    fn test_html_mode_prints_html() {
        let line = render_event(&shown(), OutputMode::Html).unwrap();
        assert_eq!(line, Some(Line::Stdout("<div></div>".to_string())));
    }

    #[test]
    fn test_json_mode_prints_every_event() {
        let closed = RuntimeEvent::PanelClosed {
            panel_id: "p".to_string(),
        };
        match render_event(&closed, OutputMode::Json).unwrap() {
            Some(Line::Stdout(json)) => assert!(json.contains("\"panel_closed\"")),
            other => panic!("unexpected line: {:?}", other),
        }
        assert_eq!(render_event(&closed, OutputMode::Text).unwrap(), None);
    }

    #[test]
    fn test_copy_outcome_goes_to_stderr() {
        let event = RuntimeEvent::CopyFinished {
            panel_id: "p".to_string(),
            outcome: CopyOutcome::Failed,
        };
        assert!(matches!(
            render_event(&event, OutputMode::Text).unwrap(),
            Some(Line::Stderr(msg)) if msg.contains("manually")
        ));
    }

    #[tokio::test]
    async fn test_loop_ends_when_senders_drop() {
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(RuntimeEvent::PanelClosed {
            panel_id: "p".to_string(),
        })
        .unwrap();
        drop(tx);

        run_event_loop(rx, OutputMode::Text).await.unwrap();
    }
}
