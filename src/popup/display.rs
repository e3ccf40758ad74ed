//! Display model built from a snapshot.
//!
//! A `PopupDisplay` is built in one pass and never patched. The only parts
//! that change after construction are the copy control and the fallback
//! selection, which the clipboard task reaches through shared handles.

use std::ops::Range;
use std::sync::Arc;

use chrono::{DateTime, Local};
use parking_lot::Mutex;
use serde::Serialize;

use super::highlight::{escape_html, highlight_json};
use crate::snapshot::Snapshot;

pub const HEADER_TITLE: &str = "📊 Session Information";
pub const HEADER_CAPTION: &str = "Current JupyterLab session details";
pub const COPY_LABEL: &str = "📋 Copy to Clipboard";
pub const COPIED_LABEL: &str = "✅ Copied!";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    pub title: &'static str,
    pub caption: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub label: &'static str,
    pub value: String,
}

/// The four fixed summary rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub rows: [SummaryRow; 4],
}

impl Summary {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let notebook = or_fallback(snapshot.notebook_path.as_deref(), "None");
        let kernel = format!(
            "{} ({})",
            or_fallback(snapshot.kernel_name.as_deref(), "None"),
            or_fallback(snapshot.kernel_state.as_deref(), "Unknown")
        );
        let version = or_fallback(Some(snapshot.host_version.as_str()), "Unknown");

        Self {
            rows: [
                SummaryRow {
                    label: "📓 Current Notebook:",
                    value: notebook.to_string(),
                },
                SummaryRow {
                    label: "🧠 Kernel:",
                    value: kernel,
                },
                SummaryRow {
                    label: "⏰ Timestamp:",
                    value: format_local_timestamp(&snapshot.timestamp),
                },
                SummaryRow {
                    label: "🔧 JupyterLab Version:",
                    value: version.to_string(),
                },
            ],
        }
    }

    pub fn to_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| format!("{} {}", row.label, row.value))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Empty strings read as absent, like the absent case.
fn or_fallback<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    value.filter(|v| !v.is_empty()).unwrap_or(fallback)
}

/// Render an ISO-8601 instant in local time, e.g. `10/18/2026, 9:41:07 AM`.
pub fn format_local_timestamp(timestamp: &str) -> String {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|dt| {
            dt.with_timezone(&Local)
                .format("%-m/%-d/%Y, %-I:%M:%S %p")
                .to_string()
        })
        .unwrap_or_else(|_| "Invalid Date".to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CopyStyle {
    Normal,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopyControl {
    pub label: String,
    pub style: CopyStyle,
}

impl CopyControl {
    pub fn show_copied(&mut self) {
        self.label = COPIED_LABEL.to_string();
        self.style = CopyStyle::Success;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl Default for CopyControl {
    fn default() -> Self {
        Self {
            label: COPY_LABEL.to_string(),
            style: CopyStyle::Normal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonBlock {
    /// Pretty JSON exactly as copied
    pub text: String,
    /// HTML-escaped text with `json-*` spans
    pub highlighted: String,
}

pub struct PopupDisplay {
    pub header: Header,
    pub summary: Summary,
    pub json_block: JsonBlock,
    pub(super) copy_control: Arc<Mutex<CopyControl>>,
    /// Byte range of `json_block.text` selected for manual copying
    pub(super) selection: Arc<Mutex<Option<Range<usize>>>>,
}

impl PopupDisplay {
    pub fn build(snapshot: &Snapshot) -> Self {
        let text = snapshot.to_pretty_json();
        let highlighted = highlight_json(&text);

        Self {
            header: Header {
                title: HEADER_TITLE,
                caption: HEADER_CAPTION,
            },
            summary: Summary::from_snapshot(snapshot),
            json_block: JsonBlock { text, highlighted },
            copy_control: Arc::new(Mutex::new(CopyControl::default())),
            selection: Arc::new(Mutex::new(None)),
        }
    }

    pub fn copy_control(&self) -> CopyControl {
        self.copy_control.lock().clone()
    }

    pub fn selection(&self) -> Option<Range<usize>> {
        self.selection.lock().clone()
    }

    pub fn selected_text(&self) -> Option<&str> {
        let range = self.selection()?;
        self.json_block.text.get(range)
    }

    pub fn to_text(&self) -> String {
        format!(
            "{}\n{}\n\n{}\n\n[{}]\n\n{}\n",
            self.header.title,
            self.header.caption,
            self.summary.to_text(),
            self.copy_control().label,
            self.json_block.text
        )
    }

    pub fn to_html(&self) -> String {
        let control = self.copy_control();
        let style = match control.style {
            CopyStyle::Normal => "",
            CopyStyle::Success => " style=\"background-color: #4CAF50\"",
        };

        let mut html = String::new();
        html.push_str("<div class=\"jp-SessionPopup-container\">\n");
        html.push_str(&format!(
            "  <div class=\"jp-SessionPopup-header\">\n    <h2>{}</h2>\n    <p>{}</p>\n  </div>\n",
            self.header.title, self.header.caption
        ));
        html.push_str("  <div class=\"jp-SessionPopup-summary\">\n");
        html.push_str("    <div class=\"jp-SessionPopup-summaryGrid\">\n");
        for row in &self.summary.rows {
            html.push_str(&format!(
                "      <div class=\"jp-SessionPopup-summaryItem\"><strong>{}</strong> <span>{}</span></div>\n",
                row.label,
                escape_html(&row.value)
            ));
        }
        html.push_str("    </div>\n  </div>\n");
        html.push_str(&format!(
            "  <button class=\"jp-SessionPopup-copyButton\"{}>{}</button>\n",
            style, control.label
        ));
        html.push_str(&format!(
            "  <div class=\"jp-SessionPopup-json\"><pre class=\"jp-SessionPopup-jsonContent\"><code class=\"language-json\">{}</code></pre></div>\n",
            self.json_block.highlighted
        ));
        html.push_str("</div>\n");
        html
    }
}
