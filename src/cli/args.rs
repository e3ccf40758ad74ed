//! CLI argument parsing using clap.
//!
//! Defines the command-line interface for session-tracer.

use clap::Parser;

use super::output::OutputMode;

/// Show the current JupyterLab session and copy it to the clipboard
#[derive(Parser, Debug, Clone)]
#[command(name = "session-tracer")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Jupyter server base URL (overrides settings)
    #[arg(long, env = "JUPYTER_SERVER_URL")]
    pub server: Option<String>,

    /// Jupyter server token (overrides settings)
    #[arg(long, env = "JUPYTER_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Notebook path to treat as the active document
    ///
    /// Defaults to the notebook whose kernel was active most recently.
    #[arg(long)]
    pub path: Option<String>,

    /// Print the HTML rendition of the popup
    #[arg(long, conflicts_with = "json")]
    pub html: bool,

    /// Output events as JSON lines (for scripting/parsing)
    #[arg(long)]
    pub json: bool,

    /// Do not touch the system clipboard
    #[arg(long)]
    pub no_copy: bool,

    /// Keep running and log notebook lifecycle events until Ctrl-C
    #[arg(short = 'w', long)]
    pub watch: bool,

    /// Seconds between server polls in watch mode (overrides settings)
    #[arg(long, requires = "watch", value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,

    /// Show verbose output (debug information)
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Args {
    pub fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else if self.html {
            OutputMode::Html
        } else {
            OutputMode::Text
        }
    }
}
