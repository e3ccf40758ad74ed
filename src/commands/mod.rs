//! Commands exposed to the host.
//!
//! There is a single command, [`SHOW_SESSION_INFO`]. Hosts list
//! [`COMMANDS`] in their palette and call [`execute`] with the id.

mod session;

pub use session::{show_session_info, Panel, PANEL_ID, PANEL_TITLE};

use crate::error::{Result, TracerError};
use crate::state::AppState;

pub const SHOW_SESSION_INFO: &str = "session-tracer:show-info";

pub const PALETTE_CATEGORY: &str = "Session Tracer";

/// Palette metadata for one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub id: &'static str,
    pub label: &'static str,
    pub caption: &'static str,
    pub category: &'static str,
}

pub const COMMANDS: &[CommandSpec] = &[CommandSpec {
    id: SHOW_SESSION_INFO,
    label: "📊 Show Session Info",
    caption: "Display current JupyterLab session information",
    category: PALETTE_CATEGORY,
}];

/// Run the command registered under `id`.
pub fn execute(state: &mut AppState, id: &str) -> Result<()> {
    match id {
        SHOW_SESSION_INFO => show_session_info(state),
        other => Err(TracerError::UnknownCommand(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_info_is_registered() {
        let [spec] = COMMANDS else {
            panic!("expected exactly one command");
        };
        assert_eq!(spec.id, SHOW_SESSION_INFO);
        assert_eq!(spec.label, "📊 Show Session Info");
        assert_eq!(spec.caption, "Display current JupyterLab session information");
        assert_eq!(spec.category, "Session Tracer");
    }
}
