use crate::error::Result;
use crate::popup::PopupRenderer;
use crate::runtime::RuntimeEvent;
use crate::state::AppState;

pub const PANEL_ID: &str = "session-info-popup";
pub const PANEL_TITLE: &str = "📊 Session Information";

/// The closable panel hosting the popup.
pub struct Panel {
    pub id: &'static str,
    pub title: &'static str,
    pub closable: bool,
    pub content: PopupRenderer,
}

impl Panel {
    fn new(content: PopupRenderer) -> Self {
        Self {
            id: PANEL_ID,
            title: PANEL_TITLE,
            closable: true,
            content,
        }
    }

    fn shown_event(&self) -> RuntimeEvent {
        let display = self.content.display();
        RuntimeEvent::PanelShown {
            panel_id: self.id.to_string(),
            title: self.title.to_string(),
            text: display.to_text(),
            html: display.to_html(),
        }
    }
}

/// Take a fresh snapshot and show it.
///
/// An open panel is updated in place; otherwise a new one is raised.
/// Either way the popup starts copying the snapshot.
pub fn show_session_info(state: &mut AppState) -> Result<()> {
    let snapshot = state.builder.current_session_info();
    tracing::debug!(
        notebook = ?snapshot.notebook_path,
        kernel = ?snapshot.kernel_id,
        "Showing session info"
    );

    let panel = match state.panel.take() {
        Some(mut panel) => {
            panel.content.update_session_data(snapshot);
            panel
        }
        None => Panel::new(PopupRenderer::new(snapshot, state.clipboard.clone())),
    };
    let event = panel.shown_event();
    state.panel = Some(panel);

    state.runtime.emit(event)?;
    Ok(())
}
