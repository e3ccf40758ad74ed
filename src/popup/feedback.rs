use std::sync::Weak;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use super::display::CopyControl;

/// How long the copy control shows its "copied" state.
pub const FEEDBACK_DURATION: Duration = Duration::from_secs(2);

/// Owned timer that reverts the copy control after [`FEEDBACK_DURATION`].
///
/// Dropping the timer aborts it, so a torn-down display is never touched.
/// The control is also held weakly: a rebuilt display orphans it.
pub struct FeedbackTimer {
    handle: JoinHandle<()>,
}

impl FeedbackTimer {
    pub fn start(control: Weak<Mutex<CopyControl>>, duration: Duration) -> Self {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            if let Some(control) = control.upgrade() {
                control.lock().reset();
                tracing::trace!("Copy feedback reverted");
            }
        });
        Self { handle }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for FeedbackTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
