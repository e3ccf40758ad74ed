//! Lifecycle logging for tracked notebooks.
//!
//! The observer only writes `tracing` events. Nothing reads its output, and
//! it never touches the state the snapshot builder reads.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::host::{DocumentRef, DocumentTracker, KernelChange, Subscription};

/// Live connections while the observer runs.
struct Registration {
    tracker: Vec<Subscription>,
    /// Kernel-changed and saved subscriptions, one entry per document path
    documents: HashMap<String, [Subscription; 2]>,
}

impl Registration {
    /// Track a newly opened document, replacing any entry for the same path
    /// and dropping entries whose document no longer exists.
    fn watch(&mut self, path: String, subscriptions: [Subscription; 2]) {
        self.documents
            .retain(|_, subs| subs.iter().all(Subscription::is_connected));
        self.documents.insert(path, subscriptions);
    }

    fn len(&self) -> usize {
        self.tracker.len() + self.documents.len() * 2
    }

    fn release(self) {
        for subscription in self.tracker {
            subscription.unsubscribe();
        }
        for subscription in self.documents.into_values().flatten() {
            subscription.unsubscribe();
        }
    }
}

pub struct EventObserver {
    tracker: Arc<dyn DocumentTracker>,
    /// `None` until `start()`
    registration: Arc<Mutex<Option<Registration>>>,
}

impl EventObserver {
    pub fn new(tracker: Arc<dyn DocumentTracker>) -> Self {
        Self {
            tracker,
            registration: Arc::new(Mutex::new(None)),
        }
    }

    /// Connect to the tracker's notifications. No-op while already running.
    pub fn start(&self) {
        let mut guard = self.registration.lock();
        if guard.is_some() {
            tracing::debug!("Session observer already running");
            return;
        }
        tracing::info!("Starting session observer");

        let owned = Arc::downgrade(&self.registration);
        let added = self.tracker.document_added().connect(move |document| {
            tracing::info!(
                event = "notebook_opened",
                path = %document.path(),
                "Notebook opened"
            );
            let per_document = watch_document(document);
            // Dropped (and thereby disconnected) if the observer stopped meanwhile
            if let Some(registration) = owned.upgrade() {
                if let Some(registration) = registration.lock().as_mut() {
                    registration.watch(document.path(), per_document);
                }
            }
        });

        let changed = self
            .tracker
            .current_changed()
            .connect(|document: &Option<DocumentRef>| {
                if let Some(document) = document {
                    tracing::info!(
                        event = "notebook_activated",
                        path = %document.path(),
                        "Notebook activated"
                    );
                } else {
                    tracing::debug!(event = "notebook_deactivated", "No active notebook");
                }
            });

        *guard = Some(Registration {
            tracker: vec![added, changed],
            documents: HashMap::new(),
        });
    }

    /// Disconnect everything. Safe to call repeatedly or before `start()`.
    pub fn stop(&self) {
        let registration = self.registration.lock().take();
        if let Some(registration) = registration {
            registration.release();
            tracing::info!("Session observer stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.registration.lock().is_some()
    }

    /// Live subscriptions, including per-document ones.
    pub fn subscription_count(&self) -> usize {
        self.registration
            .lock()
            .as_ref()
            .map(Registration::len)
            .unwrap_or(0)
    }
}

impl Drop for EventObserver {
    fn drop(&mut self) {
        self.stop();
    }
}

fn watch_document(document: &DocumentRef) -> [Subscription; 2] {
    let path = document.path();
    let kernel = document
        .kernel_changed()
        .connect(move |change: &KernelChange| {
            tracing::info!(
                event = "kernel_changed",
                path = %path,
                old_kernel_id = change.old_value.as_ref().map(|k| k.id.as_str()),
                new_kernel_id = change.new_value.as_ref().map(|k| k.id.as_str()),
                kernel_name = change.new_value.as_ref().map(|k| k.name.as_str()),
                "Kernel changed for notebook"
            );
        });

    let path = document.path();
    let saved = document.file_changed().connect(move |_| {
        tracing::info!(event = "notebook_saved", path = %path, "Notebook saved");
    });

    [kernel, saved]
}
