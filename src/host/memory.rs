//! In-memory host: a tracker and documents whose state is set directly.
//!
//! Used by the Jupyter server adapter to mirror server sessions, and by
//! tests to drive the tracer through exact host states.

use std::sync::Arc;

use parking_lot::RwLock;

use super::{
    DocumentRef, DocumentTracker, KernelChange, KernelInfo, NotebookDocument, SessionHandle,
    Signal,
};

pub struct MemoryDocument {
    path: String,
    title: String,
    session: RwLock<Option<SessionHandle>>,
    kernel_changed: Signal<KernelChange>,
    file_changed: Signal<()>,
}

impl MemoryDocument {
    /// Create a document with no session. The title is the file name.
    pub fn new(path: impl Into<String>) -> Arc<Self> {
        let path = path.into();
        let title = path.rsplit('/').next().unwrap_or(&path).to_string();
        Arc::new(Self {
            path,
            title,
            session: RwLock::new(None),
            kernel_changed: Signal::new(),
            file_changed: Signal::new(),
        })
    }

    /// Attach (or replace) the document's session.
    ///
    /// Emits `kernel_changed` when the kernel differs from the previous one.
    pub fn set_session(&self, session: Option<SessionHandle>) {
        let new_kernel = session.as_ref().and_then(|s| s.kernel.clone());
        let old_kernel = {
            let mut guard = self.session.write();
            let old = guard.as_ref().and_then(|s| s.kernel.clone());
            *guard = session;
            old
        };

        if old_kernel != new_kernel {
            self.kernel_changed.emit(&KernelChange {
                old_value: old_kernel,
                new_value: new_kernel,
            });
        }
    }

    /// Replace the kernel of the attached session. No-op without a session.
    pub fn set_kernel(&self, kernel: Option<KernelInfo>) {
        let session = self.session.read().clone();
        if let Some(mut session) = session {
            session.kernel = kernel;
            self.set_session(Some(session));
        }
    }

    /// Simulate a save of the underlying file.
    pub fn save(&self) {
        self.file_changed.emit(&());
    }
}

impl NotebookDocument for MemoryDocument {
    fn path(&self) -> String {
        self.path.clone()
    }

    fn title(&self) -> String {
        self.title.clone()
    }

    fn session(&self) -> Option<SessionHandle> {
        self.session.read().clone()
    }

    fn kernel_changed(&self) -> &Signal<KernelChange> {
        &self.kernel_changed
    }

    fn file_changed(&self) -> &Signal<()> {
        &self.file_changed
    }
}

/// Tracker over a list of `MemoryDocument`s.
#[derive(Default)]
pub struct MemoryTracker {
    documents: RwLock<Vec<Arc<MemoryDocument>>>,
    current: RwLock<Option<Arc<MemoryDocument>>>,
    document_added: Signal<DocumentRef>,
    current_changed: Signal<Option<DocumentRef>>,
}

impl MemoryTracker {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Track a document. Re-opening a tracked path is a no-op.
    pub fn open(&self, document: Arc<MemoryDocument>) {
        {
            let mut documents = self.documents.write();
            if documents.iter().any(|d| d.path == document.path) {
                return;
            }
            documents.push(document.clone());
        }
        let document: DocumentRef = document;
        self.document_added.emit(&document);
    }

    /// Stop tracking `path`; clears the active document if it was active.
    pub fn close(&self, path: &str) {
        self.documents.write().retain(|d| d.path != path);
        let was_current = self
            .current
            .read()
            .as_ref()
            .map(|d| d.path == path)
            .unwrap_or(false);
        if was_current {
            self.activate(None);
        }
    }

    /// Make `path` the active document, or clear it with `None`.
    ///
    /// Returns false when `path` is not tracked. Emits `current_changed`
    /// only when the active document actually changes.
    pub fn activate(&self, path: Option<&str>) -> bool {
        let next = match path {
            Some(path) => match self.get(path) {
                Some(document) => Some(document),
                None => return false,
            },
            None => None,
        };

        let changed = {
            let mut current = self.current.write();
            let same = match (current.as_ref(), next.as_ref()) {
                (Some(a), Some(b)) => Arc::ptr_eq(a, b),
                (None, None) => true,
                _ => false,
            };
            *current = next.clone();
            !same
        };

        if changed {
            let payload: Option<DocumentRef> = next.map(|d| d as DocumentRef);
            self.current_changed.emit(&payload);
        }
        true
    }

    pub fn get(&self, path: &str) -> Option<Arc<MemoryDocument>> {
        self.documents.read().iter().find(|d| d.path == path).cloned()
    }

    pub fn documents(&self) -> Vec<Arc<MemoryDocument>> {
        self.documents.read().clone()
    }
}

impl DocumentTracker for MemoryTracker {
    fn current_document(&self) -> Option<DocumentRef> {
        self.current.read().clone().map(|d| d as DocumentRef)
    }

    fn document_added(&self) -> &Signal<DocumentRef> {
        &self.document_added
    }

    fn current_changed(&self) -> &Signal<Option<DocumentRef>> {
        &self.current_changed
    }
}
