//! Connect-style notification channel.
//!
//! A `Signal<T>` holds a list of handlers. `connect()` returns a
//! `Subscription` that removes the handler when it is dropped or
//! explicitly unsubscribed. `emit()` calls every connected handler once.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

type Handler<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Handler list shared between a signal and its subscriptions.
struct Slots<T> {
    handlers: Mutex<Vec<(u64, Handler<T>)>>,
}

/// Type-erased removal so subscriptions from different signals can share a `Vec`.
trait Disconnect: Send + Sync {
    fn disconnect(&self, id: u64);
}

impl<T: 'static> Disconnect for Slots<T> {
    fn disconnect(&self, id: u64) {
        self.handlers.lock().retain(|(slot_id, _)| *slot_id != id);
    }
}

pub struct Signal<T> {
    slots: Arc<Slots<T>>,
    next_id: AtomicU64,
}

impl<T: 'static> Signal<T> {
    pub fn new() -> Self {
        Self {
            slots: Arc::new(Slots {
                handlers: Mutex::new(Vec::new()),
            }),
            next_id: AtomicU64::new(1),
        }
    }

    /// Register a handler. It stays connected until the returned
    /// subscription is dropped or unsubscribed.
    #[must_use = "dropping the subscription disconnects the handler"]
    pub fn connect<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.slots.handlers.lock().push((id, Arc::new(handler)));

        let slots: Arc<dyn Disconnect> = self.slots.clone();
        Subscription {
            id,
            slots: Some(Arc::downgrade(&slots)),
        }
    }

    /// Deliver `value` to every handler connected at the time of the call.
    ///
    /// The handler list is cloned before dispatch, so handlers may connect
    /// or disconnect without deadlocking.
    pub fn emit(&self, value: &T) {
        let handlers: Vec<Handler<T>> = self
            .slots
            .handlers
            .lock()
            .iter()
            .map(|(_, handler)| handler.clone())
            .collect();

        for handler in handlers {
            handler(value);
        }
    }

    pub fn handler_count(&self) -> usize {
        self.slots.handlers.lock().len()
    }
}

impl<T: 'static> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle returned by [`Signal::connect`].
pub struct Subscription {
    id: u64,
    slots: Option<Weak<dyn Disconnect>>,
}

impl Subscription {
    /// Disconnect the handler. Safe to call after the signal is gone.
    pub fn unsubscribe(mut self) {
        self.release();
    }

    /// Whether the signal this subscription belongs to still exists.
    pub fn is_connected(&self) -> bool {
        self.slots
            .as_ref()
            .map(|weak| weak.strong_count() > 0)
            .unwrap_or(false)
    }

    fn release(&mut self) {
        if let Some(slots) = self.slots.take().and_then(|weak| weak.upgrade()) {
            slots.disconnect(self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
