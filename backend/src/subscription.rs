//! Scoped subscription handles and the listener registry behind them.
//!
//! Every live query in the system (store snapshots, session changes) hands
//! the caller a [`SubscriptionHandle`]. Dropping the handle deregisters the
//! listener, so a subscription can never outlive the view that opened it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

/// Handle to a live subscription. The listener stays registered for exactly
/// as long as the handle is alive; dropping it (or calling
/// [`unsubscribe`](Self::unsubscribe)) releases it.
pub struct SubscriptionHandle {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl SubscriptionHandle {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        SubscriptionHandle {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Explicitly release the subscription. Equivalent to dropping the
    /// handle; provided for call sites where the intent should be visible.
    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for SubscriptionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriptionHandle")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// Registry of listeners for one event payload type.
///
/// Listeners run with the registry locked; a listener must hand the event
/// off (e.g. onto a channel) rather than call back into the source.
pub(crate) struct Listeners<A> {
    next_id: AtomicU64,
    entries: Mutex<Vec<(u64, Box<dyn Fn(&A) + Send>)>>,
}

// The cancel closure captures a `Weak<Self>`, so the payload type must
// outlive the handle.
impl<A: 'static> Listeners<A> {
    pub fn new() -> Arc<Self> {
        Arc::new(Listeners {
            next_id: AtomicU64::new(0),
            entries: Mutex::new(Vec::new()),
        })
    }

    /// Register a listener; the returned handle deregisters it on drop.
    pub fn subscribe(self: &Arc<Self>, listener: Box<dyn Fn(&A) + Send>) -> SubscriptionHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.entries.lock().unwrap().push((id, listener));

        let registry: Weak<Self> = Arc::downgrade(self);
        SubscriptionHandle::new(move || {
            if let Some(registry) = registry.upgrade() {
                registry.remove(id);
            }
        })
    }

    fn remove(&self, id: u64) {
        self.entries
            .lock()
            .unwrap()
            .retain(|(entry_id, _)| *entry_id != id);
    }

    pub fn notify(&self, value: &A) {
        for (_, listener) in self.entries.lock().unwrap().iter() {
            listener(value);
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn dropping_the_handle_deregisters_the_listener() {
        let listeners: Arc<Listeners<u32>> = Listeners::new();
        let seen = Arc::new(AtomicUsize::new(0));

        let handle = {
            let seen = seen.clone();
            listeners.subscribe(Box::new(move |_| {
                seen.fetch_add(1, Ordering::Relaxed);
            }))
        };

        listeners.notify(&1);
        assert_eq!(seen.load(Ordering::Relaxed), 1);
        assert_eq!(listeners.len(), 1);

        drop(handle);
        listeners.notify(&2);
        assert_eq!(seen.load(Ordering::Relaxed), 1);
        assert_eq!(listeners.len(), 0);
    }

    #[test]
    fn explicit_unsubscribe_matches_drop() {
        let listeners: Arc<Listeners<u32>> = Listeners::new();
        let handle = listeners.subscribe(Box::new(|_| {}));
        handle.unsubscribe();
        assert_eq!(listeners.len(), 0);
    }

    #[test]
    fn handle_outliving_the_registry_is_harmless() {
        let listeners: Arc<Listeners<u32>> = Listeners::new();
        let handle = listeners.subscribe(Box::new(|_| {}));
        drop(listeners);
        drop(handle);
    }
}
