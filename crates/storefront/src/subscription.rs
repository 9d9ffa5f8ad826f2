//! Synchronous publish/subscribe for store state changes.
//!
//! Views register a listener and receive a snapshot of the new state after
//! every mutation, on the mutating thread, once the store has released its
//! state lock. Registration returns a [`SubscriptionId`] that deregisters the
//! listener when passed back to `unsubscribe`.

use std::sync::{Arc, Mutex, PoisonError};

/// Handle identifying one registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener<S> = Arc<dyn Fn(&S) + Send + Sync>;

struct Registry<S> {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener<S>)>,
}

/// Listener registry for one store.
pub struct Subscribers<S> {
    registry: Mutex<Registry<S>>,
}

impl<S> Subscribers<S> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: Mutex::new(Registry {
                next_id: 0,
                listeners: Vec::new(),
            }),
        }
    }

    /// Register a listener; the returned id deregisters it.
    pub fn subscribe(&self, listener: impl Fn(&S) + Send + Sync + 'static) -> SubscriptionId {
        let mut registry = self.registry.lock().unwrap_or_else(PoisonError::into_inner);
        let id = SubscriptionId(registry.next_id);
        registry.next_id += 1;
        registry.listeners.push((id, Arc::new(listener)));
        id
    }

    /// Deregister a listener. Returns false when the id was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut registry = self.registry.lock().unwrap_or_else(PoisonError::into_inner);
        let before = registry.listeners.len();
        registry.listeners.retain(|(listener_id, _)| *listener_id != id);
        registry.listeners.len() != before
    }

    /// Invoke every listener with the new state.
    ///
    /// Listeners are cloned out of the registry first, so a listener may
    /// subscribe or unsubscribe without deadlocking.
    pub fn notify(&self, state: &S) {
        let listeners: Vec<Listener<S>> = {
            let registry = self.registry.lock().unwrap_or_else(PoisonError::into_inner);
            registry
                .listeners
                .iter()
                .map(|(_, listener)| Arc::clone(listener))
                .collect()
        };

        for listener in listeners {
            listener(state);
        }
    }
}

impl<S> Default for Subscribers<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> std::fmt::Debug for Subscribers<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self
            .registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .listeners
            .len();
        f.debug_struct("Subscribers").field("count", &count).finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn test_notify_reaches_all_listeners() {
        let subscribers = Subscribers::<u32>::new();
        let seen = Arc::new(AtomicUsize::new(0));

        let seen_a = Arc::clone(&seen);
        subscribers.subscribe(move |state| {
            seen_a.fetch_add(*state as usize, Ordering::SeqCst);
        });
        let seen_b = Arc::clone(&seen);
        subscribers.subscribe(move |state| {
            seen_b.fetch_add(*state as usize, Ordering::SeqCst);
        });

        subscribers.notify(&5);
        assert_eq!(seen.load(Ordering::SeqCst), 10);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let subscribers = Subscribers::<()>::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let calls_inner = Arc::clone(&calls);
        let id = subscribers.subscribe(move |()| {
            calls_inner.fetch_add(1, Ordering::SeqCst);
        });

        subscribers.notify(&());
        assert!(subscribers.unsubscribe(id));
        subscribers.notify(&());

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        // Second unsubscribe with the same id reports not-found
        assert!(!subscribers.unsubscribe(id));
    }
}
