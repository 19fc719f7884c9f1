//! Synchronous event dispatcher.
//!
//! A [`Dispatcher`] keeps an ordered list of listeners. [`Dispatcher::fire`]
//! calls each listener that is still connected, in connection order, on the
//! caller's thread. Listeners may connect, disconnect (themselves included)
//! or fire again while a fire is in progress.

use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError, Weak,
    atomic::{AtomicU64, Ordering},
};

type Listener<A> = Arc<dyn Fn(&A) + Send + Sync>;

struct Slot<A> {
    id: u64,
    listener: Listener<A>,
}

struct Slots<A> {
    entries: Mutex<Vec<Slot<A>>>,
    next_id: AtomicU64,
}

impl<A> Slots<A> {
    fn lock(&self) -> MutexGuard<'_, Vec<Slot<A>>> {
        // A listener panicking mid-fire never holds this lock, so poisoning
        // cannot leave the list half-edited.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Object-safe view of a listener list, so [`Connection`] need not be generic.
trait Registry: Send + Sync {
    fn remove(&self, id: u64) -> bool;
    fn contains(&self, id: u64) -> bool;
}

impl<A: 'static> Registry for Slots<A> {
    fn remove(&self, id: u64) -> bool {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|slot| slot.id != id);
        entries.len() != before
    }

    fn contains(&self, id: u64) -> bool {
        self.lock().iter().any(|slot| slot.id == id)
    }
}

/// A synchronous multi-listener event.
pub struct Dispatcher<A> {
    slots: Arc<Slots<A>>,
}

impl<A: 'static> Dispatcher<A> {
    /// Create a dispatcher with no listeners.
    pub fn new() -> Self {
        Self {
            slots: Arc::new(Slots {
                entries: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Subscribe a listener. It stays connected until the returned
    /// [`Connection`] is disconnected; dropping the connection does not
    /// disconnect it.
    pub fn connect<F>(&self, listener: F) -> Connection
    where
        F: Fn(&A) + Send + Sync + 'static,
    {
        let id = self.slots.next_id.fetch_add(1, Ordering::Relaxed);
        self.slots.lock().push(Slot {
            id,
            listener: Arc::new(listener),
        });
        #[cfg(feature = "tracing")]
        tracing::trace!(listener = id, "listener connected");

        let slots: Arc<dyn Registry> = self.slots.clone();
        Connection {
            id,
            registry: Arc::downgrade(&slots),
        }
    }

    /// Invoke every connected listener with `args`.
    ///
    /// The listener list is snapshotted first; a listener disconnected by an
    /// earlier listener in the same fire is skipped, a listener connected
    /// during the fire is not called until the next one.
    pub fn fire(&self, args: A) {
        let snapshot: Vec<(u64, Listener<A>)> = self
            .slots
            .lock()
            .iter()
            .map(|slot| (slot.id, slot.listener.clone()))
            .collect();
        #[cfg(feature = "tracing")]
        tracing::trace!(listeners = snapshot.len(), "firing");

        for (id, listener) in snapshot {
            if self.slots.contains(id) {
                listener(&args);
            }
        }
    }

    /// Number of connected listeners.
    pub fn len(&self) -> usize {
        self.slots.lock().len()
    }

    /// Returns true if no listener is connected.
    pub fn is_empty(&self) -> bool {
        self.slots.lock().is_empty()
    }

    /// Disconnect every listener.
    pub fn disconnect_all(&self) {
        self.slots.lock().clear();
    }
}

impl<A: 'static> Default for Dispatcher<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Clone for Dispatcher<A> {
    /// Clones share the same listener list.
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
        }
    }
}

/// Handle returned by [`Dispatcher::connect`].
#[derive(Clone)]
pub struct Connection {
    id: u64,
    registry: Weak<dyn Registry>,
}

impl Connection {
    /// Remove the listener. Calling this more than once is a no-op.
    pub fn disconnect(&self) {
        if let Some(registry) = self.registry.upgrade() {
            let _removed = registry.remove(self.id);
            #[cfg(feature = "tracing")]
            if _removed {
                tracing::trace!(listener = self.id, "listener disconnected");
            }
        }
    }

    /// Returns true while the listener is subscribed and its dispatcher alive.
    pub fn is_connected(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.contains(self.id))
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("connected", &self.is_connected())
            .finish()
    }
}
