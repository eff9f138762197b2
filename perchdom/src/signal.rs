//! Callback registration for host and component notifications.
//!
//! A [`Signal`] is a list of connected slots. Connecting returns a
//! [`Subscription`] which disconnects when dropped or explicitly
//! unsubscribed. Controllers keep their subscriptions in a
//! [`SubscriptionSet`] so teardown releases all of them in one place.
//!
//! Slots are invoked after the slot list lock is released, so a slot may
//! connect or disconnect (including itself) while a signal is emitting.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, Weak};

/// Identifies one connection on one signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

type Slot<T> = Arc<dyn Fn(&T) + Send + Sync>;
type Slots<T> = RwLock<Vec<(ConnectionId, Slot<T>)>>;

/// A notification source.
///
/// Clones share the same slot list, so the emitting side and the
/// subscribing side can each hold a handle.
pub struct Signal<T> {
    slots: Arc<Slots<T>>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            slots: Arc::clone(&self.slots),
        }
    }
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self {
            slots: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl<T> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.connection_count())
            .finish()
    }
}

impl<T: 'static> Signal<T> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self::default()
    }

    /// Connect a slot. The slot stays connected until the returned
    /// [`Subscription`] is dropped or unsubscribed.
    pub fn connect<F>(&self, slot: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = ConnectionId::new();
        if let Ok(mut guard) = self.slots.write() {
            guard.push((id, Arc::new(slot)));
        }

        let slots: Weak<Slots<T>> = Arc::downgrade(&self.slots);
        Subscription {
            id,
            release: Some(Box::new(move || {
                if let Some(slots) = slots.upgrade()
                    && let Ok(mut guard) = slots.write()
                {
                    guard.retain(|(conn, _)| *conn != id);
                }
            })),
        }
    }

    /// Disconnect a slot by id. Returns true if it was connected.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.slots
            .write()
            .map(|mut g| {
                let before = g.len();
                g.retain(|(conn, _)| *conn != id);
                g.len() != before
            })
            .unwrap_or(false)
    }

    pub fn disconnect_all(&self) {
        if let Ok(mut guard) = self.slots.write() {
            guard.clear();
        }
    }

    pub fn is_connected(&self, id: ConnectionId) -> bool {
        self.slots
            .read()
            .map(|g| g.iter().any(|(conn, _)| *conn == id))
            .unwrap_or(false)
    }

    /// Invoke every connected slot in connection order.
    ///
    /// A slot disconnected by an earlier slot during the same emit is skipped.
    pub fn emit(&self, value: &T) {
        let snapshot: Vec<(ConnectionId, Slot<T>)> = self
            .slots
            .read()
            .map(|g| g.iter().map(|(id, s)| (*id, Arc::clone(s))).collect())
            .unwrap_or_default();

        for (id, slot) in snapshot {
            if self.is_connected(id) {
                slot(value);
            }
        }
    }
}

impl<T> Signal<T> {
    pub fn connection_count(&self) -> usize {
        self.slots.read().map(|g| g.len()).unwrap_or(0)
    }
}

/// A live connection to a [`Signal`].
#[must_use = "dropping a Subscription disconnects it immediately"]
pub struct Subscription {
    id: ConnectionId,
    release: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Disconnect now.
    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.release.is_some())
            .finish()
    }
}

/// The subscriptions owned by one controller, released together.
#[derive(Debug, Default)]
pub struct SubscriptionSet {
    subscriptions: Vec<Subscription>,
}

impl SubscriptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, subscription: Subscription) {
        self.subscriptions.push(subscription);
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Disconnect everything. Returns how many subscriptions were released.
    pub fn release_all(&mut self) -> usize {
        let count = self.subscriptions.len();
        for subscription in self.subscriptions.drain(..) {
            subscription.unsubscribe();
        }
        count
    }
}

impl Extend<Subscription> for SubscriptionSet {
    fn extend<I: IntoIterator<Item = Subscription>>(&mut self, iter: I) {
        self.subscriptions.extend(iter);
    }
}

impl FromIterator<Subscription> for SubscriptionSet {
    fn from_iter<I: IntoIterator<Item = Subscription>>(iter: I) -> Self {
        Self {
            subscriptions: iter.into_iter().collect(),
        }
    }
}
