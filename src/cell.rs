//! Reactive state cells
//!
//! A [`Cell`] is a single mutable value with subscribe/notify semantics.
//! Subscribers receive the current value synchronously at registration time
//! and every subsequent value in write order, until the returned
//! [`Subscription`] guard is dropped.

use parking_lot::{Mutex, MutexGuard};
use std::collections::VecDeque;
use std::sync::{Arc, Weak};

/// Callback invoked with every value a cell takes.
type Callback<T> = Arc<Mutex<dyn FnMut(&T) + Send>>;

struct Subscriber<T> {
    id: u64,
    callback: Callback<T>,
}

struct Inner<T> {
    value: T,
    subscribers: Vec<Subscriber<T>>,
    next_id: u64,
    /// Deliveries queued by writes, drained in write order.
    pending: VecDeque<(u64, Callback<T>, T)>,
    /// Whether a drain loop is currently dispatching deliveries.
    notifying: bool,
}

/// A reactive mutable value.
///
/// Cloning a `Cell` produces another handle to the same underlying value;
/// writes through any handle notify every subscriber. Callbacks run outside
/// the cell's lock: each write enqueues one delivery per subscriber and a
/// single drain loop dispatches the queue in write order, so a subscriber
/// may freely read or write cells, including the one it observes.
pub struct Cell<T> {
    inner: Arc<Mutex<Inner<T>>>,
}

impl<T: Clone + Send + 'static> Cell<T> {
    /// Creates a cell holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                value,
                subscribers: Vec::new(),
                next_id: 0,
                pending: VecDeque::new(),
                notifying: false,
            })),
        }
    }

    /// Registers `callback` as a subscriber.
    ///
    /// The callback is invoked immediately with the current value, then once
    /// for every later write, in subscription order relative to other
    /// subscribers. Dropping the returned guard stops future delivery and
    /// has no other side effect.
    #[must_use = "dropping the subscription immediately unsubscribes"]
    pub fn subscribe(&self, callback: impl FnMut(&T) + Send + 'static) -> Subscription<T> {
        let callback: Callback<T> = Arc::new(Mutex::new(callback));
        let mut inner = self.inner.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.subscribers.push(Subscriber {
            id,
            callback: Arc::clone(&callback),
        });
        let snapshot = inner.value.clone();
        inner.pending.push_back((id, callback, snapshot));
        self.drain(inner);
        Subscription {
            inner: Arc::downgrade(&self.inner),
            id,
        }
    }

    /// Replaces the value and notifies all current subscribers.
    pub fn set(&self, value: T) {
        let mut inner = self.inner.lock();
        inner.value = value;
        Self::enqueue_deliveries(&mut inner);
        self.drain(inner);
    }

    /// Transforms the value in place and notifies all current subscribers.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let mut inner = self.inner.lock();
        f(&mut inner.value);
        Self::enqueue_deliveries(&mut inner);
        self.drain(inner);
    }

    /// Returns a clone of the most recent value without subscribing.
    pub fn get(&self) -> T {
        self.inner.lock().value.clone()
    }

    /// Queues one delivery of the current value per subscriber.
    fn enqueue_deliveries(inner: &mut Inner<T>) {
        let Inner {
            value,
            subscribers,
            pending,
            ..
        } = inner;
        for sub in subscribers.iter() {
            pending.push_back((sub.id, Arc::clone(&sub.callback), value.clone()));
        }
    }

    /// Dispatches queued deliveries, releasing the cell's lock around each
    /// callback. Writes issued from inside a callback enqueue behind the
    /// values already queued and are delivered by the drain loop already on
    /// the stack, preserving write order without re-entering the loop.
    fn drain<'a>(&'a self, mut inner: MutexGuard<'a, Inner<T>>) {
        if inner.notifying {
            return;
        }
        inner.notifying = true;
        loop {
            match inner.pending.pop_front() {
                Some((_, callback, value)) => {
                    drop(inner);
                    {
                        let mut cb = callback.lock();
                        (&mut *cb)(&value);
                    }
                    inner = self.inner.lock();
                }
                None => {
                    inner.notifying = false;
                    return;
                }
            }
        }
    }
}

impl<T: Clone + Default + Send + 'static> Default for Cell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Clone for Cell<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Cell<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Cell").field(&self.inner.lock().value).finish()
    }
}

/// Guard returned by [`Cell::subscribe`]; unsubscribes on drop.
pub struct Subscription<T> {
    inner: Weak<Mutex<Inner<T>>>,
    id: u64,
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            let mut inner = inner.lock();
            inner.subscribers.retain(|s| s.id != self.id);
            inner.pending.retain(|(id, _, _)| *id != self.id);
        }
    }
}
