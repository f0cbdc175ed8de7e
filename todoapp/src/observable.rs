//! Observable fields and one-shot events for state containers.
//!
//! State containers expose two kinds of outputs to the view layer:
//!
//! - [`Observable<T>`]: a persistent field. The view reads the current value
//!   whenever it renders, or subscribes to be woken on change.
//! - [`SingleEvent<T>`]: a transient event (status message, navigation
//!   request). Each emission is delivered to at most one consumer and is
//!   never replayed to a consumer that arrives later.

use parking_lot::Mutex;
use tokio::sync::{Notify, watch};

/// A value with change notification, backed by a [`watch`] channel.
///
/// Writes never fail, whether or not anyone is subscribed.
#[derive(Debug)]
pub struct Observable<T> {
    tx: watch::Sender<T>,
}

impl<T> Observable<T> {
    /// Creates an observable holding `value`.
    pub fn new(value: T) -> Self {
        let (tx, _rx) = watch::channel(value);
        Self { tx }
    }

    /// Returns a clone of the current value.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.tx.borrow().clone()
    }

    /// Runs `f` against the current value without cloning it.
    pub fn with<U>(&self, f: impl FnOnce(&T) -> U) -> U {
        f(&self.tx.borrow())
    }

    /// Stores `value`, notifying subscribers only if it differs from the
    /// current value.
    ///
    /// Returns `true` if the value changed.
    pub fn set(&self, value: T) -> bool
    where
        T: PartialEq,
    {
        self.tx.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        })
    }

    /// Mutates the value in place and notifies subscribers.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.tx.send_modify(f);
    }

    /// Subscribes to changes. The receiver starts with the current value
    /// marked as seen.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}

impl<T: Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Slot state for a [`SingleEvent`].
#[derive(Debug)]
struct Slot<T> {
    /// Last emitted value. Kept after consumption so it can be peeked.
    value: Option<T>,
    /// Whether `value` is still waiting to be delivered.
    pending: bool,
}

/// A one-shot event holder.
///
/// [`emit`](Self::emit) stores a value and marks it pending. The first call to
/// [`take`](Self::take) (or a waiting [`recv`](Self::recv)) receives it and
/// clears the pending flag, so a consumer that arrives later sees nothing.
/// Emitting again before anyone consumed the previous value overwrites it.
#[derive(Debug)]
pub struct SingleEvent<T> {
    slot: Mutex<Slot<T>>,
    notify: Notify,
}

impl<T> SingleEvent<T> {
    /// Creates an event holder with no value.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(Slot {
                value: None,
                pending: false,
            }),
            notify: Notify::new(),
        }
    }

    /// Emits a value, replacing any value not yet consumed.
    pub fn emit(&self, value: T) {
        {
            let mut slot = self.slot.lock();
            slot.value = Some(value);
            slot.pending = true;
        }
        self.notify.notify_one();
    }
}

impl<T: Clone> SingleEvent<T> {
    /// Consumes the pending value, if any.
    ///
    /// Returns `None` when nothing was emitted since the last consumption.
    pub fn take(&self) -> Option<T> {
        let mut slot = self.slot.lock();
        if !slot.pending {
            return None;
        }
        slot.pending = false;
        slot.value.clone()
    }

    /// Returns the last emitted value without consuming it.
    ///
    /// `None` until the first emission.
    pub fn peek(&self) -> Option<T> {
        self.slot.lock().value.clone()
    }

    /// Waits for the next pending value and consumes it.
    pub async fn recv(&self) -> T {
        loop {
            if let Some(value) = self.take() {
                return value;
            }
            self.notify.notified().await;
        }
    }
}

impl SingleEvent<()> {
    /// Emits a void signal.
    pub fn call(&self) {
        self.emit(());
    }
}

impl<T> Default for SingleEvent<T> {
    fn default() -> Self {
        Self::new()
    }
}
