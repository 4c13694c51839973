//! The signal primitive and its two canonical operators.

use std::sync::Arc;

use spin::Mutex;

use crate::Result;

/// A registered listener.
///
/// Listeners are fallible: an `Err` stops the current emission and is handed
/// back to whoever called [`emit`].
pub type Listener<E> = Arc<dyn Fn(&E) -> Result<()> + Send + Sync>;

/// The live listener list of a [`Signal`].
///
/// Operators receive a shared reference to this list. The lock is only held
/// while the list itself is read or extended, never while listeners run, so a
/// listener may emit on or subscribe to any signal, including its own.
pub struct Listeners<E> {
    entries: Mutex<Vec<Listener<E>>>,
}

impl<E> Listeners<E> {
    fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Append a listener. Order of registration is order of invocation.
    pub fn push(&self, listener: Listener<E>) {
        self.entries.lock().push(listener);
    }

    /// Clone the current listeners out of the list.
    pub fn snapshot(&self) -> Vec<Listener<E>> {
        self.entries.lock().clone()
    }

    /// Number of registered listeners, counting duplicates.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether nothing is listening.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Single-event-type publish/subscribe primitive.
///
/// A `Signal` has exactly one operation, [`apply`](Self::apply), which runs an
/// operator against the listener list. Everything else ([`emit`], [`listen`],
/// and the combinators in [`operators`](crate::operators)) is an operator.
///
/// Signals never buffer: a listener registered after an emission does not see it.
/// Cloning a `Signal` yields another handle to the same listener list.
///
/// # Example
///
/// ```rust
/// use catalog_select::{emit, listen, Signal};
/// use std::sync::{Arc, Mutex};
///
/// let signal = Signal::<u32>::new();
/// let seen = Arc::new(Mutex::new(Vec::new()));
///
/// let sink = seen.clone();
/// signal.apply(listen(move |value: &u32| {
///     sink.lock().unwrap().push(*value);
///     Ok(())
/// }));
///
/// signal.apply(emit(1)).unwrap();
/// signal.apply(emit(2)).unwrap();
/// assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
/// ```
pub struct Signal<E> {
    listeners: Arc<Listeners<E>>,
}

impl<E> Clone for Signal<E> {
    fn clone(&self) -> Self {
        Self {
            listeners: self.listeners.clone(),
        }
    }
}

impl<E> Default for Signal<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Signal<E> {
    /// Create a signal with no listeners.
    pub fn new() -> Self {
        Self {
            listeners: Arc::new(Listeners::new()),
        }
    }

    /// Apply `op` to the live listener list and return its result.
    pub fn apply<R>(&self, op: impl FnOnce(&Listeners<E>) -> R) -> R {
        op(&self.listeners)
    }
}

/// Operator broadcasting `value` to every current listener, in order.
///
/// The first listener error aborts the emission and is returned.
pub fn emit<E>(value: E) -> impl FnOnce(&Listeners<E>) -> Result<()> {
    move |listeners| {
        for listener in listeners.snapshot() {
            listener(&value)?;
        }
        Ok(())
    }
}

/// Operator registering `callback` as a listener.
///
/// Registering the same callback twice makes it run twice per emission.
pub fn listen<E, F>(callback: F) -> impl FnOnce(&Listeners<E>)
where
    F: Fn(&E) -> Result<()> + Send + Sync + 'static,
{
    move |listeners| listeners.push(Arc::new(callback))
}
