//! Signal combinators.
//!
//! Every operator is built only from [`emit`] and [`listen`]: it subscribes to an
//! upstream listener list and re-emits on a signal of its own.

use std::ops::AddAssign;
use std::sync::Arc;
use std::time::Duration;

use spin::Mutex;

use crate::signal::{emit, listen, Listeners, Signal};
use crate::timer::{Scheduler, Timeout};
use crate::Result;

/// Re-emit upstream values once `delay` has passed without a newer one.
///
/// Each upstream value replaces the pending timer, so a burst of values collapses
/// into a single emission of the last one. Emission happens on whatever thread
/// the scheduler runs its tasks on; a listener error at that point has no caller
/// to return to and is logged.
pub fn debounce<E>(
    delay: Duration,
    scheduler: &Arc<dyn Scheduler>,
    listeners: &Listeners<E>,
) -> Signal<E>
where
    E: Clone + Send + Sync + 'static,
{
    let debounced = Signal::new();
    let pending: Arc<Mutex<Option<Timeout>>> = Arc::new(Mutex::new(None));

    let output = debounced.clone();
    let scheduler = scheduler.clone();
    listen(move |value: &E| {
        let output = output.clone();
        let value = value.clone();
        let task = Box::new(move || {
            if let Err(err) = output.apply(emit(value)) {
                tracing::error!(error = %err, "debounced listener failed");
            }
        });
        let timeout = Timeout::schedule(&scheduler, delay, task);
        // The previous guard is dropped outside the lock.
        let previous = pending.lock().replace(timeout);
        drop(previous);
        Ok(())
    })(listeners);

    debounced
}

/// Sending half of a [`distinct`] gate.
pub struct Push<T>(Signal<T>);

impl<T> Clone for Push<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> Push<T> {
    /// Emit `value` on the upstream signal.
    pub fn push(&self, value: T) -> Result<()> {
        self.0.apply(emit(value))
    }
}

/// Receiving half of a [`distinct`] gate.
pub struct OnChange<T>(Signal<T>);

impl<T> Clone for OnChange<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> OnChange<T> {
    /// Register `callback` for values that differ from the last forwarded one.
    pub fn on_change<F>(&self, callback: F)
    where
        F: Fn(&T) -> Result<()> + Send + Sync + 'static,
    {
        self.0.apply(listen(callback));
    }
}

/// Change-detection gate.
///
/// Values pushed into the gate are forwarded only when they differ from the last
/// forwarded value. Nothing has been forwarded initially, so the first push
/// always goes through.
///
/// `upstream` defaults to a fresh signal; passing an existing one also gates
/// values emitted on it directly.
///
/// ```rust
/// use catalog_select::operators::distinct;
/// use std::sync::{Arc, Mutex};
///
/// let (push, on_change) = distinct::<bool>(None);
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = seen.clone();
/// on_change.on_change(move |v| {
///     sink.lock().unwrap().push(*v);
///     Ok(())
/// });
///
/// for value in [true, true, false, false, true] {
///     push.push(value).unwrap();
/// }
/// assert_eq!(*seen.lock().unwrap(), vec![true, false, true]);
/// ```
pub fn distinct<T>(upstream: Option<Signal<T>>) -> (Push<T>, OnChange<T>)
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    let upstream = upstream.unwrap_or_default();
    let downstream = Signal::new();
    let last: Mutex<Option<T>> = Mutex::new(None);

    let output = downstream.clone();
    upstream.apply(listen(move |value: &T| {
        {
            let mut last = last.lock();
            if last.as_ref() == Some(value) {
                return Ok(());
            }
            *last = Some(value.clone());
        }
        output.apply(emit(value.clone()))
    }));

    (Push(upstream), OnChange(downstream))
}

/// Pair the latest values of two signals.
///
/// Every emission on either side emits `(first, second)` with the most recent
/// value seen on each side, `None` for a side that has not emitted yet.
pub fn combine_latest<A, B>(first: &Signal<A>, second: &Signal<B>) -> Signal<(Option<A>, Option<B>)>
where
    A: Clone + Send + Sync + 'static,
    B: Clone + Send + Sync + 'static,
{
    let combined = Signal::new();
    let latest: Arc<Mutex<(Option<A>, Option<B>)>> = Arc::new(Mutex::new((None, None)));

    let output = combined.clone();
    let slots = latest.clone();
    first.apply(listen(move |value: &A| {
        let pair = {
            let mut slots = slots.lock();
            slots.0 = Some(value.clone());
            slots.clone()
        };
        output.apply(emit(pair))
    }));

    let output = combined.clone();
    second.apply(listen(move |value: &B| {
        let pair = {
            let mut slots = latest.lock();
            slots.1 = Some(value.clone());
            slots.clone()
        };
        output.apply(emit(pair))
    }));

    combined
}

/// Running total of upstream values.
pub fn sum<T>(listeners: &Listeners<T>) -> Signal<T>
where
    T: Copy + Default + AddAssign + Send + Sync + 'static,
{
    let totals = Signal::new();
    let total = Mutex::new(T::default());

    let output = totals.clone();
    listen(move |value: &T| {
        let current = {
            let mut total = total.lock();
            *total += *value;
            *total
        };
        output.apply(emit(current))
    })(listeners);

    totals
}
