//! Executor seam for the widget's API calls.

use core::future::Future;
use core::pin::Pin;

/// A boxed future handed to a [`Spawner`].
pub type SpawnedFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Runs the futures returned by [`CatalogApi`](crate::CatalogApi).
///
/// The widget never awaits anything itself; every API call is handed here and
/// its continuation updates the dropdown. Plain `Fn(SpawnedFuture)` closures
/// qualify, so `|f| handle.spawn(f)` over a tokio handle or a
/// `wasm_bindgen_futures::spawn_local` wrapper is enough.
pub trait Spawner {
    fn spawn(&self, future: SpawnedFuture);
}

impl<F> Spawner for F
where
    F: Fn(SpawnedFuture),
{
    fn spawn(&self, future: SpawnedFuture) {
        self(future)
    }
}

#[cfg(any(test, feature = "testing"))]
/// Spawner that drives each future to completion on the calling thread before
/// `spawn` returns.
///
/// Only available with the `testing` feature or during tests.
pub fn create_test_spawner() -> fn(SpawnedFuture) {
    |future| futures::executor::block_on(future)
}

#[cfg(any(test, feature = "testing"))]
/// Test spawner that parks futures until told to run them.
///
/// Only available with the `testing` feature or during tests.
///
/// Lets a test decide when an API call resolves relative to further input, which
/// is how stale responses are reproduced. Clones share the same queue.
///
/// ```rust
/// use catalog_select::{Spawner, TestSpawner};
///
/// let spawner = TestSpawner::new();
/// spawner.spawn(Box::pin(async {}));
/// assert_eq!(spawner.queued(), 1);
///
/// spawner.run_queued();
/// assert_eq!(spawner.queued(), 0);
/// ```
#[derive(Clone)]
pub struct TestSpawner {
    queue: std::sync::Arc<spin::Mutex<Vec<SpawnedFuture>>>,
}

#[cfg(any(test, feature = "testing"))]
impl Default for TestSpawner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(test, feature = "testing"))]
impl TestSpawner {
    pub fn new() -> Self {
        Self {
            queue: std::sync::Arc::new(spin::Mutex::new(Vec::new())),
        }
    }

    /// Number of futures waiting to run.
    pub fn queued(&self) -> usize {
        self.queue.lock().len()
    }

    /// Run every queued future to completion, in spawn order, including futures
    /// spawned while running.
    pub fn run_queued(&self) {
        loop {
            let next = {
                let mut queue = self.queue.lock();
                if queue.is_empty() {
                    None
                } else {
                    Some(queue.remove(0))
                }
            };
            match next {
                Some(future) => futures::executor::block_on(future),
                None => break,
            }
        }
    }
}

#[cfg(any(test, feature = "testing"))]
impl Spawner for TestSpawner {
    fn spawn(&self, future: SpawnedFuture) {
        self.queue.lock().push(future);
    }
}
