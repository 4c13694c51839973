//! Cancellable timers.
//!
//! A [`Scheduler`] is the `setTimeout`/`clearTimeout` half of a window-like
//! context. [`Timeout`] wraps one scheduled task and releases it when dropped,
//! which is what the debounce operator uses to replace its pending timer.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use flume::{Receiver, RecvTimeoutError, Sender};

use crate::Result;

/// Work run when a timer fires.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Handle identifying a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

/// Schedules delayed tasks.
///
/// Clearing an id that already fired or was already cleared does nothing.
pub trait Scheduler: Send + Sync {
    /// Run `task` once after `delay`.
    fn set_timeout(&self, delay: Duration, task: Task) -> TimerId;

    /// Cancel a pending task.
    fn clear_timeout(&self, id: TimerId);
}

/// A scheduled task that is cleared when this guard is dropped.
pub struct Timeout {
    scheduler: Arc<dyn Scheduler>,
    id: TimerId,
}

impl Timeout {
    /// Schedule `task` on `scheduler`; dropping the guard cancels it.
    pub fn schedule(scheduler: &Arc<dyn Scheduler>, delay: Duration, task: Task) -> Self {
        let id = scheduler.set_timeout(delay, task);
        Self {
            scheduler: scheduler.clone(),
            id,
        }
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        self.scheduler.clear_timeout(self.id);
    }
}

enum Command {
    Schedule {
        id: TimerId,
        deadline: Instant,
        task: Task,
    },
    Cancel(TimerId),
}

/// Scheduler backed by a dedicated timer thread.
///
/// Tasks run on the timer thread, in deadline order. The thread exits once the
/// scheduler and every [`Timeout`] referring to it have been dropped.
pub struct ThreadScheduler {
    commands: Sender<Command>,
    next_id: AtomicU64,
}

impl ThreadScheduler {
    /// Start the timer thread.
    pub fn spawn() -> Result<Self> {
        let (commands, receiver) = flume::unbounded();
        thread::Builder::new()
            .name("catalog-select-timers".to_string())
            .spawn(move || run_timers(receiver))?;

        Ok(Self {
            commands,
            next_id: AtomicU64::new(1),
        })
    }
}

impl Scheduler for ThreadScheduler {
    fn set_timeout(&self, delay: Duration, task: Task) -> TimerId {
        let id = TimerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let command = Command::Schedule {
            id,
            deadline: Instant::now() + delay,
            task,
        };
        if self.commands.send(command).is_err() {
            tracing::error!(?id, "timer thread is gone, task dropped");
        }
        id
    }

    fn clear_timeout(&self, id: TimerId) {
        self.commands.send(Command::Cancel(id)).ok();
    }
}

fn run_timers(commands: Receiver<Command>) {
    let mut pending: BTreeMap<TimerId, (Instant, Task)> = BTreeMap::new();

    loop {
        let next_deadline = pending.values().map(|(deadline, _)| *deadline).min();
        let received = match next_deadline {
            Some(deadline) => commands.recv_deadline(deadline),
            None => commands
                .recv()
                .map_err(|_| RecvTimeoutError::Disconnected),
        };

        match received {
            Ok(Command::Schedule { id, deadline, task }) => {
                pending.insert(id, (deadline, task));
            }
            Ok(Command::Cancel(id)) => {
                pending.remove(&id);
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        let now = Instant::now();
        let mut due: Vec<(Instant, TimerId)> = pending
            .iter()
            .filter(|(_, (deadline, _))| *deadline <= now)
            .map(|(id, (deadline, _))| (*deadline, *id))
            .collect();
        due.sort();

        for (_, id) in due {
            if let Some((_, task)) = pending.remove(&id) {
                task();
            }
        }
    }

    tracing::debug!(dropped = pending.len(), "timer thread stopped");
}

#[cfg(any(test, feature = "testing"))]
struct ManualState {
    now: Duration,
    next_id: u64,
    pending: BTreeMap<TimerId, (Duration, Task)>,
}

#[cfg(any(test, feature = "testing"))]
/// Scheduler driven by hand, for deterministic tests.
///
/// Only available with the `testing` feature or during tests.
///
/// Time only moves when [`advance`](Self::advance) is called; due tasks run on the
/// calling thread. Clones share the same clock and queue.
///
/// ```rust
/// use catalog_select::{ManualScheduler, Scheduler};
/// use std::time::Duration;
///
/// let timers = ManualScheduler::new();
/// timers.set_timeout(Duration::from_millis(10), Box::new(|| {}));
/// assert_eq!(timers.pending(), 1);
///
/// timers.advance(Duration::from_millis(10));
/// assert_eq!(timers.pending(), 0);
/// ```
#[derive(Clone)]
pub struct ManualScheduler {
    state: Arc<spin::Mutex<ManualState>>,
}

#[cfg(any(test, feature = "testing"))]
impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(test, feature = "testing"))]
impl ManualScheduler {
    pub fn new() -> Self {
        Self {
            state: Arc::new(spin::Mutex::new(ManualState {
                now: Duration::ZERO,
                next_id: 1,
                pending: BTreeMap::new(),
            })),
        }
    }

    /// Wrap a clone of this scheduler for APIs taking `Arc<dyn Scheduler>`.
    pub fn shared(&self) -> Arc<dyn Scheduler> {
        Arc::new(self.clone())
    }

    /// Move the clock forward, running every task that falls due, in order.
    pub fn advance(&self, by: Duration) {
        let target = self.state.lock().now + by;
        loop {
            let next = {
                let mut state = self.state.lock();
                let due = state
                    .pending
                    .iter()
                    .filter(|(_, (deadline, _))| *deadline <= target)
                    .min_by_key(|(id, (deadline, _))| (*deadline, **id))
                    .map(|(id, _)| *id);
                due.and_then(|id| state.pending.remove(&id)).map(|(deadline, task)| {
                    state.now = deadline;
                    task
                })
            };
            match next {
                Some(task) => task(),
                None => break,
            }
        }
        self.state.lock().now = target;
    }

    /// Number of tasks waiting to fire.
    pub fn pending(&self) -> usize {
        self.state.lock().pending.len()
    }

    /// Time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.state.lock().now
    }
}

#[cfg(any(test, feature = "testing"))]
impl Scheduler for ManualScheduler {
    fn set_timeout(&self, delay: Duration, task: Task) -> TimerId {
        let mut state = self.state.lock();
        let id = TimerId(state.next_id);
        state.next_id += 1;
        let deadline = state.now + delay;
        state.pending.insert(id, (deadline, task));
        id
    }

    fn clear_timeout(&self, id: TimerId) {
        self.state.lock().pending.remove(&id);
    }
}
