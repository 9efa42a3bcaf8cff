//! Elastic worker pool.
//!
//! `Executor` is a bounded pool of OS threads that draw tasks from a FIFO
//! queue. It grows from a `low` watermark up to a `high` watermark under
//! backpressure and retires surplus workers after an idle timeout, so a
//! quiet pool settles back to its warm baseline without tearing down every
//! thread between bursts.
//!
//! Unlike [`crate::shard::LruShard`] and friends, this module owns its own
//! threads and condition variables rather than just a mutex: [`Executor::submit`]
//! is non-blocking, but the worker loop and [`Executor::stop`] both suspend on
//! a [`parking_lot::Condvar`].

use std::any::Any;
use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use parking_lot::{Condvar, Mutex, MutexGuard};

/// A unit of work submitted to an [`Executor`]. Fire-and-forget: there is no
/// result channel, so a caller that needs the outcome wires one up itself
/// (e.g. by sending on a channel it owns from inside the closure).
type Task = Box<dyn FnOnce() + Send + 'static>;

/// Lifecycle state of the pool. Transitions only move forward:
/// `Running` → `Stopping` → `Stopped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Running,
    Stopping,
    Stopped,
}

struct Shared {
    queue: VecDeque<Task>,
    workers_total: usize,
    workers_busy: usize,
    state: State,
}

struct Pool {
    shared: Mutex<Shared>,
    /// Signaled on new task, on state transition, and on shutdown — workers
    /// wait on this to learn there's something to do.
    wakeup: Condvar,
    /// Signaled once `workers_total` reaches zero, for `Stop(await=true)`.
    drained: Condvar,
    low: usize,
    high: usize,
    max_queue: usize,
    idle: Duration,
}

/// A bounded, elastic pool of worker threads.
///
/// Construct with [`Executor::start`] (or [`crate::config::ExecutorConfig`]),
/// submit fire-and-forget work with [`Executor::submit`], and either call
/// [`Executor::stop`] explicitly or let `Drop` perform a graceful,
/// blocking shutdown.
pub struct Executor {
    pool: Arc<Pool>,
}

impl Executor {
    /// Starts a pool with `low` workers already running and waiting.
    ///
    /// Callers should prefer [`crate::config::ExecutorConfig::build`], which
    /// validates the watermarks before calling this.
    pub fn start(low: usize, high: usize, max_queue: usize, idle: Duration) -> Self {
        let pool = Arc::new(Pool {
            shared: Mutex::new(Shared {
                queue: VecDeque::new(),
                workers_total: low,
                workers_busy: 0,
                state: State::Running,
            }),
            wakeup: Condvar::new(),
            drained: Condvar::new(),
            low,
            high,
            max_queue,
            idle,
        });
        for _ in 0..low {
            spawn_worker(Arc::clone(&pool));
        }
        Executor { pool }
    }

    /// Enqueues `task`. Returns `true` iff it was accepted.
    ///
    /// Rejects without enqueueing when the pool is not `Running`, or when
    /// it is saturated (`workers_total == high` and the queue is already at
    /// `max_queue`). Otherwise grows the pool by one worker if every
    /// existing worker is busy and there is room below `high`.
    pub fn submit<F>(&self, task: F) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        let mut shared = self.pool.shared.lock();
        if shared.state != State::Running {
            return false;
        }
        if shared.workers_total == self.pool.high && shared.queue.len() >= self.pool.max_queue {
            return false;
        }

        shared.queue.push_back(Box::new(task));

        let should_grow =
            shared.workers_busy == shared.workers_total && shared.workers_total < self.pool.high;
        if should_grow {
            shared.workers_total += 1;
            log::debug!(
                "executor: growing pool to {} workers under backpressure",
                shared.workers_total
            );
        }
        drop(shared);

        if should_grow {
            spawn_worker(Arc::clone(&self.pool));
        }
        self.pool.wakeup.notify_one();
        true
    }

    /// Transitions the pool out of `Running`. Workers already holding tasks
    /// finish them; queued tasks continue to be drained by whichever
    /// workers remain.
    ///
    /// If `await_drain` is `true`, blocks until every worker has exited and
    /// the pool has reached `Stopped`. If `false`, returns immediately —
    /// the pool keeps draining in the background and reaches `Stopped` on
    /// its own once the last worker retires.
    pub fn stop(&self, await_drain: bool) {
        {
            let mut shared = self.pool.shared.lock();
            if shared.state == State::Running {
                shared.state = State::Stopping;
            }
            self.pool.wakeup.notify_all();
        }
        if await_drain {
            let mut shared = self.pool.shared.lock();
            while shared.state != State::Stopped {
                self.pool.drained.wait(&mut shared);
            }
        }
    }

    /// Whether the pool is still accepting [`Executor::submit`] calls.
    pub fn is_running(&self) -> bool {
        self.pool.shared.lock().state == State::Running
    }

    /// The pool's low (floor) watermark.
    pub fn low_watermark(&self) -> usize {
        self.pool.low
    }

    /// The pool's high (ceiling) watermark.
    pub fn high_watermark(&self) -> usize {
        self.pool.high
    }

    /// Current number of live worker threads.
    pub fn workers_total(&self) -> usize {
        self.pool.shared.lock().workers_total
    }

    /// Current number of workers executing a task.
    pub fn workers_busy(&self) -> usize {
        self.pool.shared.lock().workers_busy
    }

    /// Current number of tasks waiting in the queue.
    pub fn queue_len(&self) -> usize {
        self.pool.shared.lock().queue.len()
    }
}

impl Drop for Executor {
    fn drop(&mut self) {
        self.stop(true);
    }
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let shared = self.pool.shared.lock();
        f.debug_struct("Executor")
            .field("state", &shared.state)
            .field("workers_total", &shared.workers_total)
            .field("workers_busy", &shared.workers_busy)
            .field("queue_len", &shared.queue.len())
            .field("low", &self.pool.low)
            .field("high", &self.pool.high)
            .finish()
    }
}

fn spawn_worker(pool: Arc<Pool>) {
    thread::Builder::new()
        .name("executor-worker".into())
        .spawn(move || worker_loop(pool))
        .expect("failed to spawn executor worker thread");
}

/// Decrements `workers_total`, signaling `drained` (and flipping the pool
/// to `Stopped`) once the last worker has exited.
fn retire(pool: &Pool, mut shared: MutexGuard<'_, Shared>) {
    shared.workers_total -= 1;
    let total = shared.workers_total;
    log::debug!("executor: worker retiring, {total} remain");
    if total == 0 {
        if shared.state == State::Stopping {
            shared.state = State::Stopped;
        }
        drop(shared);
        pool.drained.notify_all();
    }
}

fn worker_loop(pool: Arc<Pool>) {
    loop {
        let task = {
            let mut shared = pool.shared.lock();
            let outcome = loop {
                if let Some(task) = shared.queue.pop_front() {
                    shared.workers_busy += 1;
                    break Some(task);
                }
                if shared.state != State::Running {
                    break None;
                }
                if shared.workers_total > pool.low {
                    let result = pool.wakeup.wait_for(&mut shared, pool.idle);
                    if result.timed_out()
                        && shared.queue.is_empty()
                        && shared.state == State::Running
                        && shared.workers_total > pool.low
                    {
                        break None;
                    }
                } else {
                    pool.wakeup.wait(&mut shared);
                }
            };
            match outcome {
                Some(task) => task,
                None => {
                    retire(&pool, shared);
                    return;
                }
            }
        };

        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| task())) {
            log::warn!("executor: task panicked: {}", panic_message(&payload));
        }

        pool.shared.lock().workers_busy -= 1;
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
