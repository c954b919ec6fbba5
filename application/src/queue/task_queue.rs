//! FIFO single-flight task queue

use futures::FutureExt;
use futures::future::BoxFuture;
use relay_domain::QueueConfig;
use std::collections::VecDeque;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use std::task::{Context, Poll};
use thiserror::Error;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Errors produced by the queue itself (never by the task)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueueError {
    #[error("queued task panicked before settling")]
    TaskPanicked,
}

/// Whether a worker loop is currently active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueState {
    /// No worker; the next enqueue starts one
    Idle,
    /// A worker is running or pacing between tasks
    Draining,
}

struct Job {
    id: u64,
    run: BoxFuture<'static, ()>,
}

#[derive(Default)]
struct Pending {
    jobs: VecDeque<Job>,
    draining: bool,
}

struct Inner {
    config: RwLock<QueueConfig>,
    pending: Mutex<Pending>,
    next_id: AtomicU64,
}

/// Process-wide admission control for the external endpoint.
///
/// Cloning is cheap and every clone feeds the same FIFO. Construct one per
/// application session and hand clones to whoever generates traffic.
///
/// [`enqueue`](Self::enqueue) must be called from within a Tokio runtime.
#[derive(Clone)]
pub struct TaskQueue {
    inner: Arc<Inner>,
}

impl TaskQueue {
    pub fn new(config: QueueConfig) -> Self {
        if config.max_concurrent > 1 {
            warn_max_concurrent(config.max_concurrent);
        }
        Self {
            inner: Arc::new(Inner {
                config: RwLock::new(config),
                pending: Mutex::new(Pending::default()),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    /// Submit `task` and get a handle to its outcome.
    ///
    /// The task is appended to the pending list before this returns, so the
    /// order of `enqueue` calls is the order tasks start in. Whatever the
    /// task yields (including its own `Err`) comes back through the handle
    /// untouched.
    ///
    /// With the queue disabled the task is spawned right away and has no
    /// ordering relationship with any other task.
    pub fn enqueue<F, T>(&self, task: F) -> TaskHandle<T>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);

        if !self.config().enabled {
            debug!(task_id = id, "Queue disabled, running task immediately");
            return TaskHandle {
                state: HandleState::Direct(tokio::spawn(task)),
            };
        }

        let (tx, rx) = oneshot::channel();
        let run = async move {
            match AssertUnwindSafe(task).catch_unwind().await {
                Ok(output) => {
                    // The caller may have dropped its handle; the task still counts as settled.
                    let _ = tx.send(output);
                }
                Err(_) => warn!(task_id = id, "Queued task panicked"),
            }
        }
        .boxed();

        let start_worker = {
            let mut pending = self.inner.lock_pending();
            pending.jobs.push_back(Job { id, run });
            debug!(task_id = id, pending = pending.jobs.len(), "Task enqueued");
            !std::mem::replace(&mut pending.draining, true)
        };

        if start_worker {
            info!("Queue draining");
            let inner = Arc::clone(&self.inner);
            tokio::spawn(inner.drain());
        }

        TaskHandle {
            state: HandleState::Queued(rx),
        }
    }

    /// Replace the active configuration.
    ///
    /// The worker reads the new values before it starts its next task; a
    /// task already running is unaffected.
    pub fn reconfigure(&self, config: QueueConfig) {
        if config.max_concurrent > 1 {
            warn_max_concurrent(config.max_concurrent);
        }
        info!(
            enabled = config.enabled,
            delay_ms = config.delay_ms,
            "Queue reconfigured"
        );
        *self
            .inner
            .config
            .write()
            .unwrap_or_else(PoisonError::into_inner) = config;
    }

    /// Snapshot of the active configuration
    pub fn config(&self) -> QueueConfig {
        self.inner.config()
    }

    pub fn state(&self) -> QueueState {
        if self.inner.lock_pending().draining {
            QueueState::Draining
        } else {
            QueueState::Idle
        }
    }

    /// Number of tasks waiting to start
    pub fn pending(&self) -> usize {
        self.inner.lock_pending().jobs.len()
    }
}

impl Default for TaskQueue {
    fn default() -> Self {
        Self::new(QueueConfig::default())
    }
}

impl std::fmt::Debug for TaskQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskQueue")
            .field("config", &self.config())
            .field("state", &self.state())
            .field("pending", &self.pending())
            .finish()
    }
}

impl Inner {
    fn config(&self) -> QueueConfig {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn lock_pending(&self) -> MutexGuard<'_, Pending> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Worker loop. Exactly one runs while `draining` is set.
    ///
    /// Pacing only applies between tasks drained by the same run, so the
    /// first task after an idle period starts immediately.
    async fn drain(self: Arc<Self>) {
        let mut last_settled: Option<Instant> = None;
        loop {
            {
                // Clearing the flag under the same lock that saw the empty
                // list means a concurrent enqueue either lands before this
                // check or starts a fresh worker.
                let mut pending = self.lock_pending();
                if pending.jobs.is_empty() {
                    pending.draining = false;
                    info!("Queue idle");
                    return;
                }
            }

            if let Some(settled_at) = last_settled {
                self.pace(settled_at).await;
            }

            let Some(job) = self.lock_pending().jobs.pop_front() else {
                continue;
            };

            debug!(task_id = job.id, "Task started");
            job.run.await;
            last_settled = Some(Instant::now());
            debug!(task_id = job.id, "Task settled");
        }
    }

    /// Wait until `delay_ms` has passed since the previous task settled.
    async fn pace(&self, settled_at: Instant) {
        let config = self.config();
        let ready_at = settled_at + config.delay();
        if ready_at > Instant::now() {
            debug!(delay_ms = config.delay_ms, "Pacing before next task");
            tokio::time::sleep_until(ready_at).await;
        }
    }
}

fn warn_max_concurrent(max_concurrent: u32) {
    warn!(
        max_concurrent,
        "queue.max_concurrent > 1 is not supported yet; tasks still run one at a time"
    );
}

/// Pending outcome of an enqueued task.
///
/// Resolves exactly once with the task's own output, or with
/// [`QueueError::TaskPanicked`] if the task panicked. Dropping the handle
/// does not cancel the task.
#[must_use = "the task runs regardless; drop the handle only if the outcome is not needed"]
pub struct TaskHandle<T> {
    state: HandleState<T>,
}

enum HandleState<T> {
    Queued(oneshot::Receiver<T>),
    Direct(JoinHandle<T>),
}

impl<T> Future for TaskHandle<T> {
    type Output = Result<T, QueueError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match &mut self.get_mut().state {
            HandleState::Queued(rx) => Pin::new(rx)
                .poll(cx)
                .map(|r| r.map_err(|_| QueueError::TaskPanicked)),
            HandleState::Direct(handle) => Pin::new(handle)
                .poll(cx)
                .map(|r| r.map_err(|_| QueueError::TaskPanicked)),
        }
    }
}
