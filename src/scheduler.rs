//! Delayed task scheduling for reconciliation refreshes
//!
//! The post-create refresh is an explicit schedulable task with an identity
//! rather than a bare timer. Scheduled tasks cannot currently be cancelled;
//! once scheduled they always fire.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// A task handed to the scheduler
pub type BoxedTask = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Identity of a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

impl TaskId {
    /// Construct a task id; for scheduler implementations
    pub fn new(id: u64) -> Self {
        TaskId(id)
    }
}

/// Schedules a task to run once after a delay
pub trait RefreshScheduler: Send + Sync {
    fn schedule(&self, delay: Duration, task: BoxedTask) -> TaskId;
}

/// Scheduler backed by the Tokio runtime
#[derive(Debug, Default)]
pub struct TokioScheduler {
    next_id: AtomicU64,
}

impl RefreshScheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: BoxedTask) -> TaskId {
        let id = TaskId(self.next_id.fetch_add(1, Ordering::Relaxed));
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    };

    #[tokio::test(start_paused = true)]
    async fn tokio_scheduler_runs_task_after_delay() {
        let scheduler = TokioScheduler::default();
        let fired = Arc::new(AtomicBool::new(false));
        let flag = fired.clone();

        scheduler.schedule(
            Duration::from_millis(1500),
            Box::pin(async move {
                flag.store(true, Ordering::SeqCst);
            }),
        );

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert!(!fired.load(Ordering::SeqCst));

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert!(fired.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn task_ids_are_distinct() {
        let scheduler = TokioScheduler::default();
        let a = scheduler.schedule(Duration::ZERO, Box::pin(async {}));
        let b = scheduler.schedule(Duration::ZERO, Box::pin(async {}));
        assert_ne!(a, b);
    }
}
