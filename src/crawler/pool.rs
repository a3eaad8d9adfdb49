//! Bounded worker pool shared by the tasks of one stage
//!
//! A pool is created once per stage and reused for every batch of that
//! stage. A semaphore permit is taken *before* a task is spawned, so no more
//! than `size` tasks exist at any time and nothing fans out unboundedly.

use std::future::Future;
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Fixed-size pool of concurrent tasks
#[derive(Debug, Clone)]
pub struct WorkerPool {
    semaphore: Arc<Semaphore>,
    size: usize,
}

impl WorkerPool {
    /// Creates a pool running at most `size` tasks at once (minimum 1)
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(size)),
            size,
        }
    }

    /// Maximum number of tasks in flight
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of tasks currently holding a permit
    pub fn in_flight(&self) -> usize {
        self.size - self.semaphore.available_permits()
    }

    /// Runs `task` for every item and waits until all of them have finished
    ///
    /// Results come back in completion order. A task that panics is logged
    /// under its `label` (the URL it worked on) and contributes no result;
    /// it never takes the other tasks down.
    pub async fn run_all<I, L, F, Fut, T>(&self, items: I, label: L, task: F) -> Vec<T>
    where
        I: IntoIterator,
        L: Fn(&I::Item) -> String,
        F: Fn(I::Item) -> Fut,
        Fut: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let (results, failed) = self.run_tracked(items, label, task).await;
        if !failed.is_empty() {
            tracing::error!("{} worker tasks failed", failed.len());
        }
        results
    }

    /// Same as `run_all`, also returning the labels of the failed tasks
    async fn run_tracked<I, L, F, Fut, T>(
        &self,
        items: I,
        label: L,
        task: F,
    ) -> (Vec<T>, Vec<String>)
    where
        I: IntoIterator,
        L: Fn(&I::Item) -> String,
        F: Fn(I::Item) -> Fut,
        Fut: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let failures = Arc::new(Mutex::new(Vec::new()));
        let mut tasks = JoinSet::new();

        for item in items {
            let permit = match Arc::clone(&self.semaphore).acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    tracing::error!("Worker pool semaphore closed, stopping submission");
                    break;
                }
            };

            let guard = FailureGuard {
                label: Some(label(&item)),
                failures: Arc::clone(&failures),
            };
            let work = task(item);
            tasks.spawn(async move {
                let _permit = permit;
                let value = work.await;
                guard.disarm();
                value
            });
        }

        let mut results = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next().await {
            if let Ok(value) = joined {
                results.push(value);
            }
        }

        let failed = match failures.lock() {
            Ok(mut failed) => std::mem::take(&mut *failed),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        };
        (results, failed)
    }
}

/// Reports a task that ended without producing its value
///
/// Dropped armed only when the task panicked or was cancelled.
struct FailureGuard {
    label: Option<String>,
    failures: Arc<Mutex<Vec<String>>>,
}

impl FailureGuard {
    fn disarm(mut self) {
        self.label = None;
    }
}

impl Drop for FailureGuard {
    fn drop(&mut self) {
        if let Some(label) = self.label.take() {
            tracing::error!("Worker task for {} failed", label);
            if let Ok(mut failures) = self.failures.lock() {
                failures.push(label);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn label(n: &i32) -> String {
        n.to_string()
    }

    #[tokio::test]
    async fn test_runs_every_item() {
        let pool = WorkerPool::new(3);
        let mut results = pool.run_all(1..=10, label, |n| async move { n * 2 }).await;
        results.sort_unstable();

        assert_eq!(results, (1..=10).map(|n| n * 2).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_never_exceeds_bound() {
        let pool = WorkerPool::new(2);
        let current = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        pool.run_all(0..12, label, |_| {
            let current = Arc::clone(&current);
            let peak = Arc::clone(&peak);
            async move {
                let now = current.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(20)).await;
                current.fetch_sub(1, Ordering::SeqCst);
            }
        })
        .await;

        assert!(peak.load(Ordering::SeqCst) <= 2);
        assert_eq!(peak.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_permits_released_between_runs() {
        let pool = WorkerPool::new(4);
        pool.run_all(0..8, label, |n| async move { n }).await;
        assert_eq!(pool.in_flight(), 0);

        let second = pool.run_all(0..8, label, |n| async move { n }).await;
        assert_eq!(second.len(), 8);
        assert_eq!(pool.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_panicking_task_is_isolated() {
        let pool = WorkerPool::new(2);
        let (mut results, failed) = pool
            .run_tracked(0..4, |n| format!("https://example.com/detail/{}", n), |n| async move {
                if n == 1 {
                    panic!("boom");
                }
                n
            })
            .await;
        results.sort_unstable();

        assert_eq!(results, vec![0, 2, 3]);
        assert_eq!(failed, vec!["https://example.com/detail/1".to_string()]);
        assert_eq!(pool.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_no_failures_reported_on_success() {
        let pool = WorkerPool::new(2);
        let (results, failed) = pool.run_tracked(0..5, label, |n| async move { n }).await;

        assert_eq!(results.len(), 5);
        assert!(failed.is_empty());
    }

    #[test]
    fn test_zero_size_clamped() {
        assert_eq!(WorkerPool::new(0).size(), 1);
    }
}
