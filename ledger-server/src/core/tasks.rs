//! Background tasks
//!
//! Long-running loops share one [`CancellationToken`]; `shutdown` cancels
//! it and waits for every task to return.

use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::cache::TtlCache;

struct RegisteredTask {
    name: &'static str,
    handle: JoinHandle<()>,
}

pub struct BackgroundTasks {
    tasks: Vec<RegisteredTask>,
    shutdown: CancellationToken,
}

impl BackgroundTasks {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    pub fn spawn<F>(&mut self, name: &'static str, future: F)
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(future);
        tracing::debug!(task = %name, "Registered background task");
        self.tasks.push(RegisteredTask { name, handle });
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Cancel all tasks and wait for them
    pub async fn shutdown(self) {
        tracing::info!("Shutting down {} background tasks...", self.tasks.len());
        self.shutdown.cancel();

        for task in self.tasks {
            match task.handle.await {
                Ok(()) => tracing::debug!(task = %task.name, "Task completed"),
                Err(e) if e.is_cancelled() => tracing::debug!(task = %task.name, "Task cancelled"),
                Err(e) => tracing::error!(task = %task.name, error = ?e, "Task panicked"),
            }
        }
    }
}

impl Default for BackgroundTasks {
    fn default() -> Self {
        Self::new()
    }
}

/// Sweep expired cache entries every `period` until cancelled
pub async fn purge_cache_periodically<K, V>(
    cache: TtlCache<K, V>,
    period: Duration,
    shutdown: CancellationToken,
) where
    K: Eq + std::hash::Hash + Clone,
    V: Clone,
{
    let mut interval = tokio::time::interval(period);
    // First tick fires immediately
    interval.tick().await;
    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = interval.tick() => {
                let purged = cache.purge_expired();
                if purged > 0 {
                    tracing::debug!(purged, "Expired cache entries removed");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_purge_task_sweeps_and_stops_on_shutdown() {
        let cache: TtlCache<i64, u32> = TtlCache::new();
        cache
            .get_or_fetch(1, Duration::from_secs(1), || async { Ok::<_, ()>(1) })
            .await
            .unwrap();

        let mut tasks = BackgroundTasks::new();
        let token = tasks.shutdown_token();
        tasks.spawn(
            "cache_purge",
            purge_cache_periodically(cache.clone(), Duration::from_secs(10), token),
        );
        assert_eq!(tasks.len(), 1);

        tokio::time::sleep(Duration::from_secs(11)).await;
        assert!(cache.is_empty());

        tasks.shutdown().await;
    }
}
