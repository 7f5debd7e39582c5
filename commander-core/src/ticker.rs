//! Cancellable periodic tick.
//!
//! A [`TickHandle`] owns one tokio task. [`TickHandle::stop`] shuts it down
//! and waits for it; dropping the handle aborts it. Either way the task
//! never outlives its owner.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

/// Intervals below this are raised to it.
pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(10);

pub struct TickHandle {
    shutdown_tx: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
    ticks: Arc<AtomicU64>,
}

impl TickHandle {
    /// Spawns the tick task on the current runtime. `on_tick` receives the
    /// 1-based tick number. The first call happens one `interval` after
    /// spawn.
    pub fn spawn<F>(interval: Duration, mut on_tick: F) -> Self
    where
        F: FnMut(u64) + Send + 'static,
    {
        let interval = interval.max(MIN_TICK_INTERVAL);
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let ticks = Arc::new(AtomicU64::new(0));
        let counter = ticks.clone();

        let task = tokio::spawn(async move {
            let mut timer = tokio::time::interval(interval);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick of a tokio interval completes immediately.
            timer.tick().await;

            loop {
                tokio::select! {
                    _ = timer.tick() => {
                        let n = counter.fetch_add(1, Ordering::Relaxed) + 1;
                        on_tick(n);
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }
            debug!("tick task stopped");
        });

        debug!("tick task started ({interval:?})");
        Self {
            shutdown_tx,
            task: Some(task),
            ticks,
        }
    }

    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Signals shutdown and waits for the task to exit. A task that ended
    /// in a panic is reported and returns false.
    pub async fn stop(mut self) -> bool {
        let _ = self.shutdown_tx.send(true);
        let Some(task) = self.task.take() else {
            return true;
        };
        match task.await {
            Ok(()) => true,
            Err(err) => {
                warn!("tick task ended abnormally: {err}");
                false
            }
        }
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[tokio::test]
    async fn ticks_until_stopped() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let handle = TickHandle::spawn(Duration::from_millis(10), move |n| {
            sink.lock().expect("lock").push(n);
        });

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(handle.is_running());
        assert!(handle.ticks() >= 1);
        assert!(handle.stop().await);

        let stopped_at = seen.lock().expect("lock").len();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(seen.lock().expect("lock").len(), stopped_at);

        let numbers = seen.lock().expect("lock").clone();
        let expected: Vec<u64> = (1..=numbers.len() as u64).collect();
        assert_eq!(numbers, expected);
    }

    #[tokio::test]
    async fn drop_aborts_the_task() {
        let count = Arc::new(AtomicU64::new(0));
        let sink = count.clone();
        let handle = TickHandle::spawn(Duration::from_millis(10), move |_| {
            sink.fetch_add(1, Ordering::Relaxed);
        });
        tokio::time::sleep(Duration::from_millis(40)).await;
        drop(handle);

        tokio::time::sleep(Duration::from_millis(30)).await;
        let after_drop = count.load(Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(count.load(Ordering::Relaxed), after_drop);
    }

    #[tokio::test]
    async fn stop_reports_a_panicking_callback() {
        let handle = TickHandle::spawn(Duration::from_millis(10), |_| {
            panic!("tick callback failed");
        });
        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(!handle.is_running());
        assert!(!handle.stop().await);
    }

    #[test]
    fn min_interval_is_positive() {
        assert!(MIN_TICK_INTERVAL > Duration::ZERO);
    }
}
