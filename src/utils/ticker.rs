// src/utils/ticker.rs

use std::future::Future;
use std::ops::ControlFlow;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// A repeating task that runs `on_tick` once per period.
///
/// The first tick fires one full period after `spawn`. The task ends when the
/// callback returns `ControlFlow::Break`, when `stop` is called, or when the
/// `Ticker` is dropped; there is never more than one task per `Ticker`.
#[derive(Debug)]
pub struct Ticker {
    handle: JoinHandle<()>,
}

impl Ticker {
    pub fn spawn<F, Fut>(period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ControlFlow<()>> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if on_tick().await.is_break() {
                    break;
                }
            }
            tracing::debug!("Ticker finished");
        });

        Self { handle }
    }

    /// Aborts the task. Must not be called from inside `on_tick`; return
    /// `ControlFlow::Break` there instead.
    pub fn stop(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_period_until_break() {
        let count = Arc::new(AtomicU32::new(0));
        let counter = count.clone();
        let ticker = Ticker::spawn(Duration::from_secs(1), move || {
            let counter = counter.clone();
            async move {
                let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                if n == 3 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            }
        });

        time::sleep(Duration::from_millis(999)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        time::sleep(Duration::from_secs(10)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
        assert!(ticker.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_ticker_stops_it() {
        let count = Arc::new(AtomicU32::new(0));
        let counter = count.clone();
        let ticker = Ticker::spawn(Duration::from_secs(1), move || {
            counter.fetch_add(1, Ordering::SeqCst);
            async { ControlFlow::Continue(()) }
        });

        time::sleep(Duration::from_millis(2500)).await;
        drop(ticker);
        time::sleep(Duration::from_secs(5)).await;

        assert_eq!(count.load(Ordering::SeqCst), 2);
    }
}
