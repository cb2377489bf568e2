//! Session timer

use std::future::Future;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Time between ticks
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// What the tick handler wants next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerControl {
    Continue,
    Stop,
}

/// Ticks once per second until the handler returns [`TimerControl::Stop`]
/// or the timer is cancelled.
///
/// Cancellation is cooperative: a tick that is already running completes,
/// and no further tick starts. A handler may therefore cancel its own timer.
#[derive(Debug, Default)]
pub struct SessionTimer {
    cancel: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl SessionTimer {
    /// A timer that is not running
    pub fn idle() -> Self {
        Self::default()
    }

    /// Spawn the tick loop. The first tick fires one interval after start.
    pub fn start<F, Fut>(period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = TimerControl> + Send,
    {
        let (cancel_tx, mut cancel_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    _ = &mut cancel_rx => break,
                    _ = ticker.tick() => {
                        if on_tick().await == TimerControl::Stop {
                            break;
                        }
                    }
                }
            }
        });

        Self {
            cancel: Some(cancel_tx),
            task: Some(task),
        }
    }

    /// Stop ticking. Safe to call repeatedly.
    pub fn cancel(&mut self) {
        // Dropping the sender wakes the loop
        self.cancel.take();
        self.task.take();
    }

    /// Whether the tick loop is still alive
    pub fn is_running(&self) -> bool {
        self.cancel.is_some() && self.task.as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl Drop for SessionTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    fn counting_timer(ticks: Arc<AtomicU64>, stop_at: u64) -> SessionTimer {
        SessionTimer::start(TICK_INTERVAL, move || {
            let ticks = Arc::clone(&ticks);
            async move {
                let n = ticks.fetch_add(1, Ordering::SeqCst) + 1;
                if n >= stop_at {
                    TimerControl::Stop
                } else {
                    TimerControl::Continue
                }
            }
        })
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_second() {
        let ticks = Arc::new(AtomicU64::new(0));
        let _timer = counting_timer(Arc::clone(&ticks), u64::MAX);

        tokio::time::sleep(Duration::from_millis(3500)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn handler_stop_ends_the_loop() {
        let ticks = Arc::new(AtomicU64::new(0));
        let timer = counting_timer(Arc::clone(&ticks), 2);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 2);
        assert!(!timer.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_prevents_further_ticks() {
        let ticks = Arc::new(AtomicU64::new(0));
        let mut timer = counting_timer(Arc::clone(&ticks), u64::MAX);

        tokio::time::sleep(Duration::from_millis(2500)).await;
        timer.cancel();
        tokio::time::sleep(Duration::from_secs(10)).await;

        assert_eq!(ticks.load(Ordering::SeqCst), 2);
        assert!(!timer.is_running());
    }

    #[test]
    fn idle_timer_is_not_running() {
        assert!(!SessionTimer::idle().is_running());
    }
}
