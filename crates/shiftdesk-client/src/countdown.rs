//! Repeating tick source for the resend cooldown.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

const MIN_PERIOD: Duration = Duration::from_millis(1);

/// A background ticker bound to the lifetime of this value.
///
/// Start it when the code entry step opens. Dropping it on any exit path stops the task.
#[derive(Debug)]
pub struct Countdown {
    ticks: mpsc::Receiver<()>,
    task: JoinHandle<()>,
}

impl Countdown {
    /// Tick every `period`, first tick one period from now. Periods under 1 ms are raised to 1 ms.
    pub fn start(period: Duration) -> Self {
        let period = period.max(MIN_PERIOD);
        let (tx, ticks) = mpsc::channel(1);
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(()).await.is_err() {
                    break;
                }
            }
        });
        Self { ticks, task }
    }

    pub fn every_second() -> Self {
        Self::start(Duration::from_secs(1))
    }

    /// Wait for the next tick. Returns false once the ticker has stopped.
    pub async fn tick(&mut self) -> bool {
        self.ticks.recv().await.is_some()
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::otp::OtpEntry;

    #[tokio::test(start_paused = true)]
    async fn test_ticks_once_per_period() {
        let started = Instant::now();
        let mut countdown = Countdown::every_second();

        assert!(countdown.tick().await);
        assert!(countdown.tick().await);
        assert!(countdown.tick().await);

        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(3), "elapsed: {elapsed:?}");
        assert!(elapsed < Duration::from_secs(4), "elapsed: {elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn test_drives_otp_cooldown_to_zero() {
        let mut otp = OtpEntry::with_length(4, 5);
        let mut countdown = Countdown::every_second();

        while countdown.tick().await {
            if otp.tick() {
                break;
            }
        }

        assert!(otp.can_resend());
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_period_is_clamped() {
        let started = Instant::now();
        let mut countdown = Countdown::start(Duration::ZERO);

        assert!(countdown.tick().await);
        assert!(started.elapsed() >= MIN_PERIOD);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_task() {
        let countdown = Countdown::every_second();
        let handle = countdown.task.abort_handle();
        assert!(!handle.is_finished());

        drop(countdown);
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert!(handle.is_finished());
    }
}
