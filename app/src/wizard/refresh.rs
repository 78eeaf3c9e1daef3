use tokio::{
    sync::mpsc::{Sender, error::TrySendError},
    time::MissedTickBehavior,
};
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::core::time::Duration;

const MIN_PERIOD: std::time::Duration = std::time::Duration::from_secs(1);

/// Request for the shell to re-read derived values. Carries no data; the values are
/// recomputed against the clock at read time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repaint {
    NowTick,
}

/// Repeating repaint request while a NOW start is being configured. Stops when dropped.
/// A slow shell never accumulates a backlog: ticks are dropped while the channel is full
/// and missed ticks are skipped rather than replayed.
pub struct RefreshTimer {
    _guard: DropGuard,
}

impl RefreshTimer {
    /// Spawns onto the current tokio runtime. The first tick fires one period after start.
    pub fn start(period: Duration, repaint_tx: Sender<Repaint>) -> Self {
        let period = std::time::Duration::from(period).max(MIN_PERIOD);
        let token = CancellationToken::new();
        let cancelled = token.clone();

        tokio::spawn(async move {
            let mut timer = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
            tracing::debug!("Refresh timer started with period {:?}", period);

            loop {
                tokio::select! {
                    biased;

                    _ = cancelled.cancelled() => break,

                    _ = timer.tick() => match repaint_tx.try_send(Repaint::NowTick) {
                        Ok(()) => {}
                        Err(TrySendError::Full(_)) => tracing::trace!("Repaint still pending, tick dropped"),
                        Err(TrySendError::Closed(_)) => {
                            tracing::debug!("Repaint receiver gone");
                            break;
                        }
                    },
                }
            }

            tracing::debug!("Refresh timer stopped");
        });

        Self {
            _guard: token.drop_guard(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::t;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn ticks_every_period() {
        let (tx, mut rx) = mpsc::channel(8);
        let _timer = RefreshTimer::start(t!(20 seconds), tx);

        tokio::time::sleep(std::time::Duration::from_secs(61)).await;

        let mut ticks = 0;
        while let Ok(repaint) = rx.try_recv() {
            assert_eq!(repaint, Repaint::NowTick);
            ticks += 1;
        }
        assert_eq!(ticks, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn no_tick_after_drop() {
        let (tx, mut rx) = mpsc::channel(8);
        let timer = RefreshTimer::start(t!(20 seconds), tx);

        tokio::time::sleep(std::time::Duration::from_secs(25)).await;
        drop(timer);
        tokio::time::sleep(std::time::Duration::from_secs(100)).await;

        assert_eq!(rx.try_recv(), Ok(Repaint::NowTick));
        assert!(rx.try_recv().is_err());
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_receiver_holds_a_single_repaint() {
        let (tx, mut rx) = mpsc::channel(1);
        let _timer = RefreshTimer::start(t!(20 seconds), tx);

        tokio::time::sleep(std::time::Duration::from_secs(110)).await;

        assert_eq!(rx.try_recv(), Ok(Repaint::NowTick));
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(std::time::Duration::from_secs(30)).await;

        assert_eq!(rx.try_recv(), Ok(Repaint::NowTick));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn period_has_a_floor() {
        let (tx, mut rx) = mpsc::channel(8);
        let _timer = RefreshTimer::start(t!(0 seconds), tx);

        tokio::time::sleep(std::time::Duration::from_millis(2500)).await;

        let mut ticks = 0;
        while rx.try_recv().is_ok() {
            ticks += 1;
        }
        assert_eq!(ticks, 2);
    }
}
