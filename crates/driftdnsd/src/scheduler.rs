//! Fixed-interval scheduling of reconciliation cycles.
//!
//! One cycle runs at a time. When a cycle overruns its interval, the ticks
//! it overlapped are dropped rather than queued, so a slow provider never
//! produces a burst of catch-up cycles.

use std::future::Future;
use std::time::Duration;

use tokio::time::{interval, MissedTickBehavior};
use tracing::info;

/// One scheduler-driven unit of work.
#[allow(async_fn_in_trait)]
pub trait Tick {
    /// Run a single pass to completion.
    async fn tick(&mut self);
}

/// Drive `runner` once per `period` until `shutdown` resolves.
///
/// The first tick fires immediately. An in-flight tick always runs to
/// completion; the shutdown future is only consulted between ticks, and
/// wins over a pending tick.
pub async fn run_cycles<T, S>(period: Duration, shutdown: S, runner: &mut T)
where
    T: Tick,
    S: Future<Output = ()>,
{
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            biased;

            () = &mut shutdown => break,
            _ = ticker.tick() => runner.tick().await,
        }
    }
}

/// Installed process signal handlers, waiting to fire.
///
/// Installation is separate from waiting so that a failure to register the
/// handlers surfaces at startup instead of silently stopping the daemon.
pub struct ShutdownSignal {
    #[cfg(unix)]
    sigterm: tokio::signal::unix::Signal,
    #[cfg(unix)]
    sigint: tokio::signal::unix::Signal,
}

impl ShutdownSignal {
    /// Register handlers for the process termination signals.
    #[cfg(unix)]
    pub fn install() -> std::io::Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        Ok(Self {
            sigterm: signal(SignalKind::terminate())?,
            sigint: signal(SignalKind::interrupt())?,
        })
    }

    #[cfg(not(unix))]
    pub fn install() -> std::io::Result<Self> {
        Ok(Self {})
    }

    /// Resolve when a termination signal arrives.
    #[cfg(unix)]
    pub async fn wait(mut self) {
        let signal = tokio::select! {
            _ = self.sigterm.recv() => "SIGTERM",
            _ = self.sigint.recv() => "SIGINT",
        };
        info!(signal, "shutdown signal received");
    }

    #[cfg(not(unix))]
    pub async fn wait(self) {
        let _ = tokio::signal::ctrl_c().await;
        info!(signal = "ctrl-c", "shutdown signal received");
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use tokio::time::{sleep, Instant};

    use super::*;

    /// Records when each tick started, relative to construction. Each tick
    /// takes the next queued duration; once the queue is empty, ticks are
    /// instantaneous.
    struct RecordingTick {
        origin: Instant,
        durations: VecDeque<Duration>,
        starts: Vec<Duration>,
    }

    impl RecordingTick {
        fn new<I: IntoIterator<Item = u64>>(durations_secs: I) -> Self {
            Self {
                origin: Instant::now(),
                durations: durations_secs.into_iter().map(Duration::from_secs).collect(),
                starts: Vec::new(),
            }
        }
    }

    impl Tick for RecordingTick {
        async fn tick(&mut self) {
            self.starts.push(self.origin.elapsed());
            if let Some(duration) = self.durations.pop_front() {
                sleep(duration).await;
            }
        }
    }

    fn seconds(values: &[u64]) -> Vec<Duration> {
        values.iter().copied().map(Duration::from_secs).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_fires_immediately() {
        let mut runner = RecordingTick::new([]);

        run_cycles(
            Duration::from_secs(60),
            sleep(Duration::from_secs(1)),
            &mut runner,
        )
        .await;

        assert_eq!(runner.starts, seconds(&[0]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_follow_the_interval() {
        let mut runner = RecordingTick::new([]);

        run_cycles(
            Duration::from_secs(60),
            sleep(Duration::from_secs(150)),
            &mut runner,
        )
        .await;

        assert_eq!(runner.starts, seconds(&[0, 60, 120]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_overrun_drops_missed_ticks() {
        // The first tick takes 150s against a 60s period, overlapping the
        // ticks at 60s and 120s. Those are dropped: one late tick fires
        // when the slow cycle ends, then the schedule is back on the 60s
        // grid instead of rapid-firing the backlog.
        let mut runner = RecordingTick::new([150]);

        run_cycles(
            Duration::from_secs(60),
            sleep(Duration::from_secs(250)),
            &mut runner,
        )
        .await;

        assert_eq!(runner.starts, seconds(&[0, 150, 180, 240]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_in_flight_tick_completes_before_shutdown() {
        let start = Instant::now();
        let mut runner = RecordingTick::new([90]);

        // Shutdown arrives 30s into the first 90s tick.
        run_cycles(
            Duration::from_secs(60),
            sleep(Duration::from_secs(30)),
            &mut runner,
        )
        .await;

        assert_eq!(runner.starts.len(), 1);
        assert_eq!(start.elapsed(), Duration::from_secs(90));
    }
}
