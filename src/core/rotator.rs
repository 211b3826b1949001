use crate::core::state::StateHandle;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

pub const DEFAULT_QUOTE_INTERVAL: Duration = Duration::from_secs(5);
/// Shortest accepted period; a zero period would stall the timer.
pub const MIN_QUOTE_INTERVAL: Duration = Duration::from_millis(1);

/// Pointer after one tick over `len` quotes; unchanged when there are none.
pub fn next_index(current: usize, len: usize) -> usize {
    if len == 0 {
        return current;
    }
    (current + 1) % len
}

/// Background timer advancing the quote pointer. The task reads the live
/// quotes length on every tick, so it never needs restarting after a
/// reload. Dropping the rotator stops the timer.
#[derive(Debug)]
pub struct QuoteRotator {
    handle: JoinHandle<()>,
    period: Duration,
}

impl QuoteRotator {
    pub fn start(state: StateHandle, period: Duration) -> Self {
        let period = period.max(MIN_QUOTE_INTERVAL);
        let first_tick = Instant::now() + period;
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(first_tick, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if state.update_if(|s| s.advance_quote()) {
                    tracing::trace!("Quote pointer advanced");
                }
            }
        });
        tracing::debug!("Quote rotator started ({:?} interval)", period);
        Self { handle, period }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    pub fn stop(self) {
        // Drop does the work.
    }
}

impl Drop for QuoteRotator {
    fn drop(&mut self) {
        self.handle.abort();
        tracing::debug!("Quote rotator stopped");
    }
}
