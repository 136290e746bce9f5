//! Paint-cycle boundaries as an async abstraction.
//!
//! The engine's loops suspend once per rendered frame, not per unit of
//! wall-clock time. Any runtime that can observe ordered frame
//! boundaries satisfies the contract: a windowed context backed by a
//! real frame pump, or a headless context that simply yields.

use core::future::Future;
use core::time::Duration;

/// A source of paint-cycle boundaries.
pub trait FrameClock {
    /// Resolves at the next paint-cycle boundary.
    fn next_frame(&self) -> impl Future<Output = ()> + Send;
}

/// Frame clock backed by a fixed frame period.
///
/// Suitable for live preview surfaces where layout settles over real
/// frames. The default period matches a 60 Hz cadence.
#[derive(Debug, Clone, Copy)]
pub struct IntervalFrameClock {
    period: Duration,
}

impl IntervalFrameClock {
    pub const fn new(period: Duration) -> Self {
        Self { period }
    }

    pub const fn from_millis(millis: u64) -> Self {
        Self {
            period: Duration::from_millis(millis),
        }
    }
}

impl Default for IntervalFrameClock {
    fn default() -> Self {
        Self::from_millis(16)
    }
}

impl FrameClock for IntervalFrameClock {
    async fn next_frame(&self) {
        tokio::time::sleep(self.period).await;
    }
}

/// Frame clock that yields without sleeping.
///
/// Preserves cycle ordering for headless and batch-export contexts
/// where content reflow is synchronous with the resize, so waiting a
/// real frame would only slow the search down.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateFrameClock;

impl FrameClock for ImmediateFrameClock {
    async fn next_frame(&self) {
        tokio::task::yield_now().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn interval_clock_waits_one_frame_period() {
        let clock = IntervalFrameClock::from_millis(16);
        let before = tokio::time::Instant::now();
        clock.next_frame().await;
        assert_eq!(before.elapsed(), Duration::from_millis(16));
    }

    #[tokio::test]
    async fn immediate_clock_completes_without_sleeping() {
        ImmediateFrameClock.next_frame().await;
    }
}
