//! Layout stability detection.
//!
//! A freshly mounted or resized surface does not reach its final layout
//! on the first paint: fonts land, images decode, flex containers take
//! a second pass. A measurement taken too early reports a size that is
//! about to change. [`StabilityProbe`] polls the target's box size once
//! per paint cycle until it stops changing, handling both "never moved"
//! and "moved then settled" cases, with a mount wait and an attempt
//! budget so a broken surface can never stall a pipeline.

use crate::frame::FrameClock;
use fit_core::{PixelSize, RenderTarget};
use log::{debug, trace};

/// Phase reported to the diagnostic sink. Purely informational; the
/// sink has no behavioral effect on the probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StabilityPhase {
    /// Waiting for the target to mount.
    AwaitingMount,
    /// Mounted, waiting on the caller's readiness predicate.
    AwaitingReady,
    /// Sampling the box size each cycle.
    Tracking,
    /// Size held still for the required quiet period.
    Stable,
    /// Attempt budget ran out while the size was still moving.
    TimedOut,
    /// Cooperative cancellation observed.
    Aborted,
}

/// Tuning knobs for a stability probe.
#[derive(Debug, Clone, Copy)]
pub struct StabilityOptions {
    /// Polling-cycle budget for mounting and for tracking.
    pub max_attempts: u32,
    /// Consecutive equal samples required when the size has not changed
    /// since the first sample. Longer, to rule out a slow initial
    /// layout pass that has simply not landed yet.
    pub stable_cycles_initial: u32,
    /// Consecutive equal samples required once a change has been seen.
    /// Shorter: the initial instability is already evidenced, the size
    /// only has to prove it stopped moving.
    pub stable_cycles_after_change: u32,
}

impl Default for StabilityOptions {
    fn default() -> Self {
        Self {
            max_attempts: 120,
            stable_cycles_initial: 10,
            stable_cycles_after_change: 3,
        }
    }
}

/// Extra polling cycles granted to the readiness predicate beyond
/// `max_attempts` before it becomes advisory.
const READY_GRACE_CYCLES: u32 = 30;

/// A single settle-detection pass over one render target.
///
/// Never returns an error: absence of stability is represented as
/// `None` (aborted, or never mounted within the attempt budget) or as a
/// best-effort last-observed size on tracking timeout.
pub struct StabilityProbe<'a, T: RenderTarget, C: FrameClock> {
    pub clock: &'a C,
    pub target: &'a T,
    pub options: StabilityOptions,
    /// Cooperative cancellation, polled at the top of every cycle.
    pub should_abort: &'a dyn Fn() -> bool,
    /// Optional extra gate, e.g. "has the component painted content".
    /// Advisory once its grace budget runs out; it never blocks forever.
    pub custom_ready: Option<&'a dyn Fn(&T) -> bool>,
    /// Optional diagnostic sink for phase transitions.
    pub on_event: Option<&'a dyn Fn(StabilityPhase, &str)>,
}

impl<T: RenderTarget, C: FrameClock> StabilityProbe<'_, T, C> {
    /// Poll until the target's box size settles.
    ///
    /// Returns the rounded stable size, the last observed size if the
    /// attempt budget runs out mid-motion, or `None` when aborted or
    /// when the target never mounts.
    pub async fn await_stable(&self) -> Option<PixelSize> {
        let Some(first) = self.await_mount().await? else {
            return None;
        };
        self.await_ready().await?;
        self.track(first).await
    }

    fn emit(&self, phase: StabilityPhase, message: &str) {
        trace!("stability {phase:?}: {message}");
        if let Some(sink) = self.on_event {
            sink(phase, message);
        }
    }

    fn aborted(&self) -> bool {
        if (self.should_abort)() {
            self.emit(StabilityPhase::Aborted, "abort requested");
            true
        } else {
            false
        }
    }

    /// Wait for the target to mount, returning its first size sample.
    /// Outer `None` is an abort; inner `None` is a mount timeout.
    async fn await_mount(&self) -> Option<Option<PixelSize>> {
        for attempt in 0..self.options.max_attempts {
            if self.aborted() {
                return None;
            }
            if let Some(size) = self.target.box_size() {
                return Some(Some(size.round()));
            }
            if attempt == 0 {
                self.emit(StabilityPhase::AwaitingMount, "target not mounted yet");
            }
            self.clock.next_frame().await;
        }
        debug!(
            "target never mounted within {} cycles",
            self.options.max_attempts
        );
        self.emit(StabilityPhase::AwaitingMount, "mount wait timed out");
        Some(None)
    }

    /// Wait for the caller's readiness predicate, if any. Past its
    /// grace budget the predicate becomes advisory and tracking starts
    /// anyway.
    async fn await_ready(&self) -> Option<()> {
        let Some(ready) = self.custom_ready else {
            return Some(());
        };
        let budget = self.options.max_attempts + READY_GRACE_CYCLES;
        for cycle in 0..budget {
            if self.aborted() {
                return None;
            }
            if ready(self.target) {
                return Some(());
            }
            if cycle == 0 {
                self.emit(StabilityPhase::AwaitingReady, "readiness gate not satisfied");
            }
            self.clock.next_frame().await;
        }
        self.emit(
            StabilityPhase::AwaitingReady,
            "readiness gate timed out, proceeding anyway",
        );
        Some(())
    }

    async fn track(&self, first: PixelSize) -> Option<PixelSize> {
        let mut previous = first;
        let mut has_changed = false;
        let mut matches = 0u32;
        self.emit(StabilityPhase::Tracking, "sampling box size");

        // The mount wait consumed the first sample; every further cycle
        // takes one new sample and compares it to the previous one.
        for _ in 0..self.options.max_attempts {
            if self.aborted() {
                return None;
            }
            self.clock.next_frame().await;

            let sample = match self.target.box_size() {
                Some(size) => size.round(),
                // Target unmounted mid-track; keep polling, it may
                // remount within the budget.
                None => continue,
            };

            if sample == previous {
                matches += 1;
                let required = if has_changed {
                    self.options.stable_cycles_after_change
                } else {
                    self.options.stable_cycles_initial
                };
                if matches >= required {
                    self.emit(StabilityPhase::Stable, "size settled");
                    debug!("layout stable at {sample} after {matches} quiet cycles");
                    return Some(sample);
                }
            } else {
                // Still moving: new baseline, restart the quiet period
                // with the shorter post-change threshold.
                has_changed = true;
                matches = 0;
                previous = sample;
            }
        }

        // Best effort: report the last observed size rather than
        // failing the caller.
        self.emit(StabilityPhase::TimedOut, "size still moving at budget");
        debug!(
            "stability budget of {} cycles exhausted, reporting last size {previous}",
            self.options.max_attempts
        );
        Some(previous)
    }
}
