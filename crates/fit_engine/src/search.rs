//! Minimal-size search at a fixed aspect ratio.
//!
//! Given a mounted target and an aspect ratio, find the smallest width
//! (height derived from the ratio) whose box contains the rendered
//! content. Every probe resizes the target, waits a short settle, and
//! measures; a starting size that already fits is bisected downward,
//! one that does not is doubled outward first. The search treats
//! measurement as an opaque, possibly expensive oracle and assumes fit
//! is monotonic in width; content whose reflow violates that (text that
//! wraps worse at larger widths) gets a usable size, not an optimal
//! one.

use crate::frame::FrameClock;
use fit_core::{measure, PixelSize, RenderTarget};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use tracing::{info_span, Instrument};

/// Search bounds and padding, caller-supplied per invocation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Smallest width the search will consider.
    pub min_size: u32,
    /// Hard cap on probed widths; the search never exceeds it.
    pub max_size: u32,
    /// Padding added to the final fitting size to avoid rounding-induced
    /// false overflow at the exact boundary.
    pub safety_margin: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_size: 40,
            max_size: 4096,
            safety_margin: 1,
        }
    }
}

/// Outcome of a completed (or best-effort) search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeSearchResult {
    pub width: u32,
    pub height: u32,
    /// The box's size before any search-induced resizing, for callers
    /// reporting "shrunk from X to Y".
    pub natural_size: Option<PixelSize>,
}

/// One auto-sizing search over one target.
///
/// The session owns no state across invocations; it borrows a frame
/// clock and a cancellation predicate and mutates only the target's box
/// size. At most one session may be active against a given target at a
/// time (see [`RenderTarget`]).
pub struct SizeSearchSession<'a, C: FrameClock> {
    pub clock: &'a C,
    pub config: SearchConfig,
    /// Cooperative cancellation, checked before every probe. A probe
    /// that has started always completes its settle-and-measure.
    pub should_continue: &'a dyn Fn() -> bool,
}

impl<C: FrameClock> SizeSearchSession<'_, C> {
    /// Find the minimal box size at `aspect_ratio` that contains the
    /// target's content.
    ///
    /// Returns `None` for an absent or unmounted target, a non-positive
    /// aspect ratio, or cancellation — callers that need to tell these
    /// apart track their own cancellation token. When no width up to
    /// `max_size` fits, a best-effort non-fitting size is returned
    /// instead of failing, so batch pipelines always get *some* size.
    /// On cancellation the target is left at its last probed size;
    /// restoring it is the caller's responsibility.
    pub async fn find_optimal_size<T: RenderTarget>(
        &self,
        target: Option<&mut T>,
        aspect_ratio: f64,
    ) -> Option<SizeSearchResult> {
        let span = info_span!("size_search", aspect_ratio);
        self.run(target, aspect_ratio).instrument(span).await
    }

    async fn run<T: RenderTarget>(
        &self,
        target: Option<&mut T>,
        aspect_ratio: f64,
    ) -> Option<SizeSearchResult> {
        if !(aspect_ratio.is_finite() && aspect_ratio > 0.0) {
            warn!("rejecting size search with aspect ratio {aspect_ratio}");
            return None;
        }
        let target = target?;
        let natural = target.box_size()?.round();

        let start_width = natural
            .width
            .clamp(self.config.min_size, self.config.max_size);
        let start_height = derive_height(start_width, aspect_ratio).max(self.config.min_size);
        debug!("size search from {natural} (start width {start_width}, ratio {aspect_ratio:.3})");

        let starting_fits = self
            .probe_at(target, start_width, start_height)
            .await?;

        let best = if starting_fits {
            self.shrink(target, start_width, aspect_ratio).await?
        } else {
            match self.expand(target, start_width, aspect_ratio).await? {
                Expansion::Bracketed { low, high } => {
                    self.bisect(target, low, high, aspect_ratio).await?
                }
                Expansion::CapExhausted { width } => {
                    // Best effort: the content does not fit even at the
                    // cap. Hand back a capped, possibly overflowing size
                    // with no margin so the cap is never exceeded.
                    debug!(
                        "no fitting width up to cap {}, returning {width}",
                        self.config.max_size
                    );
                    return Some(SizeSearchResult {
                        width,
                        height: derive_height(width, aspect_ratio),
                        natural_size: Some(natural),
                    });
                }
            }
        };

        let width = best + self.config.safety_margin;
        let height = derive_height(width, aspect_ratio);
        debug!("size search converged on {best}, returning {width}x{height} with margin");
        Some(SizeSearchResult {
            width,
            height,
            natural_size: Some(natural),
        })
    }

    /// Resize the target to an explicit box and report whether the
    /// content fits. `None` means the search was cancelled before this
    /// probe started; a started probe always completes its
    /// settle-and-measure.
    async fn probe_at<T: RenderTarget>(
        &self,
        target: &mut T,
        width: u32,
        height: u32,
    ) -> Option<bool> {
        if !(self.should_continue)() {
            debug!("size search cancelled before probing width {width}");
            return None;
        }

        target.set_box_size(PixelSize::new(width, height).to_size());

        // Two-tick settle: resize-and-measure happens many times per
        // search, so a full stability pass per probe would be
        // prohibitively slow. One frame for the resize to land, one for
        // content reflow.
        self.clock.next_frame().await;
        self.clock.next_frame().await;

        Some(measure(Some(&*target)).fits)
    }

    async fn probe<T: RenderTarget>(
        &self,
        target: &mut T,
        width: u32,
        aspect_ratio: f64,
    ) -> Option<bool> {
        self.probe_at(target, width, derive_height(width, aspect_ratio))
            .await
    }

    /// The starting size fits: search downward for the minimum fitting
    /// width. The floor is probed directly first so a tiny content
    /// short-circuits the whole bisection.
    async fn shrink<T: RenderTarget>(
        &self,
        target: &mut T,
        start_width: u32,
        aspect_ratio: f64,
    ) -> Option<u32> {
        let low = self.config.min_size;
        if low >= start_width {
            return Some(start_width);
        }
        if self.probe(target, low, aspect_ratio).await? {
            return Some(low);
        }
        self.bisect(target, low, start_width, aspect_ratio).await
    }

    /// The starting size does not fit: double outward until a probe
    /// fits or the cap is reached.
    async fn expand<T: RenderTarget>(
        &self,
        target: &mut T,
        start_width: u32,
        aspect_ratio: f64,
    ) -> Option<Expansion> {
        let mut low = start_width;
        let mut high = start_width;
        while high < self.config.max_size {
            high = high.saturating_mul(2).min(self.config.max_size);
            if self.probe(target, high, aspect_ratio).await? {
                return Some(Expansion::Bracketed { low, high });
            }
            low = high;
        }
        Some(Expansion::CapExhausted { width: low })
    }

    /// Bisect between a known non-fitting `low` and a known fitting
    /// `high`, tracking the smallest fitting width seen.
    async fn bisect<T: RenderTarget>(
        &self,
        target: &mut T,
        mut low: u32,
        mut high: u32,
        aspect_ratio: f64,
    ) -> Option<u32> {
        let mut best = high;
        while high - low > 1 {
            let mid = low + (high - low) / 2;
            if self.probe(target, mid, aspect_ratio).await? {
                best = mid;
                high = mid;
            } else {
                low = mid;
            }
        }
        Some(best)
    }
}

enum Expansion {
    /// `low` does not fit, `high` does.
    Bracketed { low: u32, high: u32 },
    /// Nothing up to the cap fits; `width` is the capped best effort.
    CapExhausted { width: u32 },
}

/// Height is always derived from width; the aspect ratio reduces the
/// search to a single degree of freedom.
fn derive_height(width: u32, aspect_ratio: f64) -> u32 {
    (f64::from(width) / aspect_ratio).round().max(1.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_height_rounds_to_nearest_pixel() {
        assert_eq!(derive_height(151, 1.0), 151);
        assert_eq!(derive_height(100, 1.6), 63); // 62.5 rounds up
        assert_eq!(derive_height(3, 16.0), 1); // never below one pixel
    }

    #[test]
    fn default_config_matches_documented_fallbacks() {
        let config = SearchConfig::default();
        assert_eq!(config.min_size, 40);
        assert_eq!(config.max_size, 4096);
        assert_eq!(config.safety_margin, 1);
    }
}
