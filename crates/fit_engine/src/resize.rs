//! Interactive resize handling.
//!
//! Thin consumer of [`SizeSearchResult`]: free-drag resizing of a
//! preview box with an optional aspect-ratio lock, clamped to the same
//! bounds the search uses. Lives here so the preview and export layers
//! share one clamping rule; it performs no measurement of its own.

use crate::search::{SearchConfig, SizeSearchResult};
use fit_core::PixelSize;
use log::debug;

/// Drag-resize state for one preview box.
#[derive(Debug, Clone)]
pub struct ResizeController {
    size: PixelSize,
    bounds: SearchConfig,
    /// When set, height follows width at this ratio during drags.
    aspect_lock: Option<f64>,
    /// Size before the last applied auto-fit, for "shrunk from X to Y"
    /// reporting.
    natural_size: Option<PixelSize>,
}

impl ResizeController {
    pub fn new(size: PixelSize, bounds: SearchConfig) -> Self {
        Self {
            size,
            bounds,
            aspect_lock: None,
            natural_size: None,
        }
    }

    pub fn size(&self) -> PixelSize {
        self.size
    }

    /// Lock the aspect ratio for subsequent drags. Non-positive ratios
    /// clear the lock.
    pub fn set_aspect_lock(&mut self, ratio: Option<f64>) {
        self.aspect_lock = ratio.filter(|r| r.is_finite() && *r > 0.0);
    }

    /// Apply a drag to the given corner position. Under an aspect lock
    /// the dragged width wins and height is derived.
    pub fn drag_to(&mut self, width: u32, height: u32) -> PixelSize {
        let width = width.clamp(self.bounds.min_size, self.bounds.max_size);
        let height = match self.aspect_lock {
            Some(ratio) => (f64::from(width) / ratio).round().max(1.0) as u32,
            None => height.clamp(self.bounds.min_size, self.bounds.max_size),
        };
        self.size = PixelSize::new(width, height);
        self.size
    }

    /// Adopt an auto-fit result, remembering the pre-search size.
    pub fn apply_search_result(&mut self, result: &SizeSearchResult) {
        self.natural_size = result.natural_size;
        self.size = PixelSize::new(result.width, result.height);
        debug!("resize controller adopted auto-fit size {}", self.size);
    }

    /// The last auto-fit's "shrunk from X to Y" pair, if the fit
    /// actually changed the size.
    pub fn shrink_report(&self) -> Option<(PixelSize, PixelSize)> {
        let from = self.natural_size?;
        (from != self.size).then_some((from, self.size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_clamps_to_bounds() {
        let mut controller =
            ResizeController::new(PixelSize::new(200, 200), SearchConfig::default());
        assert_eq!(controller.drag_to(10, 5000), PixelSize::new(40, 4096));
    }

    #[test]
    fn aspect_lock_derives_height_from_width() {
        let mut controller =
            ResizeController::new(PixelSize::new(200, 200), SearchConfig::default());
        controller.set_aspect_lock(Some(2.0));
        assert_eq!(controller.drag_to(300, 999), PixelSize::new(300, 150));
    }

    #[test]
    fn shrink_report_tracks_natural_size() {
        let mut controller =
            ResizeController::new(PixelSize::new(400, 400), SearchConfig::default());
        controller.apply_search_result(&SizeSearchResult {
            width: 151,
            height: 151,
            natural_size: Some(PixelSize::new(400, 400)),
        });
        assert_eq!(
            controller.shrink_report(),
            Some((PixelSize::new(400, 400), PixelSize::new(151, 151)))
        );
    }

    #[test]
    fn no_shrink_report_when_size_unchanged() {
        let mut controller =
            ResizeController::new(PixelSize::new(151, 151), SearchConfig::default());
        controller.apply_search_result(&SizeSearchResult {
            width: 151,
            height: 151,
            natural_size: Some(PixelSize::new(151, 151)),
        });
        assert_eq!(controller.shrink_report(), None);
    }
}
