//! Geometry value types in logical pixels.
//!
//! All types are plain `Copy` values. Fractional geometry uses [`Size`]
//! and [`Rect`]; the search arithmetic works on whole logical pixels via
//! [`PixelSize`].

use serde::{Deserialize, Serialize};

/// A width/height pair in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Round both dimensions to the nearest whole pixel, clamping
    /// negatives to zero.
    pub fn round(self) -> PixelSize {
        PixelSize {
            width: self.width.max(0.0).round() as u32,
            height: self.height.max(0.0).round() as u32,
        }
    }
}

/// A width/height pair rounded to whole logical pixels.
///
/// This is the form the search and stability code trade in: one sample
/// per paint cycle, compared for exact equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn to_size(self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }
}

impl std::fmt::Display for PixelSize {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}x{}", self.width, self.height)
    }
}

/// Per-edge inset distances (border or padding) in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EdgeInsets {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl EdgeInsets {
    pub const ZERO: Self = Self {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
    };

    pub const fn uniform(inset: f64) -> Self {
        Self {
            top: inset,
            right: inset,
            bottom: inset,
            left: inset,
        }
    }
}

/// An axis-aligned rectangle in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Shrink the rectangle inward by the given insets. Degenerate
    /// (over-inset) rectangles collapse to zero extent rather than
    /// inverting.
    pub fn inset(&self, insets: EdgeInsets) -> Self {
        let width = (self.width - insets.left - insets.right).max(0.0);
        let height = (self.height - insets.top - insets.bottom).max(0.0);
        Self {
            x: self.x + insets.left,
            y: self.y + insets.top,
            width,
            height,
        }
    }

    /// Whether `other` lies entirely inside `self`, allowing each edge to
    /// escape by up to `tolerance`.
    pub fn contains_with_tolerance(&self, other: &Self, tolerance: f64) -> bool {
        other.left() >= self.left() - tolerance
            && other.top() >= self.top() - tolerance
            && other.right() <= self.right() + tolerance
            && other.bottom() <= self.bottom() + tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_clamps_negative_dimensions() {
        let size = Size::new(-3.0, 4.6);
        assert_eq!(size.round(), PixelSize::new(0, 5));
    }

    #[test]
    fn inset_collapses_instead_of_inverting() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let inner = rect.inset(EdgeInsets::uniform(8.0));
        assert_eq!(inner.width, 0.0);
        assert_eq!(inner.height, 0.0);
    }

    #[test]
    fn containment_respects_tolerance() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let nudged = Rect::new(0.0, 0.0, 100.4, 100.0);
        let escaped = Rect::new(0.0, 0.0, 101.0, 100.0);
        assert!(outer.contains_with_tolerance(&nudged, 0.5));
        assert!(!outer.contains_with_tolerance(&escaped, 0.5));
    }

    #[test]
    fn pixel_size_formats_as_dimensions() {
        assert_eq!(PixelSize::new(151, 151).to_string(), "151x151");
    }
}
