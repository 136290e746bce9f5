//! Geometry foundation for the content-fit auto-sizing engine.
//!
//! This crate defines the value types shared across the pipeline (sizes,
//! rectangles, edge insets), the [`RenderTarget`] handle through which the
//! engine reads and writes surface geometry, and the synchronous
//! [`measure`] entry point that decides whether rendered content fits
//! inside its container box.

pub mod geometry;
pub mod measure;
pub mod target;

pub use geometry::{EdgeInsets, PixelSize, Rect, Size};
pub use measure::{measure, FitMeasurement, EDGE_TOLERANCE};
pub use target::RenderTarget;
