//! Content-fit auto-sizing engine.
//!
//! This crate orchestrates the auto-sizing pipeline for a rendered
//! widget surface: wait for a freshly mounted or resized surface to
//! reach a stable layout, measure whether its content overflows, and
//! run a bounded search for the minimal box size at a fixed aspect
//! ratio that exactly contains the content.
//!
//! Entry points, leaf-first:
//! - [`fit_core::measure`] — synchronous overflow check (re-exported).
//! - [`stability::StabilityProbe`] — settle detection across paint
//!   cycles.
//! - [`search::SizeSearchSession`] — expansion + bisection minimal-size
//!   search.
//! - [`resize::ResizeController`] — thin interactive consumer of search
//!   results.
//!
//! Every suspension point yields on a paint-cycle boundary through a
//! [`frame::FrameClock`], never on wall-clock time, so behavior is
//! deterministic relative to frame cadence.

pub mod config;
pub mod frame;
pub mod resize;
pub mod search;
pub mod stability;

pub use config::FitConfig;
pub use fit_core::{measure, FitMeasurement, PixelSize, RenderTarget, Size};
pub use frame::{FrameClock, ImmediateFrameClock, IntervalFrameClock};
pub use resize::ResizeController;
pub use search::{SearchConfig, SizeSearchResult, SizeSearchSession};
pub use stability::{StabilityOptions, StabilityPhase, StabilityProbe};
