//! Runtime configuration for the auto-sizing engine.
//!
//! Gathers the search bounds, stability thresholds, and frame period in
//! one place. Configuration can be loaded from environment variables or
//! constructed programmatically; all values fall back to the documented
//! defaults on absent or unparseable input.

use crate::search::SearchConfig;
use crate::stability::StabilityOptions;
use std::env;

/// Engine-wide configuration.
#[derive(Debug, Clone, Copy)]
pub struct FitConfig {
    pub search: SearchConfig,
    pub stability: StabilityOptions,
    /// Frame period in milliseconds for interval-backed clocks.
    pub frame_ms: u64,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            stability: StabilityOptions::default(),
            frame_ms: 16,
        }
    }
}

impl FitConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads the following, each optional:
    /// - `FITCHECK_MIN_SIZE`: smallest searched width (default: 40)
    /// - `FITCHECK_MAX_SIZE`: probed-width cap (default: 4096)
    /// - `FITCHECK_SAFETY_MARGIN`: padding on fit results (default: 1)
    /// - `FITCHECK_MAX_ATTEMPTS`: stability cycle budget (default: 120)
    /// - `FITCHECK_FRAME_MS`: frame period in ms (default: 16, min 1)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let (min_size, max_size) = sanitize_bounds(
            env_u32("FITCHECK_MIN_SIZE", defaults.search.min_size),
            env_u32("FITCHECK_MAX_SIZE", defaults.search.max_size),
        );
        Self {
            search: SearchConfig {
                min_size,
                max_size,
                safety_margin: env_u32("FITCHECK_SAFETY_MARGIN", defaults.search.safety_margin),
            },
            stability: StabilityOptions {
                max_attempts: env_u32("FITCHECK_MAX_ATTEMPTS", defaults.stability.max_attempts)
                    .max(1),
                ..defaults.stability
            },
            frame_ms: env::var("FITCHECK_FRAME_MS")
                .ok()
                .and_then(|val| val.parse::<u64>().ok())
                .unwrap_or(defaults.frame_ms)
                .max(1),
        }
    }
}

/// Clamp raw search bounds so the floor is at least one pixel and the
/// cap stays above the floor, saturating at the integer ceiling.
fn sanitize_bounds(min_size: u32, max_size: u32) -> (u32, u32) {
    let min_size = min_size.max(1);
    (min_size, max_size.max(min_size.saturating_add(1)))
}

fn env_u32(name: &str, default: u32) -> u32 {
    env::var(name)
        .ok()
        .and_then(|val| val.parse::<u32>().ok())
        .unwrap_or(default)
}
