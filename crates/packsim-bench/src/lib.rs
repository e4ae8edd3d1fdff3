//! Benchmark profiles for the packsim placement engine.
//!
//! - [`reference_config`]: the standard four-bin layout.
//! - [`valid_plan`]: a plan that places every record.
//! - [`scattered_plan`]: deterministic pseudo-random placements, most of
//!   which collide, to exercise the rejection paths.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use packsim_core::{PlacementRecord, Rect, ShapeKind};
use packsim_engine::EngineConfig;
use packsim_test_utils::{grid_plan, shaped_record, standard_bins};

/// The standard four-bin layout.
pub fn reference_config() -> EngineConfig {
    EngineConfig::with_bins(standard_bins())
}

/// Up to `limit` non-overlapping placements across the standard bins.
pub fn valid_plan(limit: usize) -> Vec<PlacementRecord> {
    grid_plan(&standard_bins(), 0, limit)
}

/// `count` placements at deterministic pseudo-random positions.
///
/// Bin ids range over 0..=4, so roughly a fifth target a missing bin.
pub fn scattered_plan(count: u32, seed: u64) -> Vec<PlacementRecord> {
    (0..count)
        .map(|i| {
            let k = seed.wrapping_add(u64::from(i));
            let bin = (k.wrapping_mul(6364136223846793007) % 5) as u32;
            let x = (k.wrapping_mul(1442695040888963407) % 200) as f64;
            let y = (k.wrapping_mul(2862933555777941757) % 200) as f64;
            let side = 10.0 + (k % 40) as f64;
            shaped_record(i, bin, Rect::new(x, y, side, side), ShapeKind::Rectangle, "bench")
        })
        .collect()
}
