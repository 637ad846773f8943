// src/strategy/optimization.rs

//! Picking a replenishment cadence for a target service level.
//!
//! This is a brute-force scan over a handful of candidates, not a solver.

use crate::simulation::config::SimulationParameters;
use crate::simulation::error::SimulationError;
use crate::strategy::sweep::{sweep_store_intervals, SweepPoint};

/// Fill rate the dashboard aims for.
pub const TARGET_FILL_RATE: f64 = 0.95;

/// Returns the point whose fill rate is closest to `target`.
///
/// The gap comparison is strict, so on a tie the earliest point wins.
/// Returns `None` for an empty slice.
pub fn closest_to_target(points: &[SweepPoint], target: f64) -> Option<&SweepPoint> {
    let mut best: Option<&SweepPoint> = None;
    let mut min_gap = f64::INFINITY;

    for point in points {
        let gap = (point.fill_rate - target).abs();
        if gap < min_gap {
            min_gap = gap;
            best = Some(point);
        }
    }

    best
}

/// Runs a fresh sweep over `candidates` and returns the store cadence whose
/// fill rate lands closest to `target`.
pub fn find_setting_for_fill_rate(
    params: &SimulationParameters,
    candidates: &[u32],
    target: f64,
    seed: Option<u64>,
) -> Result<Option<SweepPoint>, SimulationError> {
    let points = sweep_store_intervals(params, candidates, seed)?;
    let best = closest_to_target(&points, target).cloned();
    if let Some(point) = &best {
        log::debug!(
            "closest to {:.1}% fill: store every {}d ({:.2}%)",
            target * 100.0,
            point.store_interval_days,
            point.fill_rate * 100.0
        );
    }
    Ok(best)
}
