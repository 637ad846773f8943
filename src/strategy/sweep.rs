// src/strategy/sweep.rs

use crate::simulation::config::{SimulationParameters, STORE_INTERVAL_RANGE};
use crate::simulation::engine::{run_simulation, stream_rng};
use crate::simulation::error::SimulationError;
use rand::Rng;
use rayon::prelude::*;
use serde::Serialize;

/// Service level and cost for one store replenishment cadence.
/// One row of the service-level vs total-cost curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepPoint {
    pub store_interval_days: u32,
    pub fill_rate: f64,
    pub stockout_risk: f64,
    pub total_inventory_value: f64,
}

/// Store cadences offered by the dashboard (1 through 7 days).
pub fn default_candidates() -> Vec<u32> {
    STORE_INTERVAL_RANGE.collect()
}

/// Runs one fresh simulation per candidate store interval, holding every
/// other parameter fixed.
///
/// Points come back in candidate order. Each candidate draws from its own
/// random stream, so a seeded sweep is reproducible no matter how rayon
/// schedules the runs.
pub fn sweep_store_intervals(
    params: &SimulationParameters,
    candidates: &[u32],
    seed: Option<u64>,
) -> Result<Vec<SweepPoint>, SimulationError> {
    let seed = seed.unwrap_or_else(|| rand::thread_rng().gen());
    log::debug!(
        "sweeping store intervals {:?} at hub interval {} (seed {})",
        candidates,
        params.hub_interval_days,
        seed
    );

    candidates
        .par_iter()
        .enumerate()
        .map(|(i, &days)| -> Result<SweepPoint, SimulationError> {
            let swept = params.with_store_interval(days);
            let result = run_simulation(&swept, &mut stream_rng(seed, i as u64))?;
            Ok(SweepPoint {
                store_interval_days: days,
                fill_rate: result.fill_rate,
                stockout_risk: result.stockout_risk,
                total_inventory_value: result.total_inventory_value,
            })
        })
        .collect()
}
