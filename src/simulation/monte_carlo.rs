// src/simulation/monte_carlo.rs

//! Monte Carlo replications of one parameter set.
//! Every replication is an independent run on its own random stream.

use crate::simulation::config::SimulationParameters;
use crate::simulation::engine::{run_simulation, stream_rng};
use crate::simulation::error::SimulationError;
use rand::Rng;
use rayon::prelude::*;
use serde::Serialize;

/// Distribution of one metric across replications.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricStats {
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub percentile_10: f64,
    pub percentile_50: f64,
    pub percentile_90: f64,
}

impl MetricStats {
    /// `values` must be non-empty.
    fn from_samples(mut values: Vec<f64>) -> Self {
        values.sort_by(|a, b| a.total_cmp(b));

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

        let percentile = |p: f64| {
            let index = ((p / 100.0) * (n - 1.0)).round() as usize;
            values[index.min(values.len() - 1)]
        };

        Self {
            mean,
            std_dev: variance.sqrt(),
            min: values[0],
            max: values[values.len() - 1],
            percentile_10: percentile(10.0),
            percentile_50: percentile(50.0),
            percentile_90: percentile(90.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplicationSummary {
    pub replications: usize,
    pub total_inventory_value: MetricStats,
    pub fill_rate: MetricStats,
    pub stockout_risk: MetricStats,
    /// Replications that produced at least one degenerate-result warning.
    pub degenerate_runs: usize,
}

/// Runs `replications` independent simulations in parallel.
///
/// With a seed the summary is reproducible regardless of thread count;
/// without one a fresh seed is drawn.
pub fn run_replications(
    params: &SimulationParameters,
    replications: usize,
    seed: Option<u64>,
) -> Result<ReplicationSummary, SimulationError> {
    if replications == 0 {
        return Err(SimulationError::NoReplications);
    }
    params.validate()?;

    let seed = seed.unwrap_or_else(|| rand::thread_rng().gen());
    log::debug!("running {} replications (seed {})", replications, seed);

    let results = (0..replications)
        .into_par_iter()
        .map(|i| run_simulation(params, &mut stream_rng(seed, i as u64)))
        .collect::<Result<Vec<_>, _>>()?;

    let degenerate_runs = results.iter().filter(|r| r.is_degenerate()).count();

    Ok(ReplicationSummary {
        replications,
        total_inventory_value: MetricStats::from_samples(
            results.iter().map(|r| r.total_inventory_value).collect(),
        ),
        fill_rate: MetricStats::from_samples(results.iter().map(|r| r.fill_rate).collect()),
        stockout_risk: MetricStats::from_samples(
            results.iter().map(|r| r.stockout_risk).collect(),
        ),
        degenerate_runs,
    })
}
