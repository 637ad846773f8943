// src/simulation/engine.rs

use crate::io::demand::DemandModel;
use crate::model::inventory::InventoryState;
use crate::model::lead_time::LeadTimeModel;
use crate::model::tier::PerTier;
use crate::simulation::config::SimulationParameters;
use crate::simulation::error::SimulationError;
use crate::simulation::metrics::{DailyMetricsAccumulator, DailyRecord, SimulationResult};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// How often (in days) a progress snapshot is emitted at trace level.
const SNAPSHOT_EVERY_DAYS: u32 = 30;

/// A single bakery -> hub -> store run.
///
/// Owns all per-run state and borrows the random source, so independent
/// runs never share a stream.
pub struct ChainSimulation<'a, R: Rng + ?Sized> {
    params: &'a SimulationParameters,
    rng: &'a mut R,

    demand: DemandModel,
    lead_times: PerTier<LeadTimeModel>,

    state: InventoryState,
    metrics: DailyMetricsAccumulator,
    current_day: u32,
}

impl<'a, R: Rng + ?Sized> ChainSimulation<'a, R> {
    pub fn new(params: &'a SimulationParameters, rng: &'a mut R) -> Result<Self, SimulationError> {
        params.validate()?;

        let variability = params.lead_time_variability;
        let lead_times = PerTier::new(
            LeadTimeModel::new(params.lead_time_base_days.store, variability)?,
            LeadTimeModel::new(params.lead_time_base_days.hub, variability)?,
            LeadTimeModel::new(params.lead_time_base_days.bakery, variability)?,
        );

        Ok(Self {
            params,
            rng,
            demand: DemandModel::new(&params.demand)?,
            lead_times,
            state: InventoryState::new(&params.initial_inventory),
            metrics: DailyMetricsAccumulator::with_horizon(params.horizon_days),
            current_day: 0,
        })
    }

    pub fn run(mut self) -> SimulationResult {
        while self.current_day < self.params.horizon_days {
            self.step();
        }

        let result = self.metrics.finish(self.params);
        log::debug!(
            "run finished: store every {}d, hub every {}d -> fill rate {:.4}, stockout risk {:.4}, total value {:.2}",
            self.params.store_interval_days,
            self.params.hub_interval_days,
            result.fill_rate,
            result.stockout_risk,
            result.total_inventory_value
        );
        for warning in &result.warnings {
            log::warn!("degenerate result: {:?}", warning);
        }
        result
    }

    fn step(&mut self) {
        let day = self.current_day;
        let params = self.params;
        let mean_daily_demand = params.demand.mean;

        // =================================================================
        // PHASE 1: CUSTOMER DEMAND
        // Checked against the shelf before it is drawn down.
        // =================================================================
        let demand = self.demand.sample(&mut *self.rng);
        let (fulfilled, stockout) = self.state.fulfil(demand);

        // =================================================================
        // PHASE 2: STORE REPLENISHMENT (hub -> store)
        // Order covers the sampled lead time at mean demand. If the hub
        // cannot cover all of it the order is dropped.
        // =================================================================
        let mut store_order_qty = 0.0;
        let mut store_order_dropped = false;
        if day % params.store_interval_days == 0 {
            let lead = self.lead_times.store.sample(&mut *self.rng);
            store_order_qty = mean_daily_demand * f64::from(lead);
            store_order_dropped = !self.state.transfer_hub_to_store(store_order_qty);
        }

        // =================================================================
        // PHASE 3: HUB REPLENISHMENT (bakery -> hub) AND BAKERY PRODUCTION
        // Both run on the hub cadence with independent lead-time draws.
        // Neither is capped.
        // =================================================================
        let mut hub_order_qty = 0.0;
        let mut bakery_production_qty = 0.0;
        if day % params.hub_interval_days == 0 {
            let hub_lead = self.lead_times.hub.sample(&mut *self.rng);
            hub_order_qty = mean_daily_demand * f64::from(hub_lead);
            self.state.transfer_bakery_to_hub(hub_order_qty);

            let bakery_lead = self.lead_times.bakery.sample(&mut *self.rng);
            bakery_production_qty = mean_daily_demand * f64::from(bakery_lead);
            self.state.produce_at_bakery(bakery_production_qty);
        }

        // =================================================================
        // PHASE 4: RECORD & ADVANCE
        // Only the recorded levels are floored unless the run clamps state.
        // =================================================================
        let recorded = self.state.recorded();
        if params.clamp_state_each_day {
            self.state.clamp_negative();
        }

        if day % SNAPSHOT_EVERY_DAYS == 0 {
            log::trace!(
                "day {}: store {:.1}, hub {:.1}, bakery {:.1} (raw bakery {:.1})",
                day,
                recorded.store,
                recorded.hub,
                recorded.bakery,
                self.state.bakery
            );
        }

        self.metrics.record(DailyRecord {
            day,
            demand,
            fulfilled,
            stockout,
            store_order_qty,
            store_order_dropped,
            hub_order_qty,
            bakery_production_qty,
            store_inventory: recorded.store,
            hub_inventory: recorded.hub,
            bakery_inventory: recorded.bakery,
        });
        self.current_day += 1;
    }
}

/// Runs one full horizon drawing from `rng`.
pub fn run_simulation<R: Rng + ?Sized>(
    params: &SimulationParameters,
    rng: &mut R,
) -> Result<SimulationResult, SimulationError> {
    Ok(ChainSimulation::new(params, rng)?.run())
}

/// Reproducible run: the same seed and parameters give the same result.
pub fn run_simulation_seeded(
    params: &SimulationParameters,
    seed: u64,
) -> Result<SimulationResult, SimulationError> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    run_simulation(params, &mut rng)
}

/// Run with fresh randomness; every call differs.
pub fn run_simulation_fresh(
    params: &SimulationParameters,
) -> Result<SimulationResult, SimulationError> {
    run_simulation(params, &mut rand::thread_rng())
}

/// Generator for one member of a family of parallel runs.
/// Every index gets its own ChaCha stream under the shared seed.
pub(crate) fn stream_rng(seed: u64, index: u64) -> ChaCha20Rng {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    rng.set_stream(index);
    rng
}
