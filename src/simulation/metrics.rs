// src/simulation/metrics.rs

use crate::model::tier::{PerTier, Tier};
use crate::simulation::config::SimulationParameters;
use serde::Serialize;

/// One simulated day, as written to the trace CSV.
/// Inventory columns hold the floored (recorded) levels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRecord {
    pub day: u32,
    pub demand: f64,
    pub fulfilled: f64,
    pub stockout: bool,
    pub store_order_qty: f64,
    pub store_order_dropped: bool,
    pub hub_order_qty: f64,
    pub bakery_production_qty: f64,
    pub store_inventory: f64,
    pub hub_inventory: f64,
    pub bakery_inventory: f64,
}

impl DailyRecord {
    pub fn inventory(&self) -> PerTier<f64> {
        PerTier::new(
            self.store_inventory,
            self.hub_inventory,
            self.bakery_inventory,
        )
    }
}

/// Non-fatal conditions worth flagging on an otherwise valid run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SimulationWarning {
    /// No demand over the whole horizon; fill rate is reported as 1.0.
    ZeroDemand,
    /// The tier never held stock on any recorded day.
    AllZeroTrace { tier: Tier },
}

/// Running totals for a single run.
#[derive(Debug, Clone, Default)]
pub struct DailyMetricsAccumulator {
    pub total_demand: f64,
    pub fulfilled_demand: f64,
    pub stockout_days: u32,
    pub traces: PerTier<Vec<f64>>,
    pub history: Vec<DailyRecord>,
}

impl DailyMetricsAccumulator {
    pub fn with_horizon(days: u32) -> Self {
        let days = days as usize;
        Self {
            traces: PerTier::new(
                Vec::with_capacity(days),
                Vec::with_capacity(days),
                Vec::with_capacity(days),
            ),
            history: Vec::with_capacity(days),
            ..Default::default()
        }
    }

    pub fn record(&mut self, record: DailyRecord) {
        self.total_demand += record.demand;
        self.fulfilled_demand += record.fulfilled;
        if record.stockout {
            self.stockout_days += 1;
        }
        for (tier, level) in record.inventory().iter() {
            self.traces.get_mut(tier).push(*level);
        }
        self.history.push(record);
    }

    /// Collapses the run into its headline numbers.
    pub fn finish(self, params: &SimulationParameters) -> SimulationResult {
        let mut warnings = Vec::new();

        let average_inventory_value = PerTier::new(
            mean(&self.traces.store) * params.holding_cost.store,
            mean(&self.traces.hub) * params.holding_cost.hub,
            mean(&self.traces.bakery) * params.holding_cost.bakery,
        );

        let fill_rate = if self.total_demand > 0.0 {
            self.fulfilled_demand / self.total_demand
        } else {
            warnings.push(SimulationWarning::ZeroDemand);
            1.0
        };

        for (tier, trace) in self.traces.iter() {
            if trace.iter().all(|level| *level == 0.0) {
                warnings.push(SimulationWarning::AllZeroTrace { tier });
            }
        }

        let horizon = self.history.len().max(1) as f64;

        SimulationResult {
            total_inventory_value: average_inventory_value.total(),
            average_inventory_value,
            fill_rate,
            stockout_risk: f64::from(self.stockout_days) / horizon,
            total_demand: self.total_demand,
            fulfilled_demand: self.fulfilled_demand,
            stockout_days: self.stockout_days,
            traces: self.traces,
            history: self.history,
            warnings,
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Outcome of one run over the full horizon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    /// Mean recorded stock times the tier's holding cost.
    pub average_inventory_value: PerTier<f64>,
    pub total_inventory_value: f64,
    pub fill_rate: f64,
    pub stockout_risk: f64,
    pub total_demand: f64,
    pub fulfilled_demand: f64,
    pub stockout_days: u32,
    #[serde(skip)]
    pub traces: PerTier<Vec<f64>>,
    #[serde(skip)]
    pub history: Vec<DailyRecord>,
    pub warnings: Vec<SimulationWarning>,
}

impl SimulationResult {
    pub fn trace(&self, tier: Tier) -> &[f64] {
        self.traces.get(tier)
    }

    pub fn is_degenerate(&self) -> bool {
        !self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(day: u32, demand: f64, fulfilled: f64, levels: (f64, f64, f64)) -> DailyRecord {
        DailyRecord {
            day,
            demand,
            fulfilled,
            stockout: fulfilled < demand,
            store_order_qty: 0.0,
            store_order_dropped: false,
            hub_order_qty: 0.0,
            bakery_production_qty: 0.0,
            store_inventory: levels.0,
            hub_inventory: levels.1,
            bakery_inventory: levels.2,
        }
    }

    #[test]
    fn finish_computes_values_and_rates() {
        let params = SimulationParameters::default();
        let mut acc = DailyMetricsAccumulator::with_horizon(4);
        acc.record(day(0, 100.0, 0.0, (0.0, 100.0, 50.0)));
        acc.record(day(1, 100.0, 100.0, (100.0, 100.0, 50.0)));
        acc.record(day(2, 100.0, 100.0, (100.0, 0.0, 50.0)));
        acc.record(day(3, 100.0, 50.0, (0.0, 0.0, 50.0)));

        let result = acc.finish(&params);

        assert_eq!(result.total_demand, 400.0);
        assert_eq!(result.fulfilled_demand, 250.0);
        assert_eq!(result.fill_rate, 250.0 / 400.0);
        assert_eq!(result.stockout_days, 2);
        assert_eq!(result.stockout_risk, 0.5);
        assert_eq!(result.average_inventory_value, PerTier::new(1000.0, 900.0, 750.0));
        assert_eq!(result.total_inventory_value, 2650.0);
        assert_eq!(result.trace(Tier::Hub), &[100.0, 100.0, 0.0, 0.0]);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn zero_demand_reports_full_fill_and_warns() {
        let params = SimulationParameters::default();
        let mut acc = DailyMetricsAccumulator::with_horizon(2);
        acc.record(day(0, 0.0, 0.0, (0.0, 0.0, 0.0)));
        acc.record(day(1, 0.0, 0.0, (0.0, 0.0, 0.0)));

        let result = acc.finish(&params);

        assert_eq!(result.fill_rate, 1.0);
        assert_eq!(result.stockout_risk, 0.0);
        assert!(result.warnings.contains(&SimulationWarning::ZeroDemand));
        for tier in Tier::ALL {
            assert!(result
                .warnings
                .contains(&SimulationWarning::AllZeroTrace { tier }));
        }
        assert!(result.is_degenerate());
    }
}
