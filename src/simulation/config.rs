// src/simulation/config.rs

use crate::io::demand::DemandProfile;
use crate::model::tier::{PerTier, Tier};
use crate::simulation::error::SimulationError;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Bounds offered to users of the dashboard. The CLI enforces them; the
/// engine itself only rejects values that make the model meaningless.
pub const STORE_INTERVAL_RANGE: RangeInclusive<u32> = 1..=7;
pub const HUB_INTERVAL_RANGE: RangeInclusive<u32> = 3..=14;
pub const STORE_LEAD_TIME_RANGE: RangeInclusive<u32> = 1..=5;
pub const HUB_LEAD_TIME_RANGE: RangeInclusive<u32> = 1..=7;
pub const BAKERY_LEAD_TIME_RANGE: RangeInclusive<u32> = 1..=10;
pub const HOLDING_COST_RANGE: RangeInclusive<u32> = 1..=100;

pub const DEFAULT_HORIZON_DAYS: u32 = 365;

/// Inputs for one simulation run.
///
/// Missing fields in a parameter file fall back to the dashboard defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParameters {
    /// The store pulls from the hub every N days.
    pub store_interval_days: u32,
    /// The hub pulls from the bakery, and the bakery produces, every N days.
    pub hub_interval_days: u32,
    pub lead_time_base_days: PerTier<u32>,
    /// Relative standard deviation of every lead-time draw.
    pub lead_time_variability: f64,
    /// Cost per unit of average stock held over the horizon.
    pub holding_cost: PerTier<f64>,
    pub demand: DemandProfile,
    pub horizon_days: u32,
    pub initial_inventory: PerTier<f64>,
    /// Clamp negative stock to zero at the end of every day.
    /// Off by default: negative bakery stock is carried forward and only
    /// the recorded trace is floored.
    pub clamp_state_each_day: bool,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            store_interval_days: 1,
            hub_interval_days: 7,
            lead_time_base_days: PerTier::new(1, 2, 3),
            lead_time_variability: 0.2,
            holding_cost: PerTier::new(20.0, 18.0, 15.0),
            demand: DemandProfile::default(),
            horizon_days: DEFAULT_HORIZON_DAYS,
            initial_inventory: PerTier::new(0.0, 0.0, 0.0),
            clamp_state_each_day: false,
        }
    }
}

fn at_least_one(field: &'static str, value: u32) -> Result<(), SimulationError> {
    if value < 1 {
        return Err(SimulationError::BelowMinimum {
            field,
            min: 1,
            value,
        });
    }
    Ok(())
}

fn non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

impl SimulationParameters {
    /// Copy of these parameters with a different store cadence.
    pub fn with_store_interval(&self, days: u32) -> Self {
        Self {
            store_interval_days: days,
            ..self.clone()
        }
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        at_least_one("store replenishment interval", self.store_interval_days)?;
        at_least_one("hub replenishment interval", self.hub_interval_days)?;
        at_least_one("store lead time", self.lead_time_base_days.store)?;
        at_least_one("hub lead time", self.lead_time_base_days.hub)?;
        at_least_one("bakery lead time", self.lead_time_base_days.bakery)?;
        at_least_one("horizon", self.horizon_days)?;

        for tier in Tier::ALL {
            let cost = *self.holding_cost.get(tier);
            if !non_negative(cost) {
                return Err(SimulationError::NegativeHoldingCost { tier, value: cost });
            }
            let start = *self.initial_inventory.get(tier);
            if !non_negative(start) {
                return Err(SimulationError::NegativeInitialInventory { tier, value: start });
            }
        }

        if !non_negative(self.lead_time_variability) {
            return Err(SimulationError::InvalidVariability(
                self.lead_time_variability,
            ));
        }
        if !non_negative(self.demand.mean) {
            return Err(SimulationError::InvalidDemand {
                field: "mean",
                value: self.demand.mean,
            });
        }
        if !non_negative(self.demand.std_dev) {
            return Err(SimulationError::InvalidDemand {
                field: "standard deviation",
                value: self.demand.std_dev,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_dashboard() {
        let params = SimulationParameters::default();
        assert_eq!(params.horizon_days, 365);
        assert_eq!(params.lead_time_base_days, PerTier::new(1, 2, 3));
        assert_eq!(params.holding_cost, PerTier::new(20.0, 18.0, 15.0));
        assert_eq!(params.demand.mean, 100.0);
        assert_eq!(params.demand.std_dev, 20.0);
        assert!(!params.clamp_state_each_day);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn zero_interval_is_rejected() {
        let params = SimulationParameters {
            hub_interval_days: 0,
            ..Default::default()
        };
        assert_eq!(
            params.validate(),
            Err(SimulationError::BelowMinimum {
                field: "hub replenishment interval",
                min: 1,
                value: 0,
            })
        );
    }

    #[test]
    fn zero_lead_time_is_rejected() {
        let mut params = SimulationParameters::default();
        params.lead_time_base_days.bakery = 0;
        assert!(matches!(
            params.validate(),
            Err(SimulationError::BelowMinimum {
                field: "bakery lead time",
                ..
            })
        ));
    }

    #[test]
    fn negative_cost_is_rejected() {
        let mut params = SimulationParameters::default();
        params.holding_cost.hub = -1.0;
        assert_eq!(
            params.validate(),
            Err(SimulationError::NegativeHoldingCost {
                tier: Tier::Hub,
                value: -1.0,
            })
        );
    }

    #[test]
    fn zero_cost_is_allowed() {
        let mut params = SimulationParameters::default();
        params.holding_cost = PerTier::new(0.0, 0.0, 0.0);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn bad_variability_and_demand_are_rejected() {
        let params = SimulationParameters {
            lead_time_variability: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(SimulationError::InvalidVariability(_))
        ));

        let mut params = SimulationParameters::default();
        params.demand.std_dev = -5.0;
        assert!(matches!(
            params.validate(),
            Err(SimulationError::InvalidDemand { .. })
        ));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let json = r#"{ "store_interval_days": 3, "holding_cost": { "store": 5, "hub": 4, "bakery": 3 } }"#;
        let params: SimulationParameters = serde_json::from_str(json).unwrap();
        assert_eq!(params.store_interval_days, 3);
        assert_eq!(params.hub_interval_days, 7);
        assert_eq!(params.holding_cost, PerTier::new(5.0, 4.0, 3.0));
        assert_eq!(params.demand, DemandProfile::default());
    }

    #[test]
    fn with_store_interval_keeps_everything_else() {
        let base = SimulationParameters::default();
        let swept = base.with_store_interval(4);
        assert_eq!(swept.store_interval_days, 4);
        assert_eq!(swept.hub_interval_days, base.hub_interval_days);
        assert_eq!(swept.holding_cost, base.holding_cost);
    }
}
