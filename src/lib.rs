//! Monte Carlo simulation of a bakery -> hub -> store supply chain.
//!
//! Each run advances the three inventory levels day by day under
//! stochastic demand and lead times, and reports holding cost, fill rate
//! and stockout risk. Runs are independent and own their random source.

pub mod io;
pub mod model;
pub mod simulation;
pub mod strategy;

pub use crate::model::tier::{PerTier, Tier};
pub use crate::simulation::config::SimulationParameters;
pub use crate::simulation::engine::{
    run_simulation, run_simulation_fresh, run_simulation_seeded, ChainSimulation,
};
pub use crate::simulation::error::SimulationError;
pub use crate::simulation::metrics::{DailyRecord, SimulationResult, SimulationWarning};
