// src/simulation/error.rs

use crate::model::tier::Tier;
use rand_distr::NormalError;
use thiserror::Error;

/// Errors raised before a run starts. A run that passes validation always
/// completes its horizon.
#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    #[error("{field} must be at least {min} (got {value})")]
    BelowMinimum {
        field: &'static str,
        min: u32,
        value: u32,
    },
    #[error("{tier} holding cost must be a non-negative number (got {value})")]
    NegativeHoldingCost { tier: Tier, value: f64 },
    #[error("{tier} initial inventory must be a non-negative number (got {value})")]
    NegativeInitialInventory { tier: Tier, value: f64 },
    #[error("lead time variability must be a non-negative number (got {0})")]
    InvalidVariability(f64),
    #[error("demand {field} must be a non-negative number (got {value})")]
    InvalidDemand { field: &'static str, value: f64 },
    #[error("at least one replication is required")]
    NoReplications,
    #[error("invalid distribution parameters: {0}")]
    Distribution(#[from] NormalError),
}
