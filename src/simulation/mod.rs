pub mod config;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod monte_carlo;
