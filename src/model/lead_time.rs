// src/model/lead_time.rs

use rand::Rng;
use rand_distr::{Distribution, Normal, NormalError};

/// Stochastic lead time for one tier.
///
/// Draws `Normal(base, base * variability)`, rounds half-to-even and floors
/// the result at one day. With zero variability every draw equals `base`.
#[derive(Debug, Clone, Copy)]
pub struct LeadTimeModel {
    distribution: Normal<f64>,
}

impl LeadTimeModel {
    pub fn new(base_days: u32, variability: f64) -> Result<Self, NormalError> {
        let mean = f64::from(base_days);
        let distribution = Normal::new(mean, mean * variability)?;
        Ok(Self { distribution })
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        let draw = self.distribution.sample(rng).round_ties_even();
        // Negative or zero draws collapse to the one-day minimum
        if draw < 1.0 {
            1
        } else {
            draw as u32
        }
    }
}
