// src/model/tier.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three stocking points in the chain.
/// Goods flow Bakery -> Hub -> Store; demand arrives at the Store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Store,
    Hub,
    Bakery,
}

impl Tier {
    /// All tiers in processing order (store first).
    pub const ALL: [Tier; 3] = [Tier::Store, Tier::Hub, Tier::Bakery];

    pub fn label(self) -> &'static str {
        match self {
            Tier::Store => "Store",
            Tier::Hub => "Hub",
            Tier::Bakery => "Bakery",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A value carried once per tier (costs, lead times, traces...).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PerTier<T> {
    pub store: T,
    pub hub: T,
    pub bakery: T,
}

impl<T> PerTier<T> {
    pub const fn new(store: T, hub: T, bakery: T) -> Self {
        Self { store, hub, bakery }
    }

    pub fn get(&self, tier: Tier) -> &T {
        match tier {
            Tier::Store => &self.store,
            Tier::Hub => &self.hub,
            Tier::Bakery => &self.bakery,
        }
    }

    pub fn get_mut(&mut self, tier: Tier) -> &mut T {
        match tier {
            Tier::Store => &mut self.store,
            Tier::Hub => &mut self.hub,
            Tier::Bakery => &mut self.bakery,
        }
    }

    pub fn map<U, F: FnMut(&T) -> U>(&self, mut f: F) -> PerTier<U> {
        PerTier {
            store: f(&self.store),
            hub: f(&self.hub),
            bakery: f(&self.bakery),
        }
    }

    /// Walks the tiers in store -> hub -> bakery order.
    pub fn iter(&self) -> impl Iterator<Item = (Tier, &T)> + '_ {
        Tier::ALL.into_iter().map(move |tier| (tier, self.get(tier)))
    }
}

impl<T: Copy + std::iter::Sum<T>> PerTier<T> {
    pub fn total(&self) -> T {
        [self.store, self.hub, self.bakery].into_iter().sum()
    }
}
