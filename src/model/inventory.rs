// src/model/inventory.rs

use crate::model::tier::PerTier;

/// Stock on hand at each tier for a single run.
///
/// Levels are real-valued. The bakery can go negative because the hub pulls
/// from it without a capacity check; that debt is carried into the next day
/// unless the run clamps state. Store and hub never drop below zero on
/// their own: the store only loses what it fulfils, and the hub only ships
/// when it can cover the whole order.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryState {
    pub store: f64,
    pub hub: f64,
    pub bakery: f64,
}

impl InventoryState {
    pub fn new(initial: &PerTier<f64>) -> Self {
        Self {
            store: initial.store,
            hub: initial.hub,
            bakery: initial.bakery,
        }
    }

    /// Serves customer demand from the store shelf.
    ///
    /// Returns `(fulfilled, stockout)`. The stockout test happens before the
    /// shelf is drawn down, so a partially served day still counts.
    pub fn fulfil(&mut self, demand: f64) -> (f64, bool) {
        let fulfilled = self.store.min(demand);
        let stockout = self.store < demand;
        self.store -= fulfilled;
        (fulfilled, stockout)
    }

    /// Moves `qty` from hub to store if the hub can cover all of it.
    ///
    /// Returns `false` when the order is dropped. Nothing is partially
    /// shipped or backordered.
    pub fn transfer_hub_to_store(&mut self, qty: f64) -> bool {
        if self.hub >= qty {
            self.store += qty;
            self.hub -= qty;
            true
        } else {
            false
        }
    }

    /// Hub restock. The bakery is debited regardless of what it holds.
    pub fn transfer_bakery_to_hub(&mut self, qty: f64) {
        self.bakery -= qty;
        self.hub += qty;
    }

    /// Uncapped bakery production.
    pub fn produce_at_bakery(&mut self, qty: f64) {
        self.bakery += qty;
    }

    pub fn clamp_negative(&mut self) {
        self.store = self.store.max(0.0);
        self.hub = self.hub.max(0.0);
        self.bakery = self.bakery.max(0.0);
    }

    /// Levels as they are written to the trace (floored at zero).
    /// The state itself keeps any negative balance.
    pub fn recorded(&self) -> PerTier<f64> {
        PerTier::new(self.store.max(0.0), self.hub.max(0.0), self.bakery.max(0.0))
    }
}
