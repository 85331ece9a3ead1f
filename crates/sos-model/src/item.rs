use std::fmt;

use serde::{Deserialize, Serialize};

use crate::money::round2;

/// Opaque identifier for a line item, unique and stable for the row's
/// lifetime. Allocated monotonically by the ledger and never reused within a
/// form session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ItemId(u64);

impl ItemId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One part or service row of a service order.
///
/// `total` is derived state: it always equals
/// `round2(quantity * unit_price)` and is recomputed by the ledger whenever
/// either factor changes. It is never editable on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ItemId,
    pub quantity: f64,
    pub code: String,
    pub description: String,
    pub unit_price: f64,
    pub total: f64,
    pub confirmed: bool,
}

impl LineItem {
    /// A freshly added row: one unit, no price, unconfirmed.
    pub fn with_defaults(id: ItemId) -> Self {
        Self {
            id,
            quantity: 1.0,
            code: String::new(),
            description: String::new(),
            unit_price: 0.0,
            total: 0.0,
            confirmed: false,
        }
    }

    /// Recompute the derived total from the current factors.
    pub fn recompute_total(&mut self) {
        self.total = round2(self.quantity * self.unit_price);
    }
}
