//! Production plans.
//!
//! A plan names the target whose stock feeds production, the costing method,
//! and one batch per product. Plans are usually kept as JSON next to the
//! ledger:
//!
//! ```json
//! {
//!   "target": "RYC",
//!   "method": "FIFO",
//!   "unit_count": 8000,
//!   "usage": { "Helium Fuel Block": { "Helium Isotopes": 76149, "Coolant": 1523 } },
//!   "job_costs": { "Helium Fuel Block": 5076420 },
//!   "blueprint_costs": { "Helium Fuel Block": 186361 }
//! }
//! ```

use fuelbook_core::{CostingMethod, LedgerEntry, StockPosition};
use serde::{Deserialize, Serialize};

use crate::rollup::{rollup, BatchCosts, ProductionCostRow, RollupError, UsageMatrix};
use crate::valuate::valuate;

/// One production rollup request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionPlan {
    /// Target whose stock is consumed.
    pub target: String,
    /// Costing method for the stock valuation.
    #[serde(default)]
    pub method: CostingMethod,
    /// Units one batch yields.
    pub unit_count: u64,
    /// Product → material → quantity per batch.
    pub usage: UsageMatrix,
    /// Product → job cost per batch.
    #[serde(default)]
    pub job_costs: BatchCosts,
    /// Product → blueprint cost per batch.
    #[serde(default)]
    pub blueprint_costs: BatchCosts,
}

impl ProductionPlan {
    /// Value the plan's target in `entries`.
    #[must_use]
    pub fn positions(&self, entries: &[LedgerEntry]) -> Vec<StockPosition> {
        valuate(entries, &self.target, self.method)
    }

    /// Price every product of the plan against the stock in `entries`.
    pub fn run(&self, entries: &[LedgerEntry]) -> Result<Vec<ProductionCostRow>, RollupError> {
        rollup(
            &self.usage,
            &self.positions(entries),
            self.unit_count,
            &self.job_costs,
            &self.blueprint_costs,
        )
    }
}
