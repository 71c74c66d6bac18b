//! Production cost rollup.
//!
//! Prices one production batch per product from the current stock
//! valuation: materials at their valued unit cost, plus job and blueprint
//! costs for the batch, spread over the units the batch yields.

use fuelbook_core::StockPosition;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

/// Product → material → quantity used for one batch.
pub type UsageMatrix = BTreeMap<String, BTreeMap<String, Decimal>>;

/// Product → cost for one batch.
pub type BatchCosts = BTreeMap<String, Decimal>;

/// Errors from the production rollup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RollupError {
    /// A product uses a material that has no stock position.
    #[error("material '{material}' used by '{product}' is not in stock")]
    MissingMaterial {
        /// The product being priced.
        product: String,
        /// The material with no position.
        material: String,
    },

    /// The batch yields no units.
    #[error("batch size must be at least one unit")]
    InvalidBatchSize,
}

/// Cost breakdown of one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionCostRow {
    /// Product name.
    pub product: String,
    /// Full cost of one unit.
    pub unit_cost: Decimal,
    /// Material cost of one unit.
    pub materials_cost_per_unit: Decimal,
    /// Job cost of one unit.
    pub job_cost_per_unit: Decimal,
    /// Blueprint cost of one unit.
    pub blueprint_cost_per_unit: Decimal,
    /// Material cost of the batch.
    pub total_materials_cost: Decimal,
    /// Job cost of the batch.
    pub total_job_cost: Decimal,
    /// Blueprint cost of the batch.
    pub total_blueprint_cost: Decimal,
    /// Full cost of the batch.
    pub total_cost: Decimal,
    /// Contribution of each material to one unit.
    pub material_costs_per_unit: BTreeMap<String, Decimal>,
}

/// Price every product in `usage` against `positions`.
///
/// `unit_count` is how many units one batch of `usage` yields. Materials
/// with zero usage are skipped; any other material must have a position.
/// Missing job or blueprint costs count as zero. Rows come back in product
/// name order.
///
/// # Example
///
/// ```
/// use fuelbook_booking::{rollup, BatchCosts, UsageMatrix};
/// use fuelbook_core::StockPosition;
/// use rust_decimal_macros::dec;
///
/// let mut usage = UsageMatrix::new();
/// usage
///     .entry("Helium Fuel Block".to_string())
///     .or_default()
///     .insert("Helium Isotopes".to_string(), dec!(400));
///
/// let positions = vec![StockPosition::new("Helium Isotopes", dec!(1000), dec!(500))];
/// let jobs: BatchCosts = [("Helium Fuel Block".to_string(), dec!(10000))].into();
///
/// let rows = rollup(&usage, &positions, 40, &jobs, &BatchCosts::new()).unwrap();
/// assert_eq!(rows[0].total_cost, dec!(210000));
/// assert_eq!(rows[0].unit_cost, dec!(5250));
/// ```
pub fn rollup(
    usage: &UsageMatrix,
    positions: &[StockPosition],
    unit_count: u64,
    job_costs: &BatchCosts,
    blueprint_costs: &BatchCosts,
) -> Result<Vec<ProductionCostRow>, RollupError> {
    if unit_count == 0 {
        return Err(RollupError::InvalidBatchSize);
    }
    let units = Decimal::from(unit_count);

    let unit_costs: HashMap<&str, Decimal> = positions
        .iter()
        .map(|p| (p.material.as_str(), p.unit_cost))
        .collect();

    let mut rows = Vec::with_capacity(usage.len());
    for (product, materials) in usage {
        let mut total_materials_cost = Decimal::ZERO;
        let mut material_costs_per_unit = BTreeMap::new();

        for (material, qty) in materials {
            if qty.is_zero() {
                continue;
            }
            let unit_cost =
                unit_costs
                    .get(material.as_str())
                    .ok_or_else(|| RollupError::MissingMaterial {
                        product: product.clone(),
                        material: material.clone(),
                    })?;

            let cost = *qty * *unit_cost;
            total_materials_cost += cost;
            material_costs_per_unit.insert(material.clone(), cost / units);
        }

        let total_job_cost = job_costs.get(product).copied().unwrap_or_default();
        let total_blueprint_cost = blueprint_costs.get(product).copied().unwrap_or_default();
        let total_cost = total_materials_cost + total_job_cost + total_blueprint_cost;

        rows.push(ProductionCostRow {
            product: product.clone(),
            unit_cost: total_cost / units,
            materials_cost_per_unit: total_materials_cost / units,
            job_cost_per_unit: total_job_cost / units,
            blueprint_cost_per_unit: total_blueprint_cost / units,
            total_materials_cost,
            total_job_cost,
            total_blueprint_cost,
            total_cost,
            material_costs_per_unit,
        });
    }

    Ok(rows)
}

/// Order rows by total cost, most expensive first.
pub fn sort_by_total_cost(rows: &mut [ProductionCostRow]) {
    rows.sort_by(|a, b| {
        b.total_cost
            .cmp(&a.total_cost)
            .then_with(|| a.product.cmp(&b.product))
    });
}
