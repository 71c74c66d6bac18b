//! Stock position: what is left of a material and what it cost.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Remaining quantity and unit cost of one material for one target.
///
/// `total_value` is always `remaining_quantity × unit_cost`; it is derived
/// from the other two fields at construction and never rounded on its own.
///
/// # Examples
///
/// ```
/// use fuelbook_core::StockPosition;
/// use rust_decimal_macros::dec;
///
/// let pos = StockPosition::new("Coolant", dec!(30), dec!(20));
/// assert_eq!(pos.total_value, dec!(600));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StockPosition {
    /// Material name.
    pub material: String,
    /// Quantity on hand, never negative.
    pub remaining_quantity: Decimal,
    /// Cost basis per remaining unit, never negative.
    pub unit_cost: Decimal,
    /// `remaining_quantity × unit_cost`.
    pub total_value: Decimal,
}

impl StockPosition {
    /// Create a position, deriving its total value.
    #[must_use]
    pub fn new(material: impl Into<String>, remaining_quantity: Decimal, unit_cost: Decimal) -> Self {
        Self {
            material: material.into(),
            remaining_quantity,
            unit_cost,
            total_value: remaining_quantity * unit_cost,
        }
    }

    /// Check if nothing remains on hand.
    #[must_use]
    pub fn is_depleted(&self) -> bool {
        self.remaining_quantity.is_zero()
    }
}

impl fmt::Display for StockPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} @ {} = {}",
            self.material, self.remaining_quantity, self.unit_cost, self.total_value
        )
    }
}
