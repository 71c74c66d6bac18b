//! Lot type representing a remaining slice of one incoming movement.
//!
//! A [`Lot`] carries the quantity still on hand from one incoming ledger
//! entry together with that entry's cost basis per unit. Lots keep the date
//! and operation id of their entry so they can be ordered for FIFO and LIFO
//! consumption.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::LedgerEntry;

/// A remaining `(quantity, unit cost)` slice of one incoming movement.
///
/// # Examples
///
/// ```
/// use fuelbook_core::{Lot, NaiveDate};
/// use rust_decimal_macros::dec;
///
/// let mut lot = Lot::new(1, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(), dec!(100), dec!(10));
/// assert_eq!(lot.book_value(), dec!(1000));
///
/// let taken = lot.take(dec!(30));
/// assert_eq!(taken, dec!(30));
/// assert_eq!(lot.quantity, dec!(70));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Lot {
    /// Operation id of the incoming entry.
    pub operation_id: u64,
    /// Date of the incoming entry.
    pub date: NaiveDate,
    /// Quantity still on hand.
    pub quantity: Decimal,
    /// Cost basis per unit, fees included.
    pub unit_cost: Decimal,
}

impl Lot {
    /// Create a new lot.
    #[must_use]
    pub const fn new(
        operation_id: u64,
        date: NaiveDate,
        quantity: Decimal,
        unit_cost: Decimal,
    ) -> Self {
        Self {
            operation_id,
            date,
            quantity,
            unit_cost,
        }
    }

    /// Check if nothing remains in this lot.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quantity <= Decimal::ZERO
    }

    /// Total cost of the quantity remaining in this lot.
    #[must_use]
    pub fn book_value(&self) -> Decimal {
        self.quantity * self.unit_cost
    }

    /// Take up to `wanted` units out of this lot.
    ///
    /// Returns the quantity actually taken, which is less than `wanted` when
    /// the lot runs out.
    pub fn take(&mut self, wanted: Decimal) -> Decimal {
        let taken = wanted.min(self.quantity).max(Decimal::ZERO);
        self.quantity -= taken;
        taken
    }
}

impl From<&LedgerEntry> for Lot {
    fn from(entry: &LedgerEntry) -> Self {
        Self::new(
            entry.operation_id,
            entry.date,
            entry.quantity,
            entry.unit_total,
        )
    }
}

impl fmt::Display for Lot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} @ {} {{#{}, {}}}",
            self.quantity, self.unit_cost, self.operation_id, self.date
        )
    }
}
