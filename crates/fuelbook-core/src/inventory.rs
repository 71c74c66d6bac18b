//! Inventory type representing the lots of one material.
//!
//! An [`Inventory`] keeps the lots of a single material in the order an
//! outgoing movement consumes them: oldest first for FIFO, newest first for
//! LIFO. Lots with the same date stay in operation-id order either way.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::{CostingMethod, Lot};

/// An ordered queue of lots for one material.
///
/// # Examples
///
/// ```
/// use fuelbook_core::{CostingMethod, Inventory, Lot, NaiveDate};
/// use rust_decimal_macros::dec;
///
/// let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
/// let lots = vec![
///     Lot::new(1, day(1), dec!(10), dec!(100)),
///     Lot::new(2, day(2), dec!(10), dec!(200)),
/// ];
///
/// // LIFO consumes the newest lot first
/// let mut inv = Inventory::from_lots(lots, CostingMethod::Lifo);
/// inv.consume(dec!(15));
/// assert_eq!(inv.units(), dec!(5));
/// assert_eq!(inv.average_cost(), dec!(100));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    lots: Vec<Lot>,
}

/// Consumption order of two lots under a costing method.
fn consumption_order(method: CostingMethod, a: &Lot, b: &Lot) -> Ordering {
    let by_date = match method {
        CostingMethod::Lifo => b.date.cmp(&a.date),
        CostingMethod::Fifo | CostingMethod::Average => a.date.cmp(&b.date),
    };
    by_date.then(a.operation_id.cmp(&b.operation_id))
}

impl Inventory {
    /// Create an empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an inventory whose lots are ordered for `method`.
    #[must_use]
    pub fn from_lots(mut lots: Vec<Lot>, method: CostingMethod) -> Self {
        lots.retain(|lot| !lot.is_empty());
        lots.sort_by(|a, b| consumption_order(method, a, b));
        Self { lots }
    }

    /// Get the lots in consumption order.
    #[must_use]
    pub fn lots(&self) -> &[Lot] {
        &self.lots
    }

    /// Check if no stock remains.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lots.iter().all(Lot::is_empty)
    }

    /// Get the number of lots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lots.len()
    }

    /// Total quantity on hand.
    #[must_use]
    pub fn units(&self) -> Decimal {
        self.lots.iter().map(|lot| lot.quantity).sum()
    }

    /// Total cost of the quantity on hand.
    #[must_use]
    pub fn book_value(&self) -> Decimal {
        self.lots.iter().map(Lot::book_value).sum()
    }

    /// Quantity-weighted mean cost per unit, zero when empty.
    #[must_use]
    pub fn average_cost(&self) -> Decimal {
        let units = self.units();
        if units.is_zero() {
            Decimal::ZERO
        } else {
            self.book_value() / units
        }
    }

    /// Append a lot at the back of the queue.
    pub fn push(&mut self, lot: Lot) {
        if !lot.is_empty() {
            self.lots.push(lot);
        }
    }

    /// Consume `quantity` units from the front of the queue.
    ///
    /// Exhausted lots are dropped. Returns the part of `quantity` that could
    /// not be matched because the queue ran out.
    pub fn consume(&mut self, quantity: Decimal) -> Decimal {
        let mut remaining = quantity.max(Decimal::ZERO);

        for lot in &mut self.lots {
            if remaining.is_zero() {
                break;
            }
            remaining -= lot.take(remaining);
        }

        // Clean up exhausted lots
        self.lots.retain(|lot| !lot.is_empty());

        remaining
    }
}

impl fmt::Display for Inventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "(empty)");
        }

        for (i, lot) in self.lots.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{lot}")?;
        }
        Ok(())
    }
}

impl FromIterator<Lot> for Inventory {
    fn from_iter<I: IntoIterator<Item = Lot>>(iter: I) -> Self {
        let mut inv = Self::new();
        for lot in iter {
            inv.push(lot);
        }
        inv
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn three_lots() -> Vec<Lot> {
        vec![
            Lot::new(1, date(2024, 1, 1), dec!(10), dec!(100)),
            Lot::new(2, date(2024, 2, 1), dec!(10), dec!(150)),
            Lot::new(3, date(2024, 3, 1), dec!(10), dec!(200)),
        ]
    }

    #[test]
    fn test_empty_inventory() {
        let inv = Inventory::new();
        assert!(inv.is_empty());
        assert_eq!(inv.len(), 0);
        assert_eq!(inv.units(), dec!(0));
        assert_eq!(inv.average_cost(), dec!(0));
    }

    #[test]
    fn test_consume_fifo() {
        let mut inv = Inventory::from_lots(three_lots(), CostingMethod::Fifo);

        let unmet = inv.consume(dec!(15));

        assert!(unmet.is_zero());
        assert_eq!(inv.units(), dec!(15));
        // 5 * 150 + 10 * 200 = 2750
        assert_eq!(inv.book_value(), dec!(2750));
        assert_eq!(inv.len(), 2);
    }

    #[test]
    fn test_consume_lifo() {
        let mut inv = Inventory::from_lots(three_lots(), CostingMethod::Lifo);

        inv.consume(dec!(15));

        assert_eq!(inv.units(), dec!(15));
        // 10 * 100 + 5 * 150 = 1750
        assert_eq!(inv.book_value(), dec!(1750));
    }

    #[test]
    fn test_consume_exact_lot_drops_it() {
        let mut inv = Inventory::from_lots(three_lots(), CostingMethod::Fifo);
        inv.consume(dec!(10));
        assert_eq!(inv.len(), 2);
        assert_eq!(inv.lots()[0].operation_id, 2);
    }

    #[test]
    fn test_consume_beyond_stock_reports_unmet() {
        let mut inv = Inventory::from_lots(three_lots(), CostingMethod::Fifo);

        let unmet = inv.consume(dec!(45));

        assert_eq!(unmet, dec!(15));
        assert!(inv.is_empty());
        assert_eq!(inv.average_cost(), dec!(0));
    }

    #[test]
    fn test_backdated_lot_sorts_by_date() {
        let lots = vec![
            Lot::new(1, date(2024, 3, 1), dec!(10), dec!(300)),
            Lot::new(2, date(2024, 1, 1), dec!(10), dec!(100)),
        ];

        let fifo = Inventory::from_lots(lots.clone(), CostingMethod::Fifo);
        assert_eq!(fifo.lots()[0].operation_id, 2);

        let lifo = Inventory::from_lots(lots, CostingMethod::Lifo);
        assert_eq!(lifo.lots()[0].operation_id, 1);
    }

    #[test]
    fn test_same_day_ties_keep_operation_order() {
        let lots = vec![
            Lot::new(5, date(2024, 1, 1), dec!(1), dec!(50)),
            Lot::new(2, date(2024, 1, 1), dec!(1), dec!(20)),
            Lot::new(9, date(2024, 1, 1), dec!(1), dec!(90)),
        ];

        for method in [CostingMethod::Fifo, CostingMethod::Lifo] {
            let inv = Inventory::from_lots(lots.clone(), method);
            let ids: Vec<u64> = inv.lots().iter().map(|l| l.operation_id).collect();
            assert_eq!(ids, vec![2, 5, 9], "{method}");
        }
    }

    #[test]
    fn test_average_cost() {
        let inv = Inventory::from_lots(
            vec![
                Lot::new(1, date(2024, 1, 1), dec!(100), dec!(10)),
                Lot::new(2, date(2024, 1, 2), dec!(50), dec!(20)),
            ],
            CostingMethod::Average,
        );
        assert_eq!(inv.average_cost().round_dp(2), dec!(13.33));
    }

    #[test]
    fn test_display() {
        let inv: Inventory = vec![Lot::new(1, date(2024, 1, 1), dec!(2), dec!(7))]
            .into_iter()
            .collect();
        assert_eq!(format!("{inv}"), "2 @ 7 {#1, 2024-01-01}");
        assert_eq!(format!("{}", Inventory::new()), "(empty)");
    }
}
