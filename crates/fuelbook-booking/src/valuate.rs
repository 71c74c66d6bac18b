//! Stock valuation by lot matching.
//!
//! Each material of a target is valued on its own. Incoming entries become
//! lots; outgoing entries consume them in ledger date order.

use fuelbook_core::{CostingMethod, Inventory, LedgerEntry, Lot, OverdrawPolicy, StockPosition};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use thiserror::Error;

/// Error returned when valuation refuses to clamp.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValuationError {
    /// An outgoing movement asked for more than was on hand.
    #[error("outgoing {requested} {material} exceeds the {available} on hand")]
    Overdrawn {
        /// The material being consumed.
        material: String,
        /// Quantity the outgoing movement asked for.
        requested: Decimal,
        /// Quantity available at that point.
        available: Decimal,
    },
}

/// Movements of one material, split by direction.
#[derive(Debug, Default)]
struct Movements<'a> {
    incoming: Vec<&'a LedgerEntry>,
    outgoing: Vec<&'a LedgerEntry>,
}

/// Group the entries of `target` by material.
fn movements_by_material<'a>(
    entries: &'a [LedgerEntry],
    target: &str,
) -> BTreeMap<&'a str, Movements<'a>> {
    let mut grouped: BTreeMap<&str, Movements> = BTreeMap::new();
    for entry in entries.iter().filter(|e| e.target == target) {
        let slot = grouped.entry(entry.material.as_str()).or_default();
        if entry.is_incoming() {
            slot.incoming.push(entry);
        } else {
            slot.outgoing.push(entry);
        }
    }
    grouped
}

/// Value every material of `target`, clamping over-consumption.
///
/// Materials that never had an incoming movement are left out. Positions
/// come back sorted by material name.
///
/// # Example
///
/// ```
/// use fuelbook_booking::valuate;
/// use fuelbook_core::{CostingMethod, FeeSchedule, NaiveDate, NewEntry, OperationKind};
/// use rust_decimal_macros::dec;
///
/// let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
/// let fees = FeeSchedule::none();
/// let entries = vec![
///     NewEntry::new("Coolant", OperationKind::Incoming, dec!(100), "Anyed", dec!(10), "RYC")
///         .price(1, day(1), dec!(0.75), &fees),
///     NewEntry::new("Coolant", OperationKind::Incoming, dec!(50), "Anyed", dec!(20), "RYC")
///         .price(2, day(2), dec!(0.75), &fees),
///     NewEntry::new("Coolant", OperationKind::Outgoing, dec!(120), "Anyed", dec!(0), "RYC")
///         .price(3, day(3), dec!(0.75), &fees),
/// ];
///
/// let positions = valuate(&entries, "RYC", CostingMethod::Fifo);
/// assert_eq!(positions[0].remaining_quantity, dec!(30));
/// assert_eq!(positions[0].total_value, dec!(600));
/// ```
#[must_use]
pub fn valuate(entries: &[LedgerEntry], target: &str, method: CostingMethod) -> Vec<StockPosition> {
    movements_by_material(entries, target)
        .into_iter()
        .filter(|(_, moves)| !moves.incoming.is_empty())
        .filter_map(|(material, moves)| {
            value_material(material, &moves, method, OverdrawPolicy::Clamp).ok()
        })
        .collect()
}

/// Value every material of `target` under an explicit overdraw policy.
///
/// With [`OverdrawPolicy::Strict`] the first outgoing movement that cannot
/// be covered fails the whole valuation.
pub fn valuate_with(
    entries: &[LedgerEntry],
    target: &str,
    method: CostingMethod,
    policy: OverdrawPolicy,
) -> Result<Vec<StockPosition>, ValuationError> {
    movements_by_material(entries, target)
        .into_iter()
        .filter(|(_, moves)| !moves.incoming.is_empty())
        .map(|(material, moves)| value_material(material, &moves, method, policy))
        .collect()
}

fn value_material(
    material: &str,
    moves: &Movements<'_>,
    method: CostingMethod,
    policy: OverdrawPolicy,
) -> Result<StockPosition, ValuationError> {
    match method {
        CostingMethod::Average => value_average(material, moves, policy),
        CostingMethod::Fifo | CostingMethod::Lifo => value_lots(material, moves, method, policy),
    }
}

fn value_average(
    material: &str,
    moves: &Movements<'_>,
    policy: OverdrawPolicy,
) -> Result<StockPosition, ValuationError> {
    let bought: Decimal = moves.incoming.iter().map(|e| e.quantity).sum();
    let cost: Decimal = moves.incoming.iter().map(|e| e.quantity * e.unit_total).sum();
    let used: Decimal = moves.outgoing.iter().map(|e| e.quantity).sum();

    let unit_cost = if bought.is_zero() {
        Decimal::ZERO
    } else {
        cost / bought
    };

    let remaining = bought - used;
    if remaining < Decimal::ZERO {
        overdrawn(material, used, bought, policy)?;
    }

    Ok(StockPosition::new(
        material,
        remaining.max(Decimal::ZERO),
        unit_cost,
    ))
}

fn value_lots(
    material: &str,
    moves: &Movements<'_>,
    method: CostingMethod,
    policy: OverdrawPolicy,
) -> Result<StockPosition, ValuationError> {
    let lots = moves.incoming.iter().map(|e| Lot::from(*e)).collect();
    let mut inventory = Inventory::from_lots(lots, method);

    let mut outgoing = moves.outgoing.clone();
    outgoing.sort_by_key(|e| (e.date, e.operation_id));

    for entry in outgoing {
        let available = inventory.units();
        let unmet = inventory.consume(entry.quantity);
        if !unmet.is_zero() {
            overdrawn(material, entry.quantity, available, policy)?;
        }
    }

    Ok(StockPosition::new(
        material,
        inventory.units(),
        inventory.average_cost(),
    ))
}

/// Fail under `Strict`, log and carry on under `Clamp`.
fn overdrawn(
    material: &str,
    requested: Decimal,
    available: Decimal,
    policy: OverdrawPolicy,
) -> Result<(), ValuationError> {
    match policy {
        OverdrawPolicy::Strict => Err(ValuationError::Overdrawn {
            material: material.to_string(),
            requested,
            available,
        }),
        OverdrawPolicy::Clamp => {
            tracing::debug!(
                "{material}: ignoring {} of {requested} outgoing with only {available} on hand",
                requested - available
            );
            Ok(())
        }
    }
}
