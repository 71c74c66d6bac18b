//! Ledger entries.
//!
//! A [`LedgerEntry`] is one stock movement in or out of a target's stock.
//! Callers describe a movement with a [`NewEntry`]; the ledger store prices it
//! (fee, totals) and assigns the operation id when it is appended.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::FeeSchedule;

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationKind {
    /// Goods received into stock.
    #[serde(rename = "Incoming goods")]
    Incoming,
    /// Goods taken out of stock.
    #[serde(rename = "Outgoing goods")]
    Outgoing,
}

impl OperationKind {
    /// The label used in the persisted ledger.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Incoming => "Incoming goods",
            Self::Outgoing => "Outgoing goods",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when an operation label is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a valid operation (expected \"Incoming goods\" or \"Outgoing goods\")")]
pub struct ParseOperationKindError(pub String);

impl FromStr for OperationKind {
    type Err = ParseOperationKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "incoming goods" | "incoming" | "in" | "buy" => Ok(Self::Incoming),
            "outgoing goods" | "outgoing" | "out" | "use" => Ok(Self::Outgoing),
            _ => Err(ParseOperationKindError(s.to_string())),
        }
    }
}

/// A movement as described by the caller, before it is priced.
///
/// # Examples
///
/// ```
/// use fuelbook_core::{FeeSchedule, NewEntry, OperationKind, NaiveDate};
/// use rust_decimal_macros::dec;
///
/// let entry = NewEntry::new("Oxygen Isotopes", OperationKind::Incoming, dec!(10), "C-J6MT", dec!(500), "RYC")
///     .price(7, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), dec!(0.1), &FeeSchedule::default());
///
/// assert_eq!(entry.operation_id, 7);
/// assert_eq!(entry.fee_per_unit, dec!(8.0));
/// assert_eq!(entry.grand_total, dec!(5080.0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEntry {
    /// Name of the item moved.
    pub material: String,
    /// Direction of the movement.
    pub operation_kind: OperationKind,
    /// Quantity moved, positive.
    pub quantity: Decimal,
    /// Region the movement happened in.
    pub region: String,
    /// Price per unit excluding fees.
    pub unit_price: Decimal,
    /// Account or production line the movement belongs to.
    pub target: String,
    /// Movement date; `None` means the day it is appended.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl NewEntry {
    /// Describe a movement dated on the day it is appended.
    #[must_use]
    pub fn new(
        material: impl Into<String>,
        operation_kind: OperationKind,
        quantity: Decimal,
        region: impl Into<String>,
        unit_price: Decimal,
        target: impl Into<String>,
    ) -> Self {
        Self {
            material: material.into(),
            operation_kind,
            quantity,
            region: region.into(),
            unit_price,
            target: target.into(),
            date: None,
        }
    }

    /// Backdate the movement.
    #[must_use]
    pub const fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Compute fees and totals, producing the entry to store.
    ///
    /// `date` is used only when the movement carries no date of its own.
    #[must_use]
    pub fn price(
        self,
        operation_id: u64,
        date: NaiveDate,
        volume_per_unit: Decimal,
        fees: &FeeSchedule,
    ) -> LedgerEntry {
        let fee_per_unit = fees.fee_per_unit(&self.region, &self.target, volume_per_unit);
        let unit_total = self.unit_price + fee_per_unit;

        LedgerEntry {
            operation_id,
            date: self.date.unwrap_or(date),
            material: self.material,
            operation_kind: self.operation_kind,
            quantity: self.quantity,
            region: self.region,
            unit_price: self.unit_price,
            fee_per_unit,
            unit_total,
            volume_total: volume_per_unit * self.quantity,
            target: self.target,
            grand_total: unit_total * self.quantity,
        }
    }
}

/// One stock movement as recorded in the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Unique id, increasing in append order.
    pub operation_id: u64,
    /// Movement date.
    pub date: NaiveDate,
    /// Name of the item moved.
    pub material: String,
    /// Direction of the movement.
    pub operation_kind: OperationKind,
    /// Quantity moved.
    pub quantity: Decimal,
    /// Region the movement happened in.
    pub region: String,
    /// Price per unit excluding fees.
    pub unit_price: Decimal,
    /// Logistics fee per unit.
    pub fee_per_unit: Decimal,
    /// Cost basis per unit: price plus fee.
    pub unit_total: Decimal,
    /// Total cargo volume of the movement.
    pub volume_total: Decimal,
    /// Account or production line the movement belongs to.
    pub target: String,
    /// `unit_total × quantity`.
    pub grand_total: Decimal,
}

impl LedgerEntry {
    /// Check if this movement adds stock.
    #[must_use]
    pub fn is_incoming(&self) -> bool {
        self.operation_kind == OperationKind::Incoming
    }

    /// Check if this movement removes stock.
    #[must_use]
    pub fn is_outgoing(&self) -> bool {
        self.operation_kind == OperationKind::Outgoing
    }
}

impl fmt::Display for LedgerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {} {} {} @ {} ({} + {} fee) [{} -> {}] = {}",
            self.operation_id,
            self.date.format("%Y-%m-%d"),
            self.operation_kind,
            self.quantity,
            self.material,
            self.unit_total,
            self.unit_price,
            self.fee_per_unit,
            self.region,
            self.target,
            self.grand_total,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_operation_kind_labels() {
        assert_eq!(OperationKind::Incoming.to_string(), "Incoming goods");
        assert_eq!(OperationKind::Outgoing.to_string(), "Outgoing goods");
        assert_eq!(
            "Incoming goods".parse::<OperationKind>(),
            Ok(OperationKind::Incoming)
        );
        assert_eq!("out".parse::<OperationKind>(), Ok(OperationKind::Outgoing));
        assert!("sideways".parse::<OperationKind>().is_err());
    }

    #[test]
    fn test_price_local_hub() {
        let entry = NewEntry::new(
            "Heavy Water",
            OperationKind::Incoming,
            dec!(10),
            "C-J6MT",
            dec!(100),
            "RYC",
        )
        .price(1, date(2024, 5, 1), dec!(2), &FeeSchedule::default());

        assert_eq!(entry.fee_per_unit, dec!(160));
        assert_eq!(entry.unit_total, dec!(260));
        assert_eq!(entry.volume_total, dec!(20));
        assert_eq!(entry.grand_total, dec!(2600));
        assert_eq!(entry.date, date(2024, 5, 1));
    }

    #[test]
    fn test_price_remote_hub_per_target() {
        let ryc = NewEntry::new(
            "Heavy Water",
            OperationKind::Incoming,
            dec!(10),
            "Jita",
            dec!(0),
            "RYC",
        )
        .price(1, date(2024, 5, 1), dec!(2), &FeeSchedule::default());
        assert_eq!(ryc.fee_per_unit, dec!(2560));

        let anyed = NewEntry::new(
            "Heavy Water",
            OperationKind::Incoming,
            dec!(10),
            "Jita",
            dec!(0),
            "Anyed",
        )
        .price(2, date(2024, 5, 1), dec!(2), &FeeSchedule::default());
        assert_eq!(anyed.fee_per_unit, dec!(0));
    }

    #[test]
    fn test_backdated_entry_keeps_own_date() {
        let entry = NewEntry::new(
            "Coolant",
            OperationKind::Outgoing,
            dec!(5),
            "Anyed",
            dec!(0),
            "Anyed",
        )
        .on(date(2023, 12, 31))
        .price(3, date(2024, 5, 1), dec!(0.75), &FeeSchedule::default());

        assert_eq!(entry.date, date(2023, 12, 31));
        assert!(entry.is_outgoing());
        assert!(!entry.is_incoming());
    }

    #[test]
    fn test_display() {
        let entry = NewEntry::new(
            "Robotics",
            OperationKind::Incoming,
            dec!(2),
            "Anyed",
            dec!(75000),
            "Anyed",
        )
        .price(9, date(2024, 1, 2), dec!(6), &FeeSchedule::default());

        let s = entry.to_string();
        assert!(s.starts_with("#9 2024-01-02 Incoming goods 2 Robotics"));
        assert!(s.ends_with("= 150000"));
    }
}
