//! Stock valuation and production costing for fuelbook.
//!
//! This crate provides:
//! - Lot-matching valuation of a target's stock (FIFO, LIFO, AVERAGE)
//! - Production cost rollup from a usage matrix and the valued stock
//! - [`ProductionPlan`], a serializable rollup request
//!
//! Everything here is a pure function of borrowed ledger entries; nothing is
//! cached between calls.
//!
//! # Valuation
//!
//! ```
//! use fuelbook_booking::valuate;
//! use fuelbook_core::{CostingMethod, FeeSchedule, NaiveDate, NewEntry, OperationKind};
//! use rust_decimal_macros::dec;
//!
//! let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
//! let fees = FeeSchedule::none();
//! let entries = vec![
//!     NewEntry::new("Robotics", OperationKind::Incoming, dec!(100), "Jita", dec!(10), "Anyed")
//!         .price(1, day(1), dec!(6), &fees),
//!     NewEntry::new("Robotics", OperationKind::Incoming, dec!(50), "Jita", dec!(20), "Anyed")
//!         .price(2, day(2), dec!(6), &fees),
//! ];
//!
//! let avg = valuate(&entries, "Anyed", CostingMethod::Average);
//! assert_eq!(avg[0].remaining_quantity, dec!(150));
//! assert_eq!(avg[0].unit_cost.round_dp(2), dec!(13.33));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod plan;
mod rollup;
mod valuate;

pub use plan::ProductionPlan;
pub use rollup::{
    rollup, sort_by_total_cost, BatchCosts, ProductionCostRow, RollupError, UsageMatrix,
};
pub use valuate::{valuate, valuate_with, ValuationError};
