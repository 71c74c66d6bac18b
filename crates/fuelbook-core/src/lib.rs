//! Core types for fuelbook
//!
//! This crate provides the fundamental types used throughout the fuelbook project:
//!
//! - [`LedgerEntry`] - One incoming or outgoing stock movement
//! - [`NewEntry`] - The caller-supplied part of an entry, before pricing
//! - [`Lot`] - A remaining slice of one incoming movement
//! - [`Inventory`] - An ordered queue of lots for one material
//! - [`CostingMethod`] - How lots are consumed (FIFO, LIFO, AVERAGE)
//! - [`StockPosition`] - Remaining quantity and unit cost of a material
//! - [`FeeSchedule`] - Logistics fee rules applied at append time
//! - [`ItemCatalog`] - Per-unit volume lookup
//!
//! # Example
//!
//! ```
//! use fuelbook_core::{CostingMethod, Inventory, Lot};
//! use rust_decimal_macros::dec;
//! use chrono::NaiveDate;
//!
//! let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
//!
//! let mut inv = Inventory::from_lots(
//!     vec![
//!         Lot::new(1, day(1), dec!(100), dec!(10)),
//!         Lot::new(2, day(2), dec!(50), dec!(20)),
//!     ],
//!     CostingMethod::Fifo,
//! );
//!
//! // Consume 120 units, oldest lot first
//! let unmet = inv.consume(dec!(120));
//! assert!(unmet.is_zero());
//!
//! assert_eq!(inv.units(), dec!(30));
//! assert_eq!(inv.average_cost(), dec!(20));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod entry;
pub mod fees;
pub mod format;
pub mod inventory;
pub mod lot;
pub mod method;
pub mod position;

pub use catalog::{Catalog, CatalogItem, ItemCatalog};
pub use entry::{LedgerEntry, NewEntry, OperationKind, ParseOperationKindError};
pub use fees::{FeeRule, FeeSchedule};
pub use format::TableFormat;
pub use inventory::Inventory;
pub use lot::Lot;
pub use method::{CostingMethod, OverdrawPolicy, ParseCostingMethodError};
pub use position::StockPosition;

// Re-export commonly used external types
pub use chrono::NaiveDate;
pub use rust_decimal::Decimal;
