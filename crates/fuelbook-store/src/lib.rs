//! Append-only stock ledger for fuelbook.
//!
//! This crate owns the ledger entries for the lifetime of a process. It
//! handles loading the ledger through a [`LedgerPersistence`] backend,
//! pricing new movements (fees, totals) and writing the table back.
//!
//! # Features
//!
//! - Operation ids assigned as max existing + 1
//! - Volume-proportional logistics fees from a [`FeeSchedule`]
//! - CSV ledger and item catalog files
//! - Whole-table replace on every append
//!
//! # Example
//!
//! ```
//! use fuelbook_core::{Catalog, CatalogItem, NewEntry, OperationKind, NaiveDate};
//! use fuelbook_store::{LedgerStore, MemoryLedger};
//! use rust_decimal_macros::dec;
//!
//! let catalog: Catalog = vec![CatalogItem::new("Heavy Water", dec!(0.4))].into_iter().collect();
//! let mut store = LedgerStore::open(MemoryLedger::new()).unwrap();
//!
//! let entry = store
//!     .append(
//!         NewEntry::new("Heavy Water", OperationKind::Incoming, dec!(1000), "C-J6MT", dec!(80), "RYC")
//!             .on(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()),
//!         &catalog,
//!     )
//!     .unwrap();
//!
//! assert_eq!(entry.operation_id, 1);
//! assert_eq!(entry.fee_per_unit, dec!(32.0));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod csv_ledger;
pub mod persistence;

pub use catalog::load_catalog;
pub use csv_ledger::CsvLedger;
pub use persistence::{LedgerPersistence, MemoryLedger};

use chrono::Local;
use fuelbook_core::{FeeSchedule, ItemCatalog, LedgerEntry, NewEntry};
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, appending or saving the ledger.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error reading or writing a file.
    #[error("failed to access {path}: {source}")]
    Io {
        /// The path that failed.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV content.
    #[error("invalid CSV in {path}: {source}")]
    Csv {
        /// The file being read or written.
        path: PathBuf,
        /// The underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// Movement quantity was zero or negative.
    #[error("quantity must be positive, got {quantity}")]
    InvalidQuantity {
        /// The rejected quantity.
        quantity: Decimal,
    },

    /// Unit price was negative.
    #[error("unit price must not be negative, got {price}")]
    NegativePrice {
        /// The rejected price.
        price: Decimal,
    },

    /// The loaded ledger repeats an operation id.
    #[error("duplicate operation id {operation_id} in ledger")]
    DuplicateOperationId {
        /// The repeated id.
        operation_id: u64,
    },
}

/// The ledger entry store.
///
/// Entries are only ever appended; nothing is modified or removed once
/// written. Appending takes `&mut self`, so one store value has one writer.
#[derive(Debug)]
pub struct LedgerStore<P> {
    entries: Vec<LedgerEntry>,
    persistence: P,
    fees: FeeSchedule,
}

impl<P: LedgerPersistence> LedgerStore<P> {
    /// Load the full ledger from `persistence`, using the default fee schedule.
    pub fn open(persistence: P) -> Result<Self, StoreError> {
        let entries = persistence.load()?;

        let mut seen = BTreeSet::new();
        for entry in &entries {
            if !seen.insert(entry.operation_id) {
                return Err(StoreError::DuplicateOperationId {
                    operation_id: entry.operation_id,
                });
            }
        }

        tracing::debug!(
            "opened ledger {} with {} entries",
            persistence.describe(),
            entries.len()
        );

        Ok(Self {
            entries,
            persistence,
            fees: FeeSchedule::default(),
        })
    }

    /// Replace the fee schedule used for new entries.
    #[must_use]
    pub fn with_fees(mut self, fees: FeeSchedule) -> Self {
        self.fees = fees;
        self
    }

    /// The fee schedule used for new entries.
    pub const fn fees(&self) -> &FeeSchedule {
        &self.fees
    }

    /// All entries, in append order.
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the ledger has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The persistence backend.
    pub const fn persistence(&self) -> &P {
        &self.persistence
    }

    /// The id the next appended entry will receive.
    pub fn next_operation_id(&self) -> u64 {
        self.entries
            .iter()
            .map(|e| e.operation_id)
            .max()
            .map_or(1, |max| max + 1)
    }

    /// Distinct targets, sorted.
    pub fn targets(&self) -> Vec<&str> {
        let targets: BTreeSet<&str> = self.entries.iter().map(|e| e.target.as_str()).collect();
        targets.into_iter().collect()
    }

    /// Entries belonging to `target`, in append order.
    pub fn entries_for<'a>(&'a self, target: &'a str) -> impl Iterator<Item = &'a LedgerEntry> {
        self.entries.iter().filter(move |e| e.target == target)
    }

    /// Price a movement, append it, and write the ledger back.
    ///
    /// Movements without a date are dated today (local time). Unknown items
    /// get volume zero and therefore no fee.
    pub fn append(
        &mut self,
        new: NewEntry,
        catalog: &impl ItemCatalog,
    ) -> Result<LedgerEntry, StoreError> {
        if new.quantity <= Decimal::ZERO {
            return Err(StoreError::InvalidQuantity {
                quantity: new.quantity,
            });
        }
        if new.unit_price.is_sign_negative() && !new.unit_price.is_zero() {
            return Err(StoreError::NegativePrice {
                price: new.unit_price,
            });
        }

        if !catalog.contains(&new.material) {
            tracing::warn!(
                "item '{}' is not in the catalog; volume and fee are zero",
                new.material
            );
        }

        let volume = catalog.volume(&new.material);
        let today = Local::now().date_naive();
        let entry = new.price(self.next_operation_id(), today, volume, &self.fees);

        self.entries.push(entry.clone());
        if let Err(e) = self.persistence.append(&self.entries, &entry) {
            self.entries.pop();
            return Err(e);
        }

        tracing::info!(
            "added {} for {} on {} (#{})",
            entry.operation_kind,
            entry.material,
            entry.date.format("%m/%d/%Y"),
            entry.operation_id
        );

        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fuelbook_core::{Catalog, CatalogItem, NaiveDate, OperationKind};
    use rust_decimal_macros::dec;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn catalog() -> Catalog {
        vec![
            CatalogItem::new("Heavy Water", dec!(2)),
            CatalogItem::new("Coolant", dec!(0.75)),
        ]
        .into_iter()
        .collect()
    }

    fn incoming(item: &str, qty: Decimal, region: &str, target: &str) -> NewEntry {
        NewEntry::new(item, OperationKind::Incoming, qty, region, dec!(100), target)
            .on(date(2024, 1, 1))
    }

    /// Persistence that always fails to write.
    struct BrokenDisk;

    impl LedgerPersistence for BrokenDisk {
        fn load(&self) -> Result<Vec<LedgerEntry>, StoreError> {
            Ok(Vec::new())
        }

        fn save(&mut self, _entries: &[LedgerEntry]) -> Result<(), StoreError> {
            Err(StoreError::Io {
                path: PathBuf::from("/dev/full"),
                source: std::io::Error::other("disk full"),
            })
        }

        fn describe(&self) -> String {
            "<broken>".to_string()
        }
    }

    #[test]
    fn test_first_id_is_one() {
        let mut store = LedgerStore::open(MemoryLedger::new()).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.next_operation_id(), 1);

        let entry = store
            .append(incoming("Coolant", dec!(5), "Anyed", "Anyed"), &catalog())
            .unwrap();
        assert_eq!(entry.operation_id, 1);
    }

    #[test]
    fn test_ids_continue_from_max() {
        let existing = incoming("Coolant", dec!(5), "Anyed", "Anyed").price(
            41,
            date(2024, 1, 1),
            dec!(0.75),
            &FeeSchedule::default(),
        );
        let mut store = LedgerStore::open(MemoryLedger::with_entries(vec![existing])).unwrap();

        let entry = store
            .append(incoming("Coolant", dec!(5), "Anyed", "Anyed"), &catalog())
            .unwrap();
        assert_eq!(entry.operation_id, 42);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_fee_rules_on_append() {
        let mut store = LedgerStore::open(MemoryLedger::new()).unwrap();
        let catalog = catalog();

        let local = store
            .append(incoming("Heavy Water", dec!(10), "C-J6MT", "RYC"), &catalog)
            .unwrap();
        let remote_ryc = store
            .append(incoming("Heavy Water", dec!(10), "Jita", "RYC"), &catalog)
            .unwrap();
        let remote_anyed = store
            .append(incoming("Heavy Water", dec!(10), "Jita", "Anyed"), &catalog)
            .unwrap();

        assert_eq!(local.fee_per_unit, dec!(160));
        assert_eq!(remote_ryc.fee_per_unit, dec!(2560));
        assert_eq!(remote_anyed.fee_per_unit, dec!(0));
        assert_eq!(local.volume_total, dec!(20));
        assert_eq!(local.grand_total, dec!(2600));
    }

    #[test]
    fn test_unknown_item_has_no_fee() {
        let mut store = LedgerStore::open(MemoryLedger::new()).unwrap();
        let entry = store
            .append(incoming("Unobtainium", dec!(10), "C-J6MT", "RYC"), &catalog())
            .unwrap();
        assert_eq!(entry.fee_per_unit, dec!(0));
        assert_eq!(entry.volume_total, dec!(0));
    }

    #[test]
    fn test_rejects_bad_quantity_and_price() {
        let mut store = LedgerStore::open(MemoryLedger::new()).unwrap();

        let zero = incoming("Coolant", dec!(0), "Anyed", "Anyed");
        assert!(matches!(
            store.append(zero, &catalog()),
            Err(StoreError::InvalidQuantity { .. })
        ));

        let mut negative = incoming("Coolant", dec!(1), "Anyed", "Anyed");
        negative.unit_price = dec!(-1);
        assert!(matches!(
            store.append(negative, &catalog()),
            Err(StoreError::NegativePrice { .. })
        ));

        assert!(store.is_empty());
        assert_eq!(store.persistence().saves(), 0);
    }

    #[test]
    fn test_every_append_writes_whole_table() {
        let mut store = LedgerStore::open(MemoryLedger::new()).unwrap();
        for _ in 0..3 {
            store
                .append(incoming("Coolant", dec!(1), "Anyed", "Anyed"), &catalog())
                .unwrap();
        }
        assert_eq!(store.persistence().saves(), 3);
        assert_eq!(store.persistence().entries(), store.entries());
    }

    #[test]
    fn test_failed_save_rolls_back() {
        let mut store = LedgerStore::open(BrokenDisk).unwrap();
        let result = store.append(incoming("Coolant", dec!(1), "Anyed", "Anyed"), &catalog());
        assert!(matches!(result, Err(StoreError::Io { .. })));
        assert!(store.is_empty());
        assert_eq!(store.next_operation_id(), 1);
    }

    #[test]
    fn test_duplicate_ids_rejected_on_open() {
        let entry = incoming("Coolant", dec!(5), "Anyed", "Anyed").price(
            3,
            date(2024, 1, 1),
            dec!(0.75),
            &FeeSchedule::default(),
        );
        let result = LedgerStore::open(MemoryLedger::with_entries(vec![entry.clone(), entry]));
        assert!(matches!(
            result,
            Err(StoreError::DuplicateOperationId { operation_id: 3 })
        ));
    }

    #[test]
    fn test_targets_and_filter() {
        let mut store = LedgerStore::open(MemoryLedger::new()).unwrap();
        let catalog = catalog();
        store
            .append(incoming("Coolant", dec!(1), "Anyed", "RYC"), &catalog)
            .unwrap();
        store
            .append(incoming("Coolant", dec!(1), "Anyed", "Anyed"), &catalog)
            .unwrap();
        store
            .append(incoming("Heavy Water", dec!(1), "Anyed", "RYC"), &catalog)
            .unwrap();

        assert_eq!(store.targets(), vec!["Anyed", "RYC"]);
        assert_eq!(store.entries_for("RYC").count(), 2);
        assert_eq!(store.entries_for("Nowhere").count(), 0);
    }

    #[test]
    fn test_custom_fee_schedule() {
        use fuelbook_core::FeeRule;

        let mut store = LedgerStore::open(MemoryLedger::new())
            .unwrap()
            .with_fees(FeeSchedule::new(vec![FeeRule::region("Anyed", dec!(10))]));
        let entry = store
            .append(incoming("Coolant", dec!(4), "Anyed", "Anyed"), &catalog())
            .unwrap();
        assert_eq!(entry.fee_per_unit, dec!(7.5));
        assert_eq!(store.fees().rules().len(), 1);
    }
}
