//! CSV ledger file.
//!
//! One row per entry, in append order, with the header
//!
//! ```text
//! OperationID,Date,Item,Operation,Quantity,Region,Price,Fees,Volume,Target,Total,Grant Total
//! ```
//!
//! Dates are written as `MM/DD/YYYY`; `Operation` is `Incoming goods` or
//! `Outgoing goods`.

use chrono::NaiveDate;
use fuelbook_core::{LedgerEntry, OperationKind};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::persistence::LedgerPersistence;
use crate::StoreError;

/// Column header of the ledger file.
pub const HEADER: [&str; 12] = [
    "OperationID",
    "Date",
    "Item",
    "Operation",
    "Quantity",
    "Region",
    "Price",
    "Fees",
    "Volume",
    "Target",
    "Total",
    "Grant Total",
];

/// Date format of the `Date` column.
pub const DATE_FORMAT: &str = "%m/%d/%Y";

mod mdy_date {
    use super::DATE_FORMAT;
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&date.format(DATE_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(d)?;
        let raw = raw.trim();
        NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
            .map_err(|e| serde::de::Error::custom(format!("invalid date '{raw}': {e}")))
    }
}

/// On-disk shape of one ledger row.
#[derive(Debug, Serialize, Deserialize)]
struct LedgerRecord {
    #[serde(rename = "OperationID")]
    operation_id: u64,
    #[serde(rename = "Date", with = "mdy_date")]
    date: NaiveDate,
    #[serde(rename = "Item")]
    item: String,
    #[serde(rename = "Operation")]
    operation: OperationKind,
    #[serde(rename = "Quantity", with = "rust_decimal::serde::str")]
    quantity: Decimal,
    #[serde(rename = "Region")]
    region: String,
    #[serde(rename = "Price", with = "rust_decimal::serde::str")]
    price: Decimal,
    #[serde(rename = "Fees", with = "rust_decimal::serde::str")]
    fees: Decimal,
    #[serde(rename = "Volume", with = "rust_decimal::serde::str")]
    volume: Decimal,
    #[serde(rename = "Target")]
    target: String,
    #[serde(rename = "Total", with = "rust_decimal::serde::str")]
    total: Decimal,
    #[serde(rename = "Grant Total", with = "rust_decimal::serde::str")]
    grand_total: Decimal,
}

impl From<&LedgerEntry> for LedgerRecord {
    fn from(entry: &LedgerEntry) -> Self {
        Self {
            operation_id: entry.operation_id,
            date: entry.date,
            item: entry.material.clone(),
            operation: entry.operation_kind,
            quantity: entry.quantity,
            region: entry.region.clone(),
            price: entry.unit_price,
            fees: entry.fee_per_unit,
            volume: entry.volume_total,
            target: entry.target.clone(),
            total: entry.unit_total,
            grand_total: entry.grand_total,
        }
    }
}

impl From<LedgerRecord> for LedgerEntry {
    fn from(record: LedgerRecord) -> Self {
        Self {
            operation_id: record.operation_id,
            date: record.date,
            material: record.item,
            operation_kind: record.operation,
            quantity: record.quantity,
            region: record.region,
            unit_price: record.price,
            fee_per_unit: record.fees,
            unit_total: record.total,
            volume_total: record.volume,
            target: record.target,
            grand_total: record.grand_total,
        }
    }
}

/// Read ledger rows from any reader.
pub fn read_entries<R: Read>(reader: R) -> Result<Vec<LedgerEntry>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    reader
        .deserialize::<LedgerRecord>()
        .map(|row| row.map(LedgerEntry::from))
        .collect()
}

/// Write ledger rows, header first, to any writer.
pub fn write_entries<W: Write>(writer: W, entries: &[LedgerEntry]) -> Result<(), csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    writer.write_record(HEADER)?;
    for entry in entries {
        writer.serialize(LedgerRecord::from(entry))?;
    }
    writer.flush()?;
    Ok(())
}

/// Ledger persisted as a CSV file.
///
/// A missing file reads as an empty ledger. Saving writes a sibling
/// temporary file and renames it over the ledger, so readers never observe
/// a half-written table.
#[derive(Debug, Clone)]
pub struct CsvLedger {
    path: PathBuf,
}

impl CsvLedger {
    /// Ledger stored at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the ledger file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl LedgerPersistence for CsvLedger {
    fn load(&self) -> Result<Vec<LedgerEntry>, StoreError> {
        if !self.path.exists() {
            tracing::debug!("ledger {} does not exist yet", self.path.display());
            return Ok(Vec::new());
        }

        let file = fs::File::open(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        let entries = read_entries(file).map_err(|source| StoreError::Csv {
            path: self.path.clone(),
            source,
        })?;

        tracing::debug!("loaded {} entries from {}", entries.len(), self.path.display());
        Ok(entries)
    }

    fn save(&mut self, entries: &[LedgerEntry]) -> Result<(), StoreError> {
        let tmp = self.temp_path();

        let file = fs::File::create(&tmp).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        write_entries(file, entries).map_err(|source| StoreError::Csv {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        tracing::debug!("wrote {} entries to {}", entries.len(), self.path.display());
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
