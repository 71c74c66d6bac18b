//! Item catalog loading.
//!
//! The catalog file has one row per item with at least the `Item` and
//! `Volume` columns; an `ID` column with the market type id is optional and
//! any other columns are ignored.

use fuelbook_core::{Catalog, CatalogItem};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs;
use std::io::Read;
use std::path::Path;

use crate::StoreError;

#[derive(Debug, Deserialize)]
struct CatalogRecord {
    #[serde(rename = "Item")]
    item: String,
    #[serde(rename = "ID", default)]
    id: Option<u64>,
    #[serde(rename = "Volume", with = "rust_decimal::serde::str")]
    volume: Decimal,
}

impl From<CatalogRecord> for CatalogItem {
    fn from(record: CatalogRecord) -> Self {
        Self {
            name: record.item,
            type_id: record.id,
            volume: record.volume,
        }
    }
}

/// Read catalog rows from any reader.
pub fn read_catalog<R: Read>(reader: R) -> Result<Catalog, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    reader
        .deserialize::<CatalogRecord>()
        .map(|row| row.map(CatalogItem::from))
        .collect()
}

/// Load the item catalog from a CSV file.
pub fn load_catalog(path: &Path) -> Result<Catalog, StoreError> {
    let file = fs::File::open(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = read_catalog(file).map_err(|source| StoreError::Csv {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!("loaded {} catalog items from {}", catalog.len(), path.display());
    Ok(catalog)
}
