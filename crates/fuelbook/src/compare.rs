//! Buy-location comparison.
//!
//! For an item quoted in both markets, buying locally is compared with
//! buying at the remote hub and paying freight. The remote buy order is
//! worth its price minus the shipping cost of one unit; whichever side pays
//! more wins.

use chrono::NaiveDateTime;
use fuelbook_core::fees::{LOCAL_HUB, REMOTE_HUB};
use fuelbook_core::{Catalog, Decimal};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;
use std::str::FromStr;

/// Format of the `Timestamp` column in price tables.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Default freight rate per cubic metre.
pub const DEFAULT_SHIPPING_PER_M3: Decimal = Decimal::from_parts(1200, 0, 0, false, 0);

/// One row of a price table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceQuote {
    /// Item name.
    pub item: String,
    /// Highest buy order.
    pub buy_max: Decimal,
    /// When the quote was taken, if known.
    pub timestamp: Option<NaiveDateTime>,
}

#[derive(Debug, Deserialize)]
struct PriceRecord {
    #[serde(rename = "Item")]
    item: String,
    #[serde(rename = "Buy_Max", default)]
    buy_max: Option<String>,
    #[serde(rename = "Timestamp", default)]
    timestamp: Option<String>,
}

/// Read a price table.
///
/// Rows without a readable buy price are skipped; unreadable timestamps
/// count as unknown.
pub fn read_prices<R: Read>(reader: R) -> Result<Vec<PriceQuote>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut quotes = Vec::new();
    for row in reader.deserialize::<PriceRecord>() {
        let record = row?;
        let Some(buy_max) = record.buy_max.as_deref().and_then(parse_price) else {
            tracing::debug!("skipping {} with no buy price", record.item);
            continue;
        };
        let timestamp = record
            .timestamp
            .as_deref()
            .and_then(|raw| NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT).ok());
        quotes.push(PriceQuote {
            item: record.item,
            buy_max,
            timestamp,
        });
    }
    Ok(quotes)
}

fn parse_price(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

/// Keep the latest quote per item.
///
/// Quotes with a timestamp beat quotes without one; among equals the later
/// row wins.
pub fn latest_prices(quotes: Vec<PriceQuote>) -> BTreeMap<String, Decimal> {
    let mut latest: BTreeMap<String, PriceQuote> = BTreeMap::new();
    for quote in quotes {
        match latest.get(&quote.item) {
            Some(seen) if seen.timestamp > quote.timestamp => {}
            _ => {
                latest.insert(quote.item.clone(), quote);
            }
        }
    }
    latest
        .into_iter()
        .map(|(item, quote)| (item, quote.buy_max))
        .collect()
}

/// Where an item is better bought.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuyLocation {
    /// Buy in the local market.
    Local,
    /// Buy at the remote hub and ship it in.
    Ship,
}

impl fmt::Display for BuyLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "Buy locally ({LOCAL_HUB})"),
            Self::Ship => write!(f, "Ship from {REMOTE_HUB}"),
        }
    }
}

/// Comparison result for one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareRow {
    /// Item name.
    pub item: String,
    /// Volume of one unit, m³.
    pub volume: Decimal,
    /// Best remote buy order.
    pub buy_remote: Decimal,
    /// Best local buy order.
    pub buy_local: Decimal,
    /// Freight for one unit.
    pub shipping_cost: Decimal,
    /// Remote price net of freight.
    pub net_remote: Decimal,
    /// `buy_local − net_remote`, rounded to 2 places.
    pub difference: Decimal,
    /// Which side wins.
    pub better: BuyLocation,
}

/// Compare one item.
///
/// # Example
///
/// ```
/// use fuelbook::compare::{compare_row, BuyLocation};
/// use rust_decimal_macros::dec;
///
/// let row = compare_row("Robotics", dec!(6), dec!(60000), dec!(55000), dec!(1200));
/// assert_eq!(row.net_remote, dec!(52800));
/// assert_eq!(row.better, BuyLocation::Local);
/// ```
pub fn compare_row(
    item: &str,
    volume: Decimal,
    buy_remote: Decimal,
    buy_local: Decimal,
    shipping_per_m3: Decimal,
) -> CompareRow {
    let shipping_cost = volume * shipping_per_m3;
    let net_remote = buy_remote - shipping_cost;
    let better = if buy_local > net_remote {
        BuyLocation::Local
    } else {
        BuyLocation::Ship
    };

    CompareRow {
        item: item.to_string(),
        volume,
        buy_remote,
        buy_local,
        shipping_cost,
        net_remote,
        difference: (buy_local - net_remote).round_dp(2),
        better,
    }
}

/// Compare every catalog item quoted in both markets, largest difference first.
pub fn compare(
    catalog: &Catalog,
    remote: &BTreeMap<String, Decimal>,
    local: &BTreeMap<String, Decimal>,
    shipping_per_m3: Decimal,
) -> Vec<CompareRow> {
    let mut rows: Vec<CompareRow> = catalog
        .items()
        .filter_map(|item| {
            let buy_remote = remote.get(&item.name)?;
            let buy_local = local.get(&item.name)?;
            Some(compare_row(
                &item.name,
                item.volume,
                *buy_remote,
                *buy_local,
                shipping_per_m3,
            ))
        })
        .collect();

    rows.sort_by(|a, b| b.difference.cmp(&a.difference).then_with(|| a.item.cmp(&b.item)));
    rows
}
