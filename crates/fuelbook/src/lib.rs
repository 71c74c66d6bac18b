//! Fuel block bookkeeping CLI tools.
//!
//! This crate provides the command-line tools of fuelbook:
//!
//! - `fuelbook-add`: Append a stock movement to the ledger
//! - `fuelbook-stock`: Value the stock of one or more targets
//! - `fuelbook-production`: Price a production plan against current stock
//! - `fuelbook-compare`: Compare buying locally against shipping from the trade hub
//!
//! # Example Usage
//!
//! ```bash
//! fuelbook-add --ledger inventory.csv --items items.csv "Heavy Water" incoming 28768 C-J6MT 85.5 RYC
//! fuelbook-stock --ledger inventory.csv RYC Anyed --method lifo
//! fuelbook-production --ledger inventory.csv plans/ryc.json
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cmd;
pub mod compare;
pub mod report;
