//! fuelbook-add - Append a stock movement to the ledger.
//!
//! # Usage
//!
//! ```bash
//! fuelbook-add --ledger inventory.csv --items items.csv "Oxygen Isotopes" incoming 76149 Jita 560.5 RYC
//! fuelbook-add "Coolant" outgoing 1523 C-J6MT 0 RYC --date 2025-10-04
//! ```

use crate::cmd::completions::ShellType;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use fuelbook_core::{Decimal, NewEntry, OperationKind};
use fuelbook_store::{load_catalog, CsvLedger, LedgerStore};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Append one incoming or outgoing movement to the stock ledger.
#[derive(Parser, Debug)]
#[command(name = "fuelbook-add")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Generate shell completions and exit
    #[arg(long, value_name = "SHELL", hide = true)]
    pub generate_completions: Option<ShellType>,

    /// Ledger CSV file
    #[arg(short, long, default_value = "inventory.csv")]
    pub ledger: PathBuf,

    /// Item catalog CSV with per-unit volumes
    #[arg(short, long, default_value = "items.csv")]
    pub items: PathBuf,

    /// Item moved
    #[arg(value_name = "ITEM", required_unless_present = "generate_completions")]
    pub item: Option<String>,

    /// Direction: incoming or outgoing
    #[arg(value_name = "OPERATION", required_unless_present = "generate_completions")]
    pub operation: Option<OperationKind>,

    /// Quantity moved
    #[arg(value_name = "QTY", required_unless_present = "generate_completions")]
    pub quantity: Option<Decimal>,

    /// Region the movement happened in
    #[arg(value_name = "REGION", required_unless_present = "generate_completions")]
    pub region: Option<String>,

    /// Price per unit, before fees
    #[arg(value_name = "PRICE", required_unless_present = "generate_completions")]
    pub price: Option<Decimal>,

    /// Target the stock belongs to
    #[arg(value_name = "TARGET", required_unless_present = "generate_completions")]
    pub target: Option<String>,

    /// Date of the movement (YYYY-MM-DD, defaults to today)
    #[arg(short, long)]
    pub date: Option<NaiveDate>,

    /// Show verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    fn new_entry(&self) -> Result<NewEntry> {
        let (Some(item), Some(operation), Some(quantity), Some(region), Some(price), Some(target)) = (
            &self.item,
            self.operation,
            self.quantity,
            &self.region,
            self.price,
            &self.target,
        ) else {
            anyhow::bail!("ITEM, OPERATION, QTY, REGION, PRICE and TARGET are required");
        };

        let entry = NewEntry::new(
            item.as_str(),
            operation,
            quantity,
            region.as_str(),
            price,
            target.as_str(),
        );
        Ok(match self.date {
            Some(date) => entry.on(date),
            None => entry,
        })
    }
}

/// Main entry point for the add command.
pub fn main() -> ExitCode {
    let args = Args::parse();

    if let Some(shell) = args.generate_completions {
        crate::cmd::completions::generate_completions::<Args>(shell, "fuelbook-add");
        return ExitCode::SUCCESS;
    }

    crate::cmd::init_tracing(args.verbose);

    match run(&args, &mut io::stdout()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

/// Run the add command, printing the stored entry.
pub fn run<W: Write>(args: &Args, writer: &mut W) -> Result<()> {
    let new = args.new_entry()?;

    let catalog = load_catalog(&args.items)
        .with_context(|| format!("failed to load item catalog {}", args.items.display()))?;
    let mut store = LedgerStore::open(CsvLedger::new(&args.ledger))
        .with_context(|| format!("failed to open ledger {}", args.ledger.display()))?;

    let entry = store
        .append(new, &catalog)
        .context("failed to add entry")?;

    writeln!(writer, "{entry}")?;
    Ok(())
}
