//! fuelbook-compare - Compare buying locally with shipping from the trade hub.
//!
//! # Usage
//!
//! ```bash
//! fuelbook-compare --items items.csv --remote prices/prices_jita.csv --local prices/prices_C-J6MT.csv
//! fuelbook-compare --shipping-per-m3 950 --format json
//! ```

use crate::cmd::completions::ShellType;
use crate::cmd::OutputFormat;
use crate::compare::{compare, latest_prices, read_prices, DEFAULT_SHIPPING_PER_M3};
use crate::report;
use anyhow::{Context, Result};
use clap::Parser;
use fuelbook_core::{Decimal, TableFormat};
use fuelbook_store::load_catalog;
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Compare local buy orders with remote buy orders net of freight.
#[derive(Parser, Debug)]
#[command(name = "fuelbook-compare")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Generate shell completions and exit
    #[arg(long, value_name = "SHELL", hide = true)]
    pub generate_completions: Option<ShellType>,

    /// Item catalog CSV with per-unit volumes
    #[arg(short, long, default_value = "items.csv")]
    pub items: PathBuf,

    /// Remote hub price table
    #[arg(short, long, default_value = "prices/prices_jita.csv")]
    pub remote: PathBuf,

    /// Local market price table
    #[arg(short, long, default_value = "prices/prices_C-J6MT.csv")]
    pub local: PathBuf,

    /// Freight rate per cubic metre
    #[arg(short, long, default_value_t = DEFAULT_SHIPPING_PER_M3)]
    pub shipping_per_m3: Decimal,

    /// Output format (text or json)
    #[arg(long, short = 'f', value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Show verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Main entry point for the compare command.
pub fn main() -> ExitCode {
    let args = Args::parse();

    if let Some(shell) = args.generate_completions {
        crate::cmd::completions::generate_completions::<Args>(shell, "fuelbook-compare");
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

fn load_prices(path: &Path) -> Result<BTreeMap<String, Decimal>> {
    let file = fs::File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let quotes =
        read_prices(file).with_context(|| format!("invalid price table {}", path.display()))?;
    tracing::debug!("read {} quotes from {}", quotes.len(), path.display());
    Ok(latest_prices(quotes))
}

/// Run the compare command.
pub fn run<W: Write>(args: &Args, writer: &mut W) -> Result<()> {
    let catalog = load_catalog(&args.items)
        .with_context(|| format!("failed to load item catalog {}", args.items.display()))?;
    let remote = load_prices(&args.remote)?;
    let local = load_prices(&args.local)?;

    let rows = compare(&catalog, &remote, &local, args.shipping_per_m3);

    match args.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, &rows)?;
            writeln!(writer)?;
        }
        OutputFormat::Text => {
            report::compare_table(&rows, &TableFormat::default()).render(writer)?;
        }
    }

    Ok(())
}
