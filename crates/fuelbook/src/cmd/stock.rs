//! fuelbook-stock - Value the stock of one or more targets.
//!
//! # Usage
//!
//! ```bash
//! fuelbook-stock --ledger inventory.csv RYC Anyed
//! fuelbook-stock --ledger inventory.csv RYC --method average --format json
//! fuelbook-stock --strict
//! ```

use crate::cmd::completions::ShellType;
use crate::cmd::OutputFormat;
use crate::report;
use anyhow::{Context, Result};
use clap::Parser;
use fuelbook_booking::valuate_with;
use fuelbook_core::{CostingMethod, LedgerEntry, OverdrawPolicy, StockPosition, TableFormat};
use fuelbook_store::{CsvLedger, LedgerStore};
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Value the remaining stock of each target.
#[derive(Parser, Debug)]
#[command(name = "fuelbook-stock")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Generate shell completions and exit
    #[arg(long, value_name = "SHELL", hide = true)]
    pub generate_completions: Option<ShellType>,

    /// Ledger CSV file
    #[arg(short, long, default_value = "inventory.csv")]
    pub ledger: PathBuf,

    /// Targets to report (all targets in the ledger when omitted)
    #[arg(value_name = "TARGET")]
    pub targets: Vec<String>,

    /// Costing method: fifo, lifo or average
    #[arg(short, long, default_value = "fifo")]
    pub method: CostingMethod,

    /// Fail when outgoing movements exceed the stock instead of clamping
    #[arg(long)]
    pub strict: bool,

    /// Output format (text or json)
    #[arg(long, short = 'f', value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Digits after the decimal point in text output
    #[arg(long, default_value_t = 2)]
    pub precision: u32,

    /// Show verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Valuation of one target.
#[derive(Debug, Serialize)]
pub struct StockReport {
    /// Target valued.
    pub target: String,
    /// Costing method used.
    pub method: CostingMethod,
    /// One position per material.
    pub positions: Vec<StockPosition>,
}

/// Main entry point for the stock command.
pub fn main() -> ExitCode {
    let args = Args::parse();

    if let Some(shell) = args.generate_completions {
        crate::cmd::completions::generate_completions::<Args>(shell, "fuelbook-stock");
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

/// Value the requested targets of `entries`.
pub fn build_reports(
    entries: &[LedgerEntry],
    targets: &[String],
    method: CostingMethod,
    policy: OverdrawPolicy,
) -> Result<Vec<StockReport>> {
    let targets: Vec<String> = if targets.is_empty() {
        let mut all: Vec<String> = entries.iter().map(|e| e.target.clone()).collect();
        all.sort();
        all.dedup();
        all
    } else {
        targets.to_vec()
    };

    targets
        .into_iter()
        .map(|target| -> Result<StockReport> {
            let positions = valuate_with(entries, &target, method, policy)
                .with_context(|| format!("cannot value stock of {target}"))?;
            Ok(StockReport {
                target,
                method,
                positions,
            })
        })
        .collect()
}

/// Run the stock command.
pub fn run<W: Write>(args: &Args, writer: &mut W) -> Result<()> {
    let store = LedgerStore::open(CsvLedger::new(&args.ledger))
        .with_context(|| format!("failed to open ledger {}", args.ledger.display()))?;

    let policy = if args.strict {
        OverdrawPolicy::Strict
    } else {
        OverdrawPolicy::Clamp
    };
    let reports = build_reports(store.entries(), &args.targets, args.method, policy)?;

    match args.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, &reports)?;
            writeln!(writer)?;
        }
        OutputFormat::Text => {
            let fmt = TableFormat::with_precision(args.precision);
            if reports.is_empty() {
                writeln!(writer, "Ledger {} is empty.", args.ledger.display())?;
            }
            for (i, report) in reports.iter().enumerate() {
                if i > 0 {
                    writeln!(writer)?;
                }
                report::stock_table(&report.target, report.method, &report.positions, &fmt)
                    .render(writer)?;
            }
        }
    }

    Ok(())
}
