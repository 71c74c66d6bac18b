//! fuelbook-production - Price a production plan against current stock.
//!
//! # Usage
//!
//! ```bash
//! fuelbook-production --ledger inventory.csv plans/ryc.json
//! fuelbook-production plans/anyed.json --format json
//! ```

use crate::cmd::completions::ShellType;
use crate::cmd::OutputFormat;
use crate::report;
use anyhow::{Context, Result};
use clap::Parser;
use fuelbook_booking::{sort_by_total_cost, ProductionCostRow, ProductionPlan};
use fuelbook_core::{LedgerEntry, TableFormat};
use fuelbook_store::{CsvLedger, LedgerStore};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Compute per-unit production costs from the current stock valuation.
#[derive(Parser, Debug)]
#[command(name = "fuelbook-production")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Generate shell completions and exit
    #[arg(long, value_name = "SHELL", hide = true)]
    pub generate_completions: Option<ShellType>,

    /// Ledger CSV file
    #[arg(short, long, default_value = "inventory.csv")]
    pub ledger: PathBuf,

    /// Production plan (JSON)
    #[arg(value_name = "PLAN", required_unless_present = "generate_completions")]
    pub plan: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(long, short = 'f', value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Print the per-unit material breakdown of every product
    #[arg(short, long)]
    pub breakdown: bool,

    /// Digits after the decimal point in text output
    #[arg(long, default_value_t = 2)]
    pub precision: u32,

    /// Show verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Main entry point for the production command.
pub fn main() -> ExitCode {
    let args = Args::parse();

    if let Some(shell) = args.generate_completions {
        crate::cmd::completions::generate_completions::<Args>(shell, "fuelbook-production");
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

/// Read a production plan from a JSON file.
pub fn load_plan(path: &Path) -> Result<ProductionPlan> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid production plan {}", path.display()))
}

/// Price `plan` against `entries`, most expensive product first.
pub fn cost_plan(plan: &ProductionPlan, entries: &[LedgerEntry]) -> Result<Vec<ProductionCostRow>> {
    let mut rows = plan.run(entries).with_context(|| {
        format!(
            "cannot cost production for {} ({})",
            plan.target, plan.method
        )
    })?;
    sort_by_total_cost(&mut rows);
    Ok(rows)
}

/// Run the production command.
pub fn run<W: Write>(args: &Args, writer: &mut W) -> Result<()> {
    let Some(plan_path) = &args.plan else {
        anyhow::bail!("no production plan given");
    };
    let plan = load_plan(plan_path)?;

    let store = LedgerStore::open(CsvLedger::new(&args.ledger))
        .with_context(|| format!("failed to open ledger {}", args.ledger.display()))?;
    let rows = cost_plan(&plan, store.entries())?;

    match args.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, &rows)?;
            writeln!(writer)?;
        }
        OutputFormat::Text => {
            let fmt = TableFormat::with_precision(args.precision);
            let title = format!(
                "{} Production Cost per Unit ({}, {} units per batch)",
                plan.target, plan.method, plan.unit_count
            );
            report::production_table(&title, &rows, &fmt).render(writer)?;

            if args.breakdown {
                for row in &rows {
                    writeln!(writer)?;
                    report::material_breakdown_table(row, &fmt).render(writer)?;
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fuelbook_core::{FeeSchedule, NaiveDate, NewEntry, OperationKind};
    use rust_decimal_macros::dec;

    const PLAN: &str = r#"{
        "target": "RYC",
        "method": "FIFO",
        "unit_count": 4,
        "usage": {
            "Helium Fuel Block": { "Helium Isotopes": 8, "Coolant": 2 },
            "Oxygen Fuel Block": { "Oxygen Isotopes": 8, "Coolant": 2 }
        },
        "job_costs": { "Helium Fuel Block": 40 },
        "blueprint_costs": { "Oxygen Fuel Block": 4 }
    }"#;

    fn entries() -> Vec<LedgerEntry> {
        let day = NaiveDate::from_ymd_opt(2025, 10, 3).unwrap();
        let fees = FeeSchedule::none();
        [("Helium Isotopes", dec!(500)), ("Oxygen Isotopes", dec!(700)), ("Coolant", dec!(100))]
            .into_iter()
            .enumerate()
            .map(|(i, (item, price))| {
                NewEntry::new(item, OperationKind::Incoming, dec!(1000), "Jita", price, "RYC")
                    .price(i as u64 + 1, day, dec!(0.1), &fees)
            })
            .collect()
    }

    #[test]
    fn test_cost_plan_sorted_by_total() {
        let plan: ProductionPlan = serde_json::from_str(PLAN).unwrap();
        let rows = cost_plan(&plan, &entries()).unwrap();

        assert_eq!(rows[0].product, "Oxygen Fuel Block");
        // 8 × 700 + 2 × 100 + 4
        assert_eq!(rows[0].total_cost, dec!(5804));
        assert_eq!(rows[0].unit_cost, dec!(1451));
        // 8 × 500 + 2 × 100 + 40
        assert_eq!(rows[1].total_cost, dec!(4240));
    }

    #[test]
    fn test_cost_plan_missing_material() {
        let plan: ProductionPlan = serde_json::from_str(PLAN).unwrap();
        let err = cost_plan(&plan, &entries()[..1]).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("cannot cost production for RYC"));
        assert!(message.contains("Coolant"));
    }

    #[test]
    fn test_run_text_report() {
        let dir = tempfile::tempdir().unwrap();
        let plan_path = dir.path().join("plan.json");
        let ledger_path = dir.path().join("inventory.csv");
        fs::write(&plan_path, PLAN).unwrap();
        fuelbook_store::csv_ledger::write_entries(fs::File::create(&ledger_path).unwrap(), &entries())
            .unwrap();

        let args = Args::try_parse_from([
            "fuelbook-production".to_string(),
            "--ledger".to_string(),
            ledger_path.display().to_string(),
            plan_path.display().to_string(),
            "--breakdown".to_string(),
        ])
        .unwrap();

        let mut out = Vec::new();
        run(&args, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("RYC Production Cost per Unit (FIFO, 4 units per batch)\n"));
        assert!(text.contains("5,804.00"));
        assert!(text.contains("Helium Fuel Block per unit"));
    }

    #[test]
    fn test_load_plan_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_plan(&path).unwrap_err();
        assert!(format!("{err:#}").contains("invalid production plan"));
        assert!(load_plan(&dir.path().join("missing.json")).is_err());
    }
}
