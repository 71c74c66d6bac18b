//! fuelbook-add - Append a stock movement to the ledger.

fn main() -> std::process::ExitCode {
    fuelbook::cmd::add::main()
}
