//! fuelbook-production - Price a production plan against current stock.

fn main() -> std::process::ExitCode {
    fuelbook::cmd::production::main()
}
