//! fuelbook-stock - Value the stock of one or more targets.

fn main() -> std::process::ExitCode {
    fuelbook::cmd::stock::main()
}
