//! fuelbook-compare - Compare buying locally with shipping from the trade hub.

fn main() -> std::process::ExitCode {
    fuelbook::cmd::compare_cmd::main()
}
