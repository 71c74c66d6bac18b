//! Command implementations for CLI tools.
//!
//! Each module contains the full implementation for a command,
//! which can be invoked by thin wrapper binaries.

pub mod add;
pub mod compare_cmd;
pub mod completions;
pub mod production;
pub mod stock;

use clap::ValueEnum;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

/// Output format for reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table (default)
    #[default]
    Text,
    /// JSON for scripts
    Json,
}

/// Install the tracing subscriber for a command.
///
/// `--verbose` turns on debug output with span timings; otherwise `RUST_LOG`
/// is honoured and only warnings are shown by default.
pub fn init_tracing(verbose: bool) {
    if verbose {
        tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_span_events(FmtSpan::CLOSE)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}
