mod engine;
mod import;
mod ledger;
mod models;
mod run;
mod ui;
mod util;

use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    let (args, verbose): (Vec<String>, Vec<String>) = std::env::args()
        .partition(|a| a != "--verbose" && a != "-v");
    init_tracing(!verbose.is_empty());

    match args.len() {
        1 => run::as_tui(ledger::Ledger::new()),
        2.. => run::as_cli(&args),
        _ => {
            eprintln!("Usage: smartbudget [command]");
            Ok(())
        }
    }
}

/// `RUST_LOG` wins; otherwise `--verbose` turns on debug output.
/// Logs go to stderr so they stay out of the TUI and CLI output.
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("smartbudget=debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}
