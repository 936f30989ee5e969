//! LDIF fixture generator CLI.
//!
//! This binary delegates to `ldif_generator::cli` for argument validation
//! and execution, keeping the behaviour testable without spawning a process.

use std::error::Error;
use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use ldif_generator::cli::{Cli, execute, success_message};
use tracing_subscriber::{EnvFilter, fmt};

/// Filter applied when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "info";

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match execute(&cli) {
        Ok(summary) => {
            write_success(&success_message(&summary));
            ExitCode::SUCCESS
        }
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    if let Err(err) = fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
    {
        drop(err);
    }
}

fn write_success(message: &str) {
    if let Err(err) = writeln!(io::stdout().lock(), "{message}") {
        drop(err);
    }
}

/// Writes the error and each underlying cause, outermost first.
fn report(err: &dyn Error) {
    let mut stderr = io::stderr().lock();
    if let Err(write_err) = writeln!(stderr, "error: {err}") {
        drop(write_err);
        return;
    }
    let mut cause = err.source();
    while let Some(inner) = cause {
        if let Err(write_err) = writeln!(stderr, "  caused by: {inner}") {
            drop(write_err);
            return;
        }
        cause = inner.source();
    }
}
