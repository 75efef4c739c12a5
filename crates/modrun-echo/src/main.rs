//! modrun-echo entry point.
//!
//! Usage:
//!   modrun-echo <params-file>    # JSON object of module parameters

use std::process::ExitCode;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use modrun_echo::Echo;
use modrun_harness::exec_module;

fn main() -> ExitCode {
    // Initialize tracing (respects RUST_LOG env var). Diagnostics go to
    // stderr; stdout carries the single JSON result object.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    exec_module(&Echo)
}
