//! # Inkboard
//!
//! Command-line entry point.

use clap::Parser;
use inkboard_cli::{commands, CliArgs};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize structured tracing with optional JSON format.
///
/// Set `RUST_LOG` to control log levels (default:
/// info,inkboard=debug,inkboard_core=debug,inkboard_renderer=debug).
/// Set `RUST_LOG_FORMAT=json` for JSON output. Logs go to stderr so command
/// output on stdout stays clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info,inkboard=debug,inkboard_core=debug,inkboard_renderer=debug")
    });

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = CliArgs::parse();
    tracing::debug!(command = ?args.command, "Starting");

    let output = commands::run(&args).await?;
    print!("{output}");
    Ok(())
}
