use std::process::ExitCode;

use clap::Parser;
use comprehend_cli::cli::{self, Cli};
use comprehend_cli::telemetry::init_tracing;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Cli::parse();
    if let Err(e) = init_tracing(args.log_format) {
        eprintln!("warning: {e:#}");
    }
    cli::run(args).await
}
