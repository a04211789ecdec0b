//! mdorphan CLI

use clap::Parser;
use mdorphan::Args;
use tracing_subscriber::EnvFilter;

fn main() {
    // Parse command-line arguments
    let args = Args::parse();

    // Diagnostics go to stderr; stdout carries only the report
    let default_level = if args.verbose == Some(true) { "info" } else { "warn" };
    let filter = EnvFilter::try_from_env("MDORPHAN_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    log::debug!("mdorphan v{}", env!("CARGO_PKG_VERSION"));

    let code = mdorphan::run(&args, &mut std::io::stdout(), &mut std::io::stderr());
    std::process::exit(code);
}
