use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use zettel::cli::commands::Cli;
use zettel::cli::handlers;

fn main() {
    // Diagnostics go to stderr so stdout stays pipeable into a picker
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    if let Err(e) = handlers::dispatch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
