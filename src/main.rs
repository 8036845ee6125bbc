//! merge-pdf - Merge PDF files into a single document.

use clap::Parser;
use std::process;
use tracing_subscriber::EnvFilter;

use merge_pdf::Config;
use merge_pdf::cli::Cli;
use merge_pdf::output::OutputFormatter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = Config::try_from(&cli)
        .map_err(anyhow::Error::from)
        .and_then(|config| merge_pdf::run(&config));

    if let Err(err) = result {
        OutputFormatter::quiet().error(&format!("Error: {err:#}"));
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "merge_pdf=debug"
    } else {
        "merge_pdf=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
