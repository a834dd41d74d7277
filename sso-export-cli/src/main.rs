mod cli;

use std::{io, process};

use clap::Parser;
use sso_export::{AppConfig, Error, Result, export_credentials};
use tracing::{Level, error};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use crate::cli::Args;

fn main() {
    let args = Args::parse();

    if let Err(e) = init_logging(args.verbose, args.quiet) {
        eprintln!("Error: {}", e);
    }

    process::exit(run(args));
}

fn run(args: Args) -> i32 {
    let config = match AppConfig::resolve(args.cache_dir) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return 1;
        }
    };

    let mut stdout = io::stdout().lock();
    match export_credentials(&config.cache_dir, &config.refresh, &mut stdout) {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            error!("{}", e);
            1
        }
    }
}

/// Log to stderr so stdout stays safe to `eval`.
fn init_logging(verbose: bool, quiet: bool) -> Result<()> {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::builder()
            .with_default_directive(Level::INFO.into())
            .from_env_lossy()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .with_level(verbose),
        )
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))
}
