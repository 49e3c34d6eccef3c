//! treecat - Concurrent directory-tree text concatenator
//!
//! Entry point for the CLI application.

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use std::process::ExitCode;
use treecat::config::{CliArgs, WalkConfig};
use treecat::progress::{print_header, print_summary};
use treecat::walker::TraversalDriver;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Usage errors exit 1 with the message on stderr; clap's default exit
    // path would use 2.
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{e}");
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprint!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: CliArgs) -> Result<()> {
    setup_logging(args.verbose)?;

    let config = WalkConfig::from_args(args).context("Invalid configuration")?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to create async runtime")?;

    if !config.quiet {
        print_header(&config);
    }

    let driver = TraversalDriver::new(config.clone());
    let result = runtime.block_on(driver.run()).context("Walk failed")?;

    if !config.quiet {
        print_summary(&config, &result);
    }

    if result.skipped > 0 {
        info!(skipped = result.skipped, "Walk completed with skipped entries");
    }

    Ok(())
}

fn setup_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("treecat=debug,warn")
    } else {
        EnvFilter::new("treecat=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}
