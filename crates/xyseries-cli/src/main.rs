mod cli;
mod config;
mod error;
mod logging;
mod utils;

use crate::cli::Cli;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use clap::{CommandFactory, Parser};
use tracing::{debug, error, info};
use xyseries::engine::progress::ProgressReporter;
use xyseries::workflows;

const FAILURE_EXIT_CODE: i32 = -1;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { FAILURE_EXIT_CODE } else { 0 };
            if e.print().is_err() {
                eprintln!("{}", e);
            }
            std::process::exit(code);
        }
    };

    if let Err(e) = run_app(cli) {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(FAILURE_EXIT_CODE);
    }
}

fn run_app(cli: Cli) -> Result<()> {
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone())?;
    info!("xyhist v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    if cli.input.is_none() {
        eprintln!("{}", Cli::command().render_usage());
        return Err(CliError::Argument("No input file given!".to_string()));
    }

    let app_config = config::build_config(&cli)?;
    if let Some(source) = &app_config.source {
        info!("Configuration loaded from {:?}.", source);
    }
    let hist_config = &app_config.core_config;
    println!("Making histogram with {} bins...", hist_config.bins);

    let handler = CliProgressHandler::new();
    let reporter = if cli.quiet {
        ProgressReporter::new()
    } else {
        ProgressReporter::with_callback(handler.callback())
    };

    let report = workflows::histogram::run(hist_config, &reporter).map_err(|e| {
        error!("❌ Histogram failed: {}", e);
        CliError::from(e)
    })?;

    println!("{}\tvalues have been read.", report.samples);
    println!("min value: {}\tmax value: {}", report.min, report.max);
    if report.skipped > 0 {
        println!("{}\tvalues fell outside the bins.", report.skipped);
    }
    info!(
        "✅ Wrote {} bins to {:?}.",
        report.written, report.output_path
    );
    println!("success.");
    Ok(())
}
