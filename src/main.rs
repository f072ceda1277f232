mod catalog;
mod cli;
mod config;
mod error;
mod report;
mod reviews;
mod score;
mod types;

use crate::error::RescoreError;
use crate::report::RunSummary;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_logging(cli: &cli::Cli) {
    let level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads every input before the output file is created; any failure aborts
/// the run with nothing written.
fn rescore(cmd: &cli::RescoreCommand) -> Result<RunSummary, RescoreError> {
    let weights = config::load_weights(&cmd.weights_json)?;
    let reviews = reviews::load_reviews(&cmd.reviews_csv)?;
    let mut items = catalog::load_catalog(&cmd.json_in)?;

    let rows_dropped = reviews.rows_dropped;
    let groups = score::aggregate::group_by_product(reviews.rows);
    let review_scores =
        score::aggregate::review_scores(&groups, &weights.weights, &weights.confidence);
    info!(band = %cmd.band, groups = groups.len(), "computed review scores");

    catalog::update_catalog(&mut items, &review_scores);
    let summary = RunSummary::new(cmd.band, &items, groups.len(), rows_dropped, &cmd.out_json);
    catalog::write_catalog(&cmd.out_json, items)?;
    Ok(summary)
}

fn run(cli: &cli::Cli) -> Result<i32, RescoreError> {
    let summary = rescore(&cli.rescore)?;
    if !cli.quiet {
        println!("{}", summary.to_text());
    }
    Ok(exit_code::SUCCESS)
}

fn main() {
    let cli = cli::Cli::parse();
    init_logging(&cli);
    match run(&cli) {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
