use clap::{Args, Parser, ValueEnum};
use std::fmt;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "review-rescore",
    version,
    about = "Blend spec, value and retailer review scores into a ranked product catalog"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(flatten)]
    pub rescore: RescoreCommand,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Band {
    Performance,
    Budget,
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Performance => f.write_str("performance"),
            Self::Budget => f.write_str("budget"),
        }
    }
}

#[derive(Args)]
pub struct RescoreCommand {
    /// Catalog segment being processed; used as a label only
    #[arg(long, value_enum)]
    pub band: Band,

    /// Input catalog (JSON array of products)
    #[arg(long = "json_in", visible_alias = "json-in")]
    pub json_in: PathBuf,

    /// Per-retailer review table (CSV with brand,model,retailer,rating,count)
    #[arg(long = "reviews_csv", visible_alias = "reviews-csv")]
    pub reviews_csv: PathBuf,

    /// Retailer weights and confidence settings (JSON, or TOML by extension)
    #[arg(long = "weights_json", visible_alias = "weights-json")]
    pub weights_json: PathBuf,

    /// Where to write the rescored catalog
    #[arg(long = "out_json", visible_alias = "out-json")]
    pub out_json: PathBuf,
}
