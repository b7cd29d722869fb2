mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "shamba",
    version,
    about = "Crop recommendation pipeline for district-level agri analytics"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline and print ranked crop recommendations
    Recommend {
        /// Path to a raw dataset JSON file
        dataset: PathBuf,

        /// Only show one district (case-insensitive)
        #[arg(short, long)]
        district: Option<String>,

        /// Only show one category, e.g. "Highly Recommended"
        #[arg(short, long)]
        category: Option<String>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write the full run (unfiltered) to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// Show the per-crop scoring reasons
        #[arg(long)]
        verbose: bool,
    },
    /// Clean and enrich the raw dataset without scoring
    Normalize {
        /// Path to a raw dataset JSON file
        dataset: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write the normalized records to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Inspect the built-in crop suitability rules
    Crops {
        #[command(subcommand)]
        action: CropsAction,
    },
}

#[derive(Subcommand)]
enum CropsAction {
    /// List the crops with dedicated weather ladders
    List,
    /// Explain how a named crop is scored
    Explain {
        /// Crop name as it appears in price data (e.g. "Maize")
        crop: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Recommend {
            dataset,
            district,
            category,
            output,
            out,
            verbose,
        } => commands::recommend::run(dataset, district, category, &output, out, verbose),
        Commands::Normalize {
            dataset,
            output,
            out,
        } => commands::normalize::run(dataset, &output, out),
        Commands::Crops { action } => match action {
            CropsAction::List => commands::crops::list(),
            CropsAction::Explain { crop } => commands::crops::explain(&crop),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
