// src/main.rs
mod converter;
mod extractors;
mod statement;
mod storage;
mod utils;

use clap::Parser;
use converter::{ConvertConfig, Converter};
use extractors::StatementLineExtractor;
use statement::source::PdfExtractSource;
use std::path::PathBuf;
use utils::AppError;

/// Command Line Interface for the Wells Fargo statement converter
#[derive(Parser, Debug)]
#[command(author, version, about = "Convert Wells Fargo PDF statements to CSV", long_about = None)]
struct Args {
    /// Folder containing PDF statements
    #[arg(long = "input_folder", visible_alias = "input-folder")]
    input_folder: PathBuf,

    /// Output CSV file path
    #[arg(long = "output_file", visible_alias = "output-file")]
    output_file: PathBuf,

    /// Year for month/day rows (default: taken from each statement's period)
    #[arg(long, env = "STATEMENT_YEAR")]
    year: Option<i32>,

    /// Sort all transactions by date instead of keeping file order
    #[arg(long)]
    sort_by_date: bool,

    /// Write a JSON run summary (counts, skipped lines, warnings) to this path
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Debug mode - save annotated statement text next to the output and log at debug level
    #[arg(short, long)]
    debug: bool,
}

impl TryFrom<Args> for ConvertConfig {
    type Error = AppError;

    fn try_from(args: Args) -> Result<Self, AppError> {
        if let Some(year) = args.year {
            if !(1900..=2999).contains(&year) {
                return Err(AppError::Config(format!("Year {} is out of range", year)));
            }
        }
        Ok(ConvertConfig {
            year: args.year,
            sort_by_date: args.sort_by_date,
            summary_file: args.summary,
            debug: args.debug,
            ..ConvertConfig::new(args.input_folder, args.output_file)
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Parse CLI Arguments
    let args = Args::parse();

    // 2. Setup Logging (reads RUST_LOG env var, --debug raises the default level)
    utils::logging::setup_logging(args.debug);
    tracing::info!("Starting conversion for args: {:?}", args);
    let config = ConvertConfig::try_from(args)?;

    // 3. Build the extractor once; every statement shares it
    let extractor = StatementLineExtractor::new()?;

    // 4. Convert the folder
    let converter = Converter::new(PdfExtractSource, extractor, config);
    let summary = converter.run().await?;

    tracing::info!(
        "Wrote {} transactions to {}",
        summary.total_records,
        summary.output_file.display()
    );
    Ok(())
}
