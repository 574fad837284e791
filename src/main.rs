use anyhow::{Context, Result};
use clap::Parser;
use rowshuffle::{ShuffleConfig, ShuffleSummary};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "rowshuffle")]
#[command(about = "Masks access patterns to data by shuffling the rows of a CSV file")]
struct Cli {
    /// Path to the input CSV file (`.gz` is decompressed)
    input_file: PathBuf,

    /// Path to the output CSV file (`.gz` is compressed)
    output_file: PathBuf,

    /// Random seed for reproducible shuffling, any 64-bit signed integer
    /// (-9223372036854775808 to 9223372036854775807)
    #[arg(long, allow_negative_numbers = true)]
    seed: Option<i64>,

    /// The first line of the input is a header; keep it first in the output
    #[arg(long)]
    header: bool,

    /// Field delimiter, a single ASCII character (`\t` for tab)
    #[arg(long, default_value = ",")]
    delimiter: String,
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<ShuffleSummary> {
    let config = ShuffleConfig::new(
        cli.input_file,
        cli.output_file,
        cli.seed,
        cli.header,
        &cli.delimiter,
    )?;

    let summary = rowshuffle::shuffle_file(&config)
        .await
        .with_context(|| format!("shuffling {}", config.input.display()))?;
    Ok(summary)
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_logging();

    match run(cli).await {
        Ok(summary) => {
            info!(
                rows = summary.rows,
                header = summary.header_written,
                "wrote {}",
                summary.output.display()
            );
        }
        Err(e) => {
            error!("Failed to mask data access patterns: {:#}", e);
            std::process::exit(1);
        }
    }
}
