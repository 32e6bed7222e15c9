//! One-shot job turning the raw fake/real CSVs into train/val/test JSONL files.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use checkmate::constants::{
    DEFAULT_FAKE_CSV, DEFAULT_MIN_TOKENS, DEFAULT_OUTPUT_DIR, DEFAULT_REAL_CSV, DEFAULT_SPLIT_SEED,
};
use checkmate::dataset::{self, DatasetConfig};

#[derive(Parser)]
#[command(name = "prepare-dataset", about = "Build stratified JSONL splits from labeled CSVs")]
struct Cli {
    /// CSV of fake headlines (needs a `title` column).
    #[arg(long, env = "CHECKMATE_FAKE_CSV", default_value = DEFAULT_FAKE_CSV)]
    fake_csv: PathBuf,

    /// CSV of real headlines (needs a `title` column).
    #[arg(long, env = "CHECKMATE_REAL_CSV", default_value = DEFAULT_REAL_CSV)]
    real_csv: PathBuf,

    /// Directory receiving train.jsonl, val.jsonl and test.jsonl.
    #[arg(long, env = "CHECKMATE_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    #[arg(long, default_value = "0.8")]
    train_ratio: f64,

    #[arg(long, default_value = "0.1")]
    val_ratio: f64,

    #[arg(long, default_value = "0.1")]
    test_ratio: f64,

    /// Drop titles with fewer whitespace-separated tokens.
    #[arg(long, default_value_t = DEFAULT_MIN_TOKENS)]
    min_tokens: usize,

    /// Shuffle seed.
    #[arg(long, default_value_t = DEFAULT_SPLIT_SEED)]
    seed: u64,

    /// Print the run report as JSON on stdout.
    #[arg(long)]
    json: bool,
}

impl From<Cli> for DatasetConfig {
    fn from(cli: Cli) -> Self {
        DatasetConfig {
            fake_csv: cli.fake_csv,
            real_csv: cli.real_csv,
            output_dir: cli.output_dir,
            train_ratio: cli.train_ratio,
            val_ratio: cli.val_ratio,
            test_ratio: cli.test_ratio,
            min_tokens: cli.min_tokens,
            seed: cli.seed,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json = cli.json;
    let config = DatasetConfig::from(cli);

    let report = dataset::prepare(&config).context("Dataset preparation failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "Dataset prepared: train={} val={} test={} -> {}",
            report.train.rows,
            report.val.rows,
            report.test.rows,
            config.output_dir.display()
        );
    }

    Ok(())
}
