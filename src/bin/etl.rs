//! careboard-etl - split the flat admissions file into a star schema.

use anyhow::{Context, Result};
use careboard::config::AppConfig;
use careboard::etl;
use clap::Parser;
use log::info;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(
    name = "careboard-etl",
    version,
    about = "Build dimension and fact tables from the admissions CSV"
)]
struct Args {
    /// Flat admissions CSV
    #[arg(long)]
    input: Option<PathBuf>,

    /// Directory the four output tables are written to
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = AppConfig::load(args.config.as_deref())?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.log_level.as_str()))
        .init();

    let input = args.input.unwrap_or(config.data_csv);
    let output_dir = args.output_dir.unwrap_or(config.etl_output_dir);

    let start = Instant::now();
    info!("Running ETL: {} -> {}", input.display(), output_dir.display());
    let schema = etl::run(&input, &output_dir)
        .with_context(|| format!("ETL failed for {}", input.display()))?;

    info!(
        "ETL finished in {:?}: {} patients, {} hospitals, {} diagnoses, {} admissions",
        start.elapsed(),
        schema.patients.len(),
        schema.hospitals.len(),
        schema.diagnoses.len(),
        schema.facts.height()
    );
    Ok(())
}
