//! Careboard - hospital admissions dashboard.

use anyhow::{anyhow, Result};
use careboard::config::{AppConfig, SourceKind};
use careboard::gui::{CareboardApp, Route};
use clap::Parser;
use eframe::egui;
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "careboard", version, about = "Hospital admissions dashboard")]
struct Args {
    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Read the flat admissions file or the ETL outputs
    #[arg(long, value_enum)]
    source: Option<SourceKind>,

    /// Flat admissions CSV
    #[arg(long)]
    data: Option<PathBuf>,

    /// Directory holding the ETL outputs
    #[arg(long)]
    etl_dir: Option<PathBuf>,

    /// Page to open, e.g. `hospitals` or `patient?patient_id=10023`
    #[arg(long, default_value = "home")]
    route: Route,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(source) = args.source {
        config.source = source;
    }
    if let Some(data) = args.data {
        config.data_csv = data;
    }
    if let Some(dir) = args.etl_dir {
        config.etl_output_dir = dir;
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.log_level.as_str()))
        .init();
    config.log_summary();

    let source = config.data_source();
    let route = args.route;
    info!("Opening {route} on {source}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Careboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Careboard",
        options,
        Box::new(move |cc| Ok(Box::new(CareboardApp::new(cc, source, route)))),
    )
    .map_err(|e| anyhow!("Dashboard window failed: {e}"))
}
