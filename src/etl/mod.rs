//! ETL module - flat admissions CSV to star schema

mod dimension;
mod star;

pub use dimension::{
    Dimension, DimensionRow, DimensionSpec, NaturalKey, DIAGNOSIS_DIMENSION, HOSPITAL_DIMENSION,
    PATIENT_DIMENSION,
};
pub use star::{StarSchema, FACT_FILE};

use crate::data::{DataLoader, LoaderError, ProcessorError};
use log::info;
use polars::prelude::PolarsError;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Load(#[from] LoaderError),
    #[error(transparent)]
    Processor(#[from] ProcessorError),
    #[error("{table}: invalid surrogate key {value:?}")]
    InvalidKey { table: &'static str, value: String },
    #[error("{table}: no row for surrogate key {key}")]
    UnknownKey { table: &'static str, key: u32 },
}

/// Read `input`, build the star schema and write it under `output_dir`.
///
/// Any failure aborts the run; tables already written stay on disk.
pub fn run(input: &Path, output_dir: &Path) -> Result<StarSchema, EtlError> {
    info!("Reading source {}", input.display());
    let source = DataLoader::read_source(input)?;

    let star = StarSchema::build(&source)?;
    info!(
        "Built star schema: {} patients, {} hospitals, {} diagnoses, {} admissions",
        star.patients.len(),
        star.hospitals.len(),
        star.diagnoses.len(),
        star.facts.height()
    );

    star.write(output_dir)?;
    info!("ETL complete, outputs in {}", output_dir.display());
    Ok(star)
}
