//! CSV Data Loader Module
//! Handles CSV file loading and dataset assembly using Polars.

use crate::data::processor::{DataProcessor, ProcessorError};
use crate::data::schema::SOURCE_COLUMNS;
use crate::data::{Admission, DataSource, Dataset};
use crate::etl::{EtlError, StarSchema};
use log::{info, warn};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Invalid table: {0}")]
    Processor(#[from] ProcessorError),
    #[error("Failed to read star schema: {0}")]
    Star(#[source] Box<EtlError>),
}

/// Reads CSV tables and turns data sources into datasets.
pub struct DataLoader;

impl DataLoader {
    /// Read a CSV file with every column kept as text.
    ///
    /// Schema inference is disabled so values pass through unchanged; empty
    /// cells become nulls.
    pub fn read_csv(path: &Path) -> Result<DataFrame, LoaderError> {
        if !path.is_file() {
            return Err(LoaderError::NotFound(path.to_path_buf()));
        }

        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .finish()?
            .collect()?;
        Ok(df)
    }

    /// Read the flat admissions file and check it carries every source column.
    pub fn read_source(path: &Path) -> Result<DataFrame, LoaderError> {
        let df = Self::read_csv(path)?;
        DataProcessor::require_columns(&df, &SOURCE_COLUMNS)?;

        let extra = DataProcessor::extra_columns(&df, &SOURCE_COLUMNS);
        if !extra.is_empty() {
            warn!("{}: ignoring extra column(s) {:?}", path.display(), extra);
        }

        info!(
            "Loaded {}: {} rows, {} columns",
            path.display(),
            df.height(),
            df.width()
        );
        Ok(df)
    }

    /// Acquire the flat admissions table for a data source.
    pub fn load_frame(source: &DataSource) -> Result<DataFrame, LoaderError> {
        match source {
            DataSource::Flat { csv } => Self::read_source(csv),
            DataSource::Star { dir } => {
                let star = StarSchema::read(dir).map_err(|e| LoaderError::Star(Box::new(e)))?;
                let df = star
                    .reconstruct()
                    .map_err(|e| LoaderError::Star(Box::new(e)))?;
                info!(
                    "Reconstructed {} admissions from star schema in {}",
                    df.height(),
                    dir.display()
                );
                Ok(df)
            }
        }
    }

    /// Load a data source into typed records.
    pub fn load(source: &DataSource) -> Result<Dataset, LoaderError> {
        let df = Self::load_frame(source)?;
        let admissions = Admission::from_frame(&df)?;
        Ok(Dataset::new(admissions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn read_csv_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = DataLoader::read_csv(&dir.path().join("data.csv")).unwrap_err();
        assert!(matches!(err, LoaderError::NotFound(_)));
    }

    #[test]
    fn read_csv_keeps_text_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.csv");
        fs::write(&path, "a,b\n007,1.50\n,x\n").unwrap();

        let df = DataLoader::read_csv(&path).unwrap();
        let a = DataProcessor::text_values(&df, "a").unwrap();
        let b = DataProcessor::text_values(&df, "b").unwrap();
        assert_eq!(a, vec![Some("007".to_string()), None]);
        assert_eq!(b, vec![Some("1.50".to_string()), Some("x".to_string())]);
    }

    #[test]
    fn read_source_rejects_missing_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        fs::write(&path, "patient_id,admission_id\n1,2\n").unwrap();

        let err = DataLoader::read_source(&path).unwrap_err();
        assert!(matches!(
            err,
            LoaderError::Processor(ProcessorError::MissingColumn(ref c)) if c == "Hospital"
        ));
    }
}
