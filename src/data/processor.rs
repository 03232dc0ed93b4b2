//! Data Processor Module
//! Column extraction and numeric coercion over text-typed DataFrames.

use log::debug;
use polars::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Missing required column: {0}")]
    MissingColumn(String),
}

/// Stateless helpers shared by the loader, the ETL and the record builder.
pub struct DataProcessor;

impl DataProcessor {
    /// Fail on the first column of `required` that the frame lacks.
    pub fn require_columns(df: &DataFrame, required: &[&str]) -> Result<(), ProcessorError> {
        match required.iter().find(|name| df.column(name).is_err()) {
            Some(missing) => Err(ProcessorError::MissingColumn(missing.to_string())),
            None => Ok(()),
        }
    }

    /// Columns present in the frame but not named in `known`.
    pub fn extra_columns(df: &DataFrame, known: &[&str]) -> Vec<String> {
        df.get_column_names()
            .iter()
            .map(|s| s.to_string())
            .filter(|name| !known.contains(&name.as_str()))
            .collect()
    }

    /// Values of a column rendered as text, nulls preserved.
    pub fn text_values(df: &DataFrame, column: &str) -> Result<Vec<Option<String>>, ProcessorError> {
        let as_text = df.column(column)?.cast(&DataType::String)?;
        let values = as_text
            .str()?
            .into_iter()
            .map(|v| v.map(|s| s.to_string()))
            .collect();
        Ok(values)
    }

    /// Numeric view of a column.
    ///
    /// Surrounding whitespace is ignored. Uses a non-strict cast, so text
    /// that does not parse becomes null instead of failing the load. NaN and
    /// infinities are treated as missing as well.
    pub fn numeric_values(df: &DataFrame, column: &str) -> Result<Vec<Option<f64>>, ProcessorError> {
        let source = df.column(column)?;
        let present = source.len() - source.null_count();

        let as_text = source.cast(&DataType::String)?;
        let trimmed: StringChunked = as_text
            .str()?
            .into_iter()
            .map(|v| v.map(str::trim))
            .collect();
        let value_f64 = trimmed.into_series().cast(&DataType::Float64)?;
        let values: Vec<Option<f64>> = value_f64
            .f64()?
            .into_iter()
            .map(|v| v.filter(|x| x.is_finite()))
            .collect();

        let coerced = values.iter().filter(|v| v.is_some()).count();
        if coerced < present {
            debug!(
                "{}: {} non-numeric value(s) treated as missing",
                column,
                present - coerced
            );
        }
        Ok(values)
    }

    /// Text value trimmed, with empty strings collapsed to `None`.
    pub fn non_empty(value: Option<String>) -> Option<String> {
        value.and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }
}
