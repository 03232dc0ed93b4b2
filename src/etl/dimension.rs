//! Dimension tables with positional surrogate keys.

use super::EtlError;
use crate::data::schema::*;
use crate::data::DataProcessor;
use polars::prelude::*;
use std::collections::HashMap;

/// A natural-key tuple. Nulls compare equal to each other.
pub type NaturalKey = Vec<Option<String>>;

/// Static description of one dimension table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DimensionSpec {
    pub file_name: &'static str,
    pub natural_key: &'static [&'static str],
    pub surrogate_key: &'static str,
}

pub const PATIENT_DIMENSION: DimensionSpec = DimensionSpec {
    file_name: "dim_patient.csv",
    natural_key: &PATIENT_NATURAL_KEY,
    surrogate_key: PATIENT_KEY,
};

pub const HOSPITAL_DIMENSION: DimensionSpec = DimensionSpec {
    file_name: "dim_hospital.csv",
    natural_key: &HOSPITAL_NATURAL_KEY,
    surrogate_key: HOSPITAL_KEY,
};

pub const DIAGNOSIS_DIMENSION: DimensionSpec = DimensionSpec {
    file_name: "dim_diagnosis.csv",
    natural_key: &DIAGNOSIS_NATURAL_KEY,
    surrogate_key: DIAGNOSIS_KEY,
};

#[derive(Debug, Clone, PartialEq)]
pub struct DimensionRow {
    pub key: u32,
    pub natural: NaturalKey,
}

/// Distinct natural-key tuples of a table, each with a surrogate key.
#[derive(Debug, Clone)]
pub struct Dimension {
    spec: DimensionSpec,
    rows: Vec<DimensionRow>,
    by_natural: HashMap<NaturalKey, u32>,
    by_key: HashMap<u32, usize>,
}

impl Dimension {
    fn empty(spec: DimensionSpec) -> Self {
        Self {
            spec,
            rows: Vec::new(),
            by_natural: HashMap::new(),
            by_key: HashMap::new(),
        }
    }

    fn push(&mut self, key: u32, natural: NaturalKey) {
        self.by_natural.insert(natural.clone(), key);
        self.by_key.insert(key, self.rows.len());
        self.rows.push(DimensionRow { key, natural });
    }

    /// Deduplicate the natural-key columns of `source`, keeping first-occurrence
    /// order, and number the survivors from 1.
    pub fn build(source: &DataFrame, spec: DimensionSpec) -> Result<Self, EtlError> {
        let mut dimension = Self::empty(spec);
        for tuple in natural_keys(source, spec.natural_key)? {
            if !dimension.by_natural.contains_key(&tuple) {
                let key = dimension.rows.len() as u32 + 1;
                dimension.push(key, tuple);
            }
        }
        Ok(dimension)
    }

    /// Rebuild a dimension from a previously written table.
    pub fn from_frame(df: &DataFrame, spec: DimensionSpec) -> Result<Self, EtlError> {
        let keys = parse_keys(df, spec.surrogate_key, spec.file_name)?;
        let tuples = natural_keys(df, spec.natural_key)?;

        let mut dimension = Self::empty(spec);
        for (key, tuple) in keys.into_iter().zip(tuples) {
            let key = key.ok_or_else(|| EtlError::InvalidKey {
                table: spec.file_name,
                value: String::new(),
            })?;
            dimension.push(key, tuple);
        }
        Ok(dimension)
    }

    pub fn spec(&self) -> &DimensionSpec {
        &self.spec
    }

    pub fn rows(&self) -> &[DimensionRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn key_of(&self, natural: &[Option<String>]) -> Option<u32> {
        self.by_natural.get(natural).copied()
    }

    pub fn natural_key(&self, key: u32) -> Option<&[Option<String>]> {
        self.by_key
            .get(&key)
            .map(|&idx| self.rows[idx].natural.as_slice())
    }

    /// Left join of `source` against this dimension on the natural key.
    ///
    /// Returns one entry per source row; rows without a matching tuple get
    /// `None` rather than being dropped.
    pub fn lookup_keys(&self, source: &DataFrame) -> Result<Vec<Option<u32>>, EtlError> {
        Ok(natural_keys(source, self.spec.natural_key)?
            .iter()
            .map(|tuple| self.key_of(tuple))
            .collect())
    }

    /// Natural-key columns followed by the surrogate key column.
    pub fn to_frame(&self) -> Result<DataFrame, EtlError> {
        let mut columns: Vec<Column> = self
            .spec
            .natural_key
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let values: Vec<Option<String>> =
                    self.rows.iter().map(|row| row.natural[i].clone()).collect();
                Column::new((*name).into(), values)
            })
            .collect();

        let keys: Vec<u32> = self.rows.iter().map(|row| row.key).collect();
        columns.push(Column::new(self.spec.surrogate_key.into(), keys));

        Ok(DataFrame::new(columns)?)
    }
}

/// Row-wise tuples over `columns`, in table order.
pub fn natural_keys(df: &DataFrame, columns: &[&str]) -> Result<Vec<NaturalKey>, EtlError> {
    DataProcessor::require_columns(df, columns)?;

    let mut tuples: Vec<NaturalKey> = vec![Vec::with_capacity(columns.len()); df.height()];
    for column in columns {
        for (tuple, value) in tuples
            .iter_mut()
            .zip(DataProcessor::text_values(df, column)?)
        {
            tuple.push(value);
        }
    }
    Ok(tuples)
}

/// Parse a surrogate key column; null cells stay `None`.
pub fn parse_keys(
    df: &DataFrame,
    column: &str,
    table: &'static str,
) -> Result<Vec<Option<u32>>, EtlError> {
    DataProcessor::require_columns(df, &[column])?;

    DataProcessor::text_values(df, column)?
        .into_iter()
        .map(|value| match DataProcessor::non_empty(value) {
            None => Ok(None),
            Some(text) => text
                .parse::<u32>()
                .map(Some)
                .map_err(|_| EtlError::InvalidKey { table, value: text }),
        })
        .collect()
}
