//! Star schema: three dimensions and the admissions fact table.

use super::dimension::{
    parse_keys, Dimension, DIAGNOSIS_DIMENSION, HOSPITAL_DIMENSION, PATIENT_DIMENSION,
};
use super::EtlError;
use crate::data::schema::*;
use crate::data::{DataLoader, DataProcessor};
use log::info;
use polars::prelude::*;
use std::collections::HashMap;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

pub const FACT_FILE: &str = "fact_admissions.csv";

/// The four ETL outputs held in memory.
#[derive(Debug, Clone)]
pub struct StarSchema {
    pub patients: Dimension,
    pub hospitals: Dimension,
    pub diagnoses: Dimension,
    pub facts: DataFrame,
}

impl StarSchema {
    /// Derive all four tables from a flat admissions frame.
    pub fn build(source: &DataFrame) -> Result<Self, EtlError> {
        DataProcessor::require_columns(source, &SOURCE_COLUMNS)?;

        let patients = Dimension::build(source, PATIENT_DIMENSION)?;
        let hospitals = Dimension::build(source, HOSPITAL_DIMENSION)?;
        let diagnoses = Dimension::build(source, DIAGNOSIS_DIMENSION)?;

        let mut columns: Vec<Column> = Vec::with_capacity(FACT_COLUMNS.len());
        columns.push(Column::new(
            ADMISSION_ID.into(),
            DataProcessor::text_values(source, ADMISSION_ID)?,
        ));
        for dimension in [&patients, &hospitals, &diagnoses] {
            columns.push(Column::new(
                dimension.spec().surrogate_key.into(),
                dimension.lookup_keys(source)?,
            ));
        }
        for measure in FACT_MEASURES {
            columns.push(Column::new(
                measure.into(),
                DataProcessor::text_values(source, measure)?,
            ));
        }
        let facts = DataFrame::new(columns)?;

        Ok(Self {
            patients,
            hospitals,
            diagnoses,
            facts,
        })
    }

    fn dimensions(&self) -> [&Dimension; 3] {
        [&self.patients, &self.hospitals, &self.diagnoses]
    }

    /// Write every table into `dir`, creating it if needed.
    ///
    /// Returns the written paths in write order.
    pub fn write(&self, dir: &Path) -> Result<Vec<PathBuf>, EtlError> {
        fs::create_dir_all(dir)?;

        let mut written = Vec::with_capacity(4);
        for dimension in self.dimensions() {
            let path = dir.join(dimension.spec().file_name);
            write_csv(&mut dimension.to_frame()?, &path)?;
            info!("Saved {} ({} rows)", dimension.spec().file_name, dimension.len());
            written.push(path);
        }

        let path = dir.join(FACT_FILE);
        write_csv(&mut self.facts.clone(), &path)?;
        info!("Saved {} ({} rows)", FACT_FILE, self.facts.height());
        written.push(path);

        Ok(written)
    }

    /// Files a star schema in `dir` consists of.
    pub fn files(dir: &Path) -> [PathBuf; 4] {
        [
            dir.join(PATIENT_DIMENSION.file_name),
            dir.join(HOSPITAL_DIMENSION.file_name),
            dir.join(DIAGNOSIS_DIMENSION.file_name),
            dir.join(FACT_FILE),
        ]
    }

    /// Read back the four tables written by [`StarSchema::write`].
    pub fn read(dir: &Path) -> Result<Self, EtlError> {
        let [patient_path, hospital_path, diagnosis_path, fact_path] = Self::files(dir);

        let patients = Dimension::from_frame(&DataLoader::read_csv(&patient_path)?, PATIENT_DIMENSION)?;
        let hospitals =
            Dimension::from_frame(&DataLoader::read_csv(&hospital_path)?, HOSPITAL_DIMENSION)?;
        let diagnoses =
            Dimension::from_frame(&DataLoader::read_csv(&diagnosis_path)?, DIAGNOSIS_DIMENSION)?;

        let facts = DataLoader::read_csv(&fact_path)?;
        DataProcessor::require_columns(&facts, &FACT_COLUMNS)?;

        Ok(Self {
            patients,
            hospitals,
            diagnoses,
            facts,
        })
    }

    /// Join the fact table back to its dimensions and project the flat
    /// source columns, in source column order and fact row order.
    ///
    /// A null surrogate key yields nulls for that dimension's columns; a key
    /// that names no dimension row is an error.
    pub fn reconstruct(&self) -> Result<DataFrame, EtlError> {
        let height = self.facts.height();
        let mut values: HashMap<&str, Vec<Option<String>>> = HashMap::new();

        values.insert(ADMISSION_ID, DataProcessor::text_values(&self.facts, ADMISSION_ID)?);
        for measure in FACT_MEASURES {
            values.insert(measure, DataProcessor::text_values(&self.facts, measure)?);
        }

        for dimension in self.dimensions() {
            let spec = dimension.spec();
            let width = spec.natural_key.len();
            let keys = parse_keys(&self.facts, spec.surrogate_key, FACT_FILE)?;

            let mut natural: Vec<Vec<Option<String>>> = vec![Vec::with_capacity(height); width];
            for key in keys {
                let tuple = match key {
                    Some(key) => dimension
                        .natural_key(key)
                        .ok_or(EtlError::UnknownKey {
                            table: spec.file_name,
                            key,
                        })?
                        .to_vec(),
                    None => vec![None; width],
                };
                for (column, value) in natural.iter_mut().zip(tuple) {
                    column.push(value);
                }
            }

            for (name, column) in spec.natural_key.iter().zip(natural) {
                values.insert(*name, column);
            }
        }

        let columns: Vec<Column> = SOURCE_COLUMNS
            .iter()
            .map(|name| {
                let column = values.remove(name).unwrap_or_else(|| vec![None; height]);
                Column::new((*name).into(), column)
            })
            .collect();

        Ok(DataFrame::new(columns)?)
    }
}

fn write_csv(df: &mut DataFrame, path: &Path) -> Result<(), EtlError> {
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(b',')
        .finish(df)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> DataFrame {
        let rows: [[&str; 21]; 3] = [
            [
                "1", "A1", "General", "M", "70", "WHITE", "I10", "10", "Hypertension",
                "EMERGENCY", "ER", "HOME", "2020-01-01", "2020-01-05", "4", "2", "0", "3", "3",
                "0", "6",
            ],
            [
                "2", "A2", "North", "F", "55", "ASIAN", "E11", "10", "Diabetes", "ELECTIVE",
                "CLINIC", "HOME", "2020-02-01", "2020-02-03", "2", "1", "1", "1", "0", "1", "2",
            ],
            [
                "1", "A3", "General", "M", "70", "WHITE", "E11", "10", "Diabetes", "URGENT",
                "ER", "SNF", "2020-03-01", "2020-03-11", "10", "2", "2", "5", "3", "2", "10",
            ],
        ];
        let columns: Vec<Column> = SOURCE_COLUMNS
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let values: Vec<&str> = rows.iter().map(|row| row[i]).collect();
                Column::new((*name).into(), values)
            })
            .collect();
        DataFrame::new(columns).unwrap()
    }

    #[test]
    fn build_derives_dimensions_and_facts() {
        let star = StarSchema::build(&source()).unwrap();
        assert_eq!(star.patients.len(), 2);
        assert_eq!(star.hospitals.len(), 2);
        assert_eq!(star.diagnoses.len(), 2);
        assert_eq!(star.facts.height(), 3);

        let names: Vec<String> = star
            .facts
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, FACT_COLUMNS.to_vec());

        let keys = parse_keys(&star.facts, DIAGNOSIS_KEY, FACT_FILE).unwrap();
        assert_eq!(keys, vec![Some(1), Some(2), Some(2)]);
    }

    #[test]
    fn reconstruct_reproduces_source_values() {
        let source = source();
        let star = StarSchema::build(&source).unwrap();
        let rebuilt = star.reconstruct().unwrap();
        assert!(rebuilt.equals_missing(&source));
    }

    #[test]
    fn reconstruct_rejects_dangling_keys() {
        let mut star = StarSchema::build(&source()).unwrap();
        star.facts
            .replace(HOSPITAL_KEY, Series::new(HOSPITAL_KEY.into(), [1u32, 2, 9]))
            .unwrap();
        let err = star.reconstruct().unwrap_err();
        assert!(matches!(err, EtlError::UnknownKey { key: 9, .. }));
    }
}
