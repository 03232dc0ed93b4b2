//! Where the dashboard takes its admissions from.

use crate::etl::StarSchema;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataSource {
    /// The denormalized admissions file.
    Flat { csv: PathBuf },
    /// A directory of ETL outputs, joined back into the flat shape.
    Star { dir: PathBuf },
}

impl DataSource {
    /// Every file a load of this source reads.
    pub fn files(&self) -> Vec<PathBuf> {
        match self {
            DataSource::Flat { csv } => vec![csv.clone()],
            DataSource::Star { dir } => StarSchema::files(dir).to_vec(),
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Flat { csv } => write!(f, "{}", csv.display()),
            DataSource::Star { dir } => write!(f, "{} (star schema)", dir.display()),
        }
    }
}
