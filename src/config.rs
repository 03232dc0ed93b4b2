//! Application configuration, read from an optional JSON file.

use crate::data::DataSource;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "careboard.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Read the denormalized admissions file.
    #[default]
    Flat,
    /// Read the ETL outputs and join them back together.
    Star,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub source: SourceKind,
    pub data_csv: PathBuf,
    pub etl_output_dir: PathBuf,
    pub log_level: String,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::Flat,
            data_csv: PathBuf::from("data.csv"),
            etl_output_dir: PathBuf::from("etl_output"),
            log_level: "info".to_string(),
            window_width: 1400.0,
            window_height: 800.0,
        }
    }
}

impl AppConfig {
    /// Parse a config file; absent keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// An explicit path must exist; otherwise fall back to
    /// [`DEFAULT_CONFIG_FILE`] when present, then to defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        let fallback = Path::new(DEFAULT_CONFIG_FILE);
        if fallback.is_file() {
            Self::from_file(fallback)
        } else {
            Ok(Self::default())
        }
    }

    pub fn data_source(&self) -> DataSource {
        match self.source {
            SourceKind::Flat => DataSource::Flat {
                csv: self.data_csv.clone(),
            },
            SourceKind::Star => DataSource::Star {
                dir: self.etl_output_dir.clone(),
            },
        }
    }

    pub fn log_summary(&self) {
        info!(
            "Config: source={:?}, data_csv={}, etl_output_dir={}",
            self.source,
            self.data_csv.display(),
            self.etl_output_dir.display()
        );
    }
}
