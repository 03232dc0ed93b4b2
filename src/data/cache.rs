//! Process-scoped read-through cache of loaded datasets.
//!
//! An entry stays valid while every file its source reads keeps the same
//! path, modification time and length. Entries can also be dropped
//! explicitly, e.g. from the dashboard's reload button.

use crate::data::{DataLoader, DataSource, Dataset, LoaderError};
use log::debug;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

/// Identity of one file on disk at the time it was read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceIdentity {
    pub path: PathBuf,
    pub modified: Option<SystemTime>,
    pub len: u64,
}

impl SourceIdentity {
    pub fn of(path: &Path) -> Result<Self, LoaderError> {
        let metadata =
            fs::metadata(path).map_err(|_| LoaderError::NotFound(path.to_path_buf()))?;
        Ok(Self {
            path: path.to_path_buf(),
            modified: metadata.modified().ok(),
            len: metadata.len(),
        })
    }

    fn of_source(source: &DataSource) -> Result<Vec<Self>, LoaderError> {
        source.files().iter().map(|p| Self::of(p)).collect()
    }
}

struct CacheEntry {
    identity: Vec<SourceIdentity>,
    dataset: Arc<Dataset>,
}

#[derive(Default)]
pub struct DatasetCache {
    entries: HashMap<DataSource, CacheEntry>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached dataset for `source`, loading it when absent or
    /// when any of its files changed since the last load.
    pub fn get_or_load(&mut self, source: &DataSource) -> Result<Arc<Dataset>, LoaderError> {
        let identity = SourceIdentity::of_source(source)?;

        if let Some(entry) = self.entries.get(source) {
            if entry.identity == identity {
                debug!("cache hit: {}", source);
                return Ok(Arc::clone(&entry.dataset));
            }
            debug!("cache stale: {}", source);
        } else {
            debug!("cache miss: {}", source);
        }

        let dataset = Arc::new(DataLoader::load(source)?);
        self.entries.insert(
            source.clone(),
            CacheEntry {
                identity,
                dataset: Arc::clone(&dataset),
            },
        );
        Ok(dataset)
    }

    /// Drop the entry for `source`; returns whether one existed.
    pub fn invalidate(&mut self, source: &DataSource) -> bool {
        debug!("cache invalidate: {}", source);
        self.entries.remove(source).is_some()
    }

}
