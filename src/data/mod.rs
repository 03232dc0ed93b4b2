//! Data module - CSV loading, typed records and the dataset cache

mod cache;
mod dataset;
mod loader;
mod processor;
mod record;
pub mod schema;
mod source;

pub use cache::{DatasetCache, SourceIdentity};
pub use dataset::Dataset;
pub use loader::{DataLoader, LoaderError};
pub use processor::{DataProcessor, ProcessorError};
pub use record::Admission;
pub use source::DataSource;
