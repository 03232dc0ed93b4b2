//! Stats module - metrics, grouping, filters and page reports

pub mod binning;
mod calculator;
pub mod categories;
mod filter;
mod grouping;
mod report;

pub use binning::BinSpec;
pub use calculator::{GroupCount, StatsCalculator, SummaryMetrics};
pub use categories::{gender_label, Gender, RaceCategory};
pub use filter::{format_number, FilterThresholds, PatientColumn, PatientFilter, PatientLookup};
pub use grouping::{GroupDimension, Grouping};
pub use report::{HospitalReport, PageReport};
