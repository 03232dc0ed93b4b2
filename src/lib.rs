//! Careboard - hospital admissions dashboard and star-schema ETL.
//!
//! The `careboard` binary is the dashboard, `careboard-etl` splits the flat
//! admissions file into dimension and fact tables.

pub mod charts;
pub mod config;
pub mod data;
pub mod etl;
pub mod gui;
pub mod stats;
