//! Charts module - Chart rendering

mod plotter;

pub use plotter::{metric_tiles, ChartData, ChartPlotter, COMPARISON_COLOR, OVERVIEW_COLOR};
