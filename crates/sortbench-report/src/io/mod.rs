//! IO utilities for loading the benchmark results table.

pub mod results_csv;

pub use results_csv::{read_results_csv, read_results_csv_with_config, ResultsReaderConfig};
