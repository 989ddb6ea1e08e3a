//! sortbench-report: charts for merge sort vs. hybrid merge/insertion sort benchmarks.
//!
//! This crate loads the benchmark results table produced by the sorting
//! benchmark, groups and averages the measured runtimes, and renders PNG line
//! charts (plus an optional interactive HTML report) for every array type
//! present in the table.
//!
//! The pipeline is strictly sequential: `io` loads a read-only
//! `BenchmarkTable`, `report::plan_report` decides which charts exist, and
//! `report::ReportRenderer` draws them.
pub mod config;
pub mod data_handling;
pub mod error;
pub mod io;
pub mod report;
pub mod stats;
