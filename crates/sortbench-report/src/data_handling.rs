//! Benchmark records and the grouping helpers used to build chart series.
//!
//! `BenchmarkTable` is read-only once loaded. All grouping helpers produce
//! output that is independent of the order in which rows were read: series
//! points are sorted by `(size, time)` and grouped means are computed by
//! `stats::order_independent_mean`.
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::stats::order_independent_mean;

/// Array types written by the benchmark, in the order their charts are rendered.
pub const KNOWN_ARRAY_TYPES: [&str; 3] = ["random", "reversed", "almost"];

/// Sorting algorithm that produced a measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Plain top-down merge sort.
    Merge,
    /// Merge sort switching to insertion sort below a threshold.
    Hybrid,
}

impl Algorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Merge => "merge",
            Algorithm::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "merge" => Ok(Algorithm::Merge),
            "hybrid" => Ok(Algorithm::Hybrid),
            _ => Err(format!(
                "Unknown algorithm: '{}'. Expected 'merge' or 'hybrid'",
                s
            )),
        }
    }
}

/// One row of the results table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    pub array_type: String,
    pub algorithm: Algorithm,
    /// Insertion sort cutover. Only meaningful for `Algorithm::Hybrid`.
    pub threshold: Option<i64>,
    pub size: u64,
    pub time_microseconds: f64,
}

impl BenchmarkRecord {
    pub fn merge(array_type: &str, size: u64, time_microseconds: f64) -> Self {
        Self {
            array_type: array_type.to_string(),
            algorithm: Algorithm::Merge,
            threshold: None,
            size,
            time_microseconds,
        }
    }

    pub fn hybrid(array_type: &str, threshold: i64, size: u64, time_microseconds: f64) -> Self {
        Self {
            array_type: array_type.to_string(),
            algorithm: Algorithm::Hybrid,
            threshold: Some(threshold),
            size,
            time_microseconds,
        }
    }

    /// Threshold used for grouping; `None` for merge rows regardless of the cell value.
    pub fn hybrid_threshold(&self) -> Option<i64> {
        match self.algorithm {
            Algorithm::Hybrid => self.threshold,
            Algorithm::Merge => None,
        }
    }
}

/// Time-vs-size lines for one array type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SizeSeries {
    /// Points `(size, time)` of the merge line, sorted by size.
    pub merge: Vec<(u64, f64)>,
    /// One line per hybrid threshold, keyed (and therefore ordered) by threshold.
    pub hybrid: BTreeMap<i64, Vec<(u64, f64)>>,
}

impl SizeSeries {
    pub fn is_empty(&self) -> bool {
        self.merge.is_empty() && self.hybrid.is_empty()
    }

    /// Number of lines the chart will contain.
    pub fn line_count(&self) -> usize {
        usize::from(!self.merge.is_empty()) + self.hybrid.len()
    }

    pub fn points(&self) -> impl Iterator<Item = &(u64, f64)> {
        self.merge.iter().chain(self.hybrid.values().flatten())
    }
}

/// Mean hybrid runtime for one threshold, averaged over every size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdMean {
    pub threshold: i64,
    pub mean_time: f64,
    pub samples: usize,
}

/// The loaded results table.
#[derive(Debug, Clone, Default)]
pub struct BenchmarkTable {
    records: Vec<BenchmarkRecord>,
}

impl BenchmarkTable {
    pub fn new(records: Vec<BenchmarkRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[BenchmarkRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn rows_for<'a>(&'a self, array_type: &'a str) -> impl Iterator<Item = &'a BenchmarkRecord> {
        self.records
            .iter()
            .filter(move |r| r.array_type == array_type)
    }

    pub fn row_count(&self, array_type: &str) -> usize {
        self.rows_for(array_type).count()
    }

    /// Distinct array types with at least one row.
    ///
    /// Known types come first in `KNOWN_ARRAY_TYPES` order, any others follow
    /// in lexical order.
    pub fn array_types(&self) -> Vec<String> {
        let present: BTreeSet<&str> = self.records.iter().map(|r| r.array_type.as_str()).collect();

        let mut ordered: Vec<String> = KNOWN_ARRAY_TYPES
            .iter()
            .filter(|t| present.contains(*t))
            .map(|t| t.to_string())
            .collect();
        ordered.extend(
            present
                .into_iter()
                .filter(|t| !KNOWN_ARRAY_TYPES.contains(t))
                .map(str::to_string),
        );
        ordered
    }

    /// Group the rows of `array_type` into the lines of its time-vs-size chart.
    pub fn size_series(&self, array_type: &str) -> SizeSeries {
        let mut series = SizeSeries::default();

        for record in self.rows_for(array_type) {
            let point = (record.size, record.time_microseconds);
            match record.algorithm {
                Algorithm::Merge => series.merge.push(point),
                Algorithm::Hybrid => {
                    if let Some(threshold) = record.threshold {
                        series.hybrid.entry(threshold).or_default().push(point);
                    }
                }
            }
        }

        sort_points(&mut series.merge);
        for points in series.hybrid.values_mut() {
            sort_points(points);
        }
        series
    }

    /// Mean hybrid runtime per threshold for `array_type`, ascending by threshold.
    pub fn threshold_means(&self, array_type: &str) -> Vec<ThresholdMean> {
        let mut grouped: BTreeMap<i64, Vec<f64>> = BTreeMap::new();
        for record in self.rows_for(array_type) {
            if let Some(threshold) = record.hybrid_threshold() {
                grouped
                    .entry(threshold)
                    .or_default()
                    .push(record.time_microseconds);
            }
        }

        grouped
            .into_iter()
            .filter_map(|(threshold, mut times)| {
                let samples = times.len();
                order_independent_mean(&mut times).map(|mean_time| ThresholdMean {
                    threshold,
                    mean_time,
                    samples,
                })
            })
            .collect()
    }

    pub fn log_input_data_summary(&self) {
        log::info!("[sortbench::data] {} benchmark rows loaded", self.len());
        for array_type in self.array_types() {
            let merge = self
                .rows_for(&array_type)
                .filter(|r| r.algorithm == Algorithm::Merge)
                .count();
            let hybrid = self.row_count(&array_type) - merge;
            log::info!(
                "[sortbench::data] {}: {} merge rows, {} hybrid rows",
                array_type,
                merge,
                hybrid
            );
        }
    }
}

fn sort_points(points: &mut [(u64, f64)]) {
    points.sort_unstable_by(|a, b| a.0.cmp(&b.0).then(a.1.total_cmp(&b.1)));
}

/// Human readable chart title for an array type label.
pub fn display_title(array_type: &str) -> String {
    match array_type {
        "random" => "Random".to_string(),
        "reversed" => "Reversed".to_string(),
        "almost" => "Almost".to_string(),
        other => {
            let mut chars = other.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        }
    }
}
